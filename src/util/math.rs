//! Numeric helpers shared by the predictor and the kernels.

const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

/// Rounds to `decimals` places, halves away from zero.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// BT.601 luminance in 14-bit fixed point, rounded to nearest.
pub(crate) fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let sum = LUMA_R * u32::from(r) + LUMA_G * u32::from(g) + LUMA_B * u32::from(b);
    ((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Maps a correlation score onto `[0, 1]`; non-finite scores become 0.
pub(crate) fn clamp_unit(score: f32) -> f32 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{clamp_unit, luma_u8, round_to};

    #[test]
    fn round_to_three_decimals() {
        assert!((round_to(0.046_2, 3) - 0.046).abs() < 1e-12);
        assert!((round_to(-0.041_62, 3) + 0.042).abs() < 1e-12);
        assert_eq!(round_to(0.0, 3), 0.0);
    }

    #[test]
    fn luma_preserves_gray_levels() {
        for v in [0u8, 1, 77, 128, 254, 255] {
            assert_eq!(luma_u8(v, v, v), v);
        }
        assert_eq!(luma_u8(255, 0, 0), 76);
        assert_eq!(luma_u8(0, 255, 0), 150);
        assert_eq!(luma_u8(0, 0, 255), 29);
    }

    #[test]
    fn clamp_unit_handles_out_of_range() {
        assert_eq!(clamp_unit(1.000_01), 1.0);
        assert_eq!(clamp_unit(-0.3), 0.0);
        assert_eq!(clamp_unit(f32::NAN), 0.0);
        assert_eq!(clamp_unit(f32::NEG_INFINITY), 0.0);
    }
}
