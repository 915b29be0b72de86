//! screenmatch locates a small search image inside a captured screen image.
//!
//! Matching is zero-mean normalized cross-correlation on luminance, with an
//! optional per-channel color check on the matched window. A search image
//! recorded together with its screen position can be searched only in the
//! area predicted for the current screen resolution, which is faster and
//! avoids look-alikes elsewhere on screen.
//!
//! ```
//! use screenmatch::{ImageView, Matcher};
//!
//! let mut screen = vec![0u8; 64 * 48];
//! for (i, px) in screen.iter_mut().enumerate() {
//!     let (x, y) = (i % 64, i / 64);
//!     *px = ((x * 7) ^ (y * 13) ^ (x * y)) as u8;
//! }
//! let mut icon = Vec::new();
//! for y in 10..18 {
//!     icon.extend_from_slice(&screen[y * 64 + 20..y * 64 + 30]);
//! }
//!
//! let screen_view = ImageView::from_gray(&screen, 64, 48)?;
//! let icon_view = ImageView::from_gray(&icon, 10, 8)?;
//! let found = Matcher::new().match_template(screen_view, icon_view)?;
//! assert_eq!(found.map(|m| (m.center().x, m.center().y)), Some((25, 14)));
//! # Ok::<(), screenmatch::MatchError>(())
//! ```
//!
//! Scalar kernels are the default; the `rayon` feature adds a row-parallel
//! kernel, `image-io` adds loading through the `image` crate and `tracing`
//! emits spans and events.

pub mod confidence;
pub mod geometry;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod predict;
pub mod search;
pub mod target;
mod template;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use confidence::ConfidenceStrategy;
pub use geometry::{PixelRect, Point, Region, Resolution, SearchArea};
pub use crate::image::{ImageView, OwnedImage};
pub use predict::{Predictor, PredictorConfig, RecordedPosition, DEFAULT_DEVIATION};
pub use search::{
    match_all, match_in_predicted_area, match_template, MatchConfig, MatchResult, Matcher,
    DEFAULT_MAX_COUNT, DEFAULT_THRESHOLD,
};
pub use target::{Located, Target, TargetPos};
pub use util::{MatchError, ScreenMatchResult};
