use criterion::{criterion_group, criterion_main, Criterion};
use screenmatch::{ImageView, MatchConfig, Matcher, Point, Predictor, Resolution};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn extract_patch(
    image: &[u8],
    img_width: usize,
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = (y0 + y) * img_width;
        out.extend_from_slice(&image[row + x0..row + x0 + width]);
    }
    out
}

fn bench_matcher(c: &mut Criterion) {
    let (img_width, img_height) = (480, 270);
    let image = make_image(img_width, img_height);
    let image_view = ImageView::from_gray(&image, img_width, img_height).unwrap();

    let (tpl_width, tpl_height) = (48, 32);
    let (tpl_x0, tpl_y0) = (300, 150);
    let tpl = extract_patch(&image, img_width, tpl_x0, tpl_y0, tpl_width, tpl_height);
    let tpl_view = ImageView::from_gray(&tpl, tpl_width, tpl_height).unwrap();

    let matcher = Matcher::new();
    c.bench_function("match_template_full", |b| {
        b.iter(|| {
            let found = matcher
                .match_template(black_box(image_view), black_box(tpl_view))
                .unwrap();
            black_box(found);
        })
    });

    let all = Matcher::new().with_config(MatchConfig {
        threshold: 0.6,
        ..MatchConfig::default()
    });
    c.bench_function("match_all_full", |b| {
        b.iter(|| {
            let found = all
                .match_all(black_box(image_view), black_box(tpl_view))
                .unwrap();
            black_box(found);
        })
    });

    let res = Resolution::new(img_width, img_height);
    let click = Point::new(
        (tpl_x0 + tpl_width / 2) as i64,
        (tpl_y0 + tpl_height / 2) as i64,
    );
    let recorded = Predictor::to_recorded_position(click, res);
    c.bench_function("match_in_predicted_area", |b| {
        b.iter(|| {
            let found = matcher
                .match_in_predicted_area(
                    black_box(image_view),
                    black_box(tpl_view),
                    Some(recorded),
                    Some(res),
                )
                .unwrap();
            black_box(found);
        })
    });

    #[cfg(feature = "rayon")]
    {
        let parallel = Matcher::new().with_config(MatchConfig {
            parallel: true,
            ..MatchConfig::default()
        });
        c.bench_function("match_template_full_rayon", |b| {
            b.iter(|| {
                let found = parallel
                    .match_template(black_box(image_view), black_box(tpl_view))
                    .unwrap();
                black_box(found);
            })
        });
    }
}

criterion_group!(benches, bench_matcher);
criterion_main!(benches);
