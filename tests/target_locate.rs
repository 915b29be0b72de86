use screenmatch::{
    ImageView, Matcher, Point, Predictor, PredictorConfig, RecordedPosition, Resolution, Target,
    TargetPos,
};

fn make_scene(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let hx = (x as u32).wrapping_mul(2_246_822_519);
            let hy = (y as u32).wrapping_mul(3_266_489_917);
            let h = (hx ^ hy).wrapping_mul(668_265_263);
            data.push((h >> 24) as u8);
        }
    }
    data
}

fn extract_patch(
    image: &[u8],
    img_width: usize,
    x0: usize,
    y0: usize,
    w: usize,
    h: usize,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(w * h);
    for y in y0..y0 + h {
        out.extend_from_slice(&image[y * img_width + x0..y * img_width + x0 + w]);
    }
    out
}

#[test]
fn locate_uses_predicted_area_then_target_pos() {
    let (width, height) = (160, 120);
    let scene = make_scene(width, height);
    let icon = extract_patch(&scene, width, 100, 30, 14, 10);
    let screen = ImageView::from_gray(&scene, width, height).unwrap();
    let search = ImageView::from_gray(&icon, 14, 10).unwrap();

    let res = Resolution::new(width, height);
    let recorded = Predictor::to_recorded_position(Point::new(107, 35), res);
    let target = Target::new(search)
        .with_record(recorded, Some(res))
        .with_target_pos(TargetPos::BottomRight);

    let located = target.locate(screen, &Matcher::new()).unwrap().unwrap();
    assert_eq!(located.result.center(), Point::new(107, 35));
    assert_eq!(located.point, Point::new(114, 40));
}

#[test]
fn locate_falls_back_to_full_screen() {
    let (width, height) = (160, 120);
    let scene = make_scene(width, height);
    let icon = extract_patch(&scene, width, 5, 90, 12, 12);
    let screen = ImageView::from_gray(&scene, width, height).unwrap();
    let search = ImageView::from_gray(&icon, 12, 12).unwrap();

    // Recorded in the opposite corner; the predicted area misses the icon.
    let target = Target::new(search).with_record(RecordedPosition::new(0.4, -0.3), None);
    let matcher = Matcher::new().with_predictor(PredictorConfig { deviation: 5.0 });
    let located = target.locate(screen, &matcher).unwrap().unwrap();
    assert_eq!(located.result.region().top_left(), Point::new(5, 90));
    assert_eq!(located.point, located.result.center());
}

#[test]
fn target_threshold_overrides_matcher() {
    let (width, height) = (80, 60);
    let scene = make_scene(width, height);
    let mut icon = extract_patch(&scene, width, 20, 20, 10, 10);
    for v in icon.iter_mut().step_by(3) {
        *v = v.wrapping_add(60);
    }
    let screen = ImageView::from_gray(&scene, width, height).unwrap();
    let search = ImageView::from_gray(&icon, 10, 10).unwrap();

    let lenient = Target::new(search).with_threshold(0.3);
    let strict = Target::new(search).with_threshold(0.999);
    assert!(lenient.locate(screen, &Matcher::new()).unwrap().is_some());
    assert!(strict.locate(screen, &Matcher::new()).unwrap().is_none());
}

#[test]
fn locate_all_maps_every_result() {
    let tile = make_scene(9, 7);
    let (width, height) = (60, 30);
    let mut scene = vec![0u8; width * height];
    for &x0 in &[2usize, 25, 48] {
        for y in 0..7 {
            for x in 0..9 {
                scene[(11 + y) * width + x0 + x] = tile[y * 9 + x];
            }
        }
    }
    let screen = ImageView::from_gray(&scene, width, height).unwrap();
    let search = ImageView::from_gray(&tile, 9, 7).unwrap();
    let all = Target::new(search)
        .with_target_pos(TargetPos::TopLeft)
        .locate_all(screen, &Matcher::new())
        .unwrap();
    let mut points: Vec<Point> = all.iter().map(|l| l.point).collect();
    points.sort_by_key(|p| p.x);
    assert_eq!(
        points,
        vec![Point::new(2, 11), Point::new(25, 11), Point::new(48, 11)]
    );
}
