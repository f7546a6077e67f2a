use glam::DVec2;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

use driver::Camera;

const WORLD_WIDTH: u32 = 1280;
const WORLD_HEIGHT: u32 = 720;
const CROP: u32 = 84;

fn world_with_marker(pos: DVec2) -> Pixmap {
    let mut world = Pixmap::new(WORLD_WIDTH, WORLD_HEIGHT).unwrap();
    world.fill(Color::from_rgba8(0, 255, 0, 255));

    let mut paint = Paint::default();
    paint.anti_alias = false;
    paint.set_color_rgba8(255, 0, 0, 255);
    let circle = PathBuilder::from_circle(pos.x as f32, pos.y as f32, 3.0).unwrap();
    world.fill_path(&circle, &paint, FillRule::Winding, Transform::identity(), None);

    world
}

/// Centroid of the red marker pixels in the composed view.
fn marker_centroid(screen: &Pixmap) -> Option<DVec2> {
    let mut sum = DVec2::ZERO;
    let mut count = 0.0;
    for y in 0..screen.height() {
        for x in 0..screen.width() {
            let pixel = screen.pixel(x, y).unwrap().demultiply();
            if pixel.red() > 150 && pixel.green() < 80 && pixel.blue() < 80 {
                sum += DVec2::new(x as f64, y as f64);
                count += 1.0;
            }
        }
    }
    (count > 0.0).then(|| sum / count)
}

#[test]
fn marker_lands_on_the_anchor_for_all_cardinal_headings() {
    let car_pos = DVec2::new(740.0, 240.0);
    let world = world_with_marker(car_pos);
    let anchor = Camera::anchor((CROP, CROP));

    for heading in [0.0, 90.0, 180.0, 270.0] {
        let mut camera = Camera::new().unwrap();
        let mut screen = Pixmap::new(CROP, CROP).unwrap();
        camera
            .compose(&world, car_pos, heading, &mut screen)
            .unwrap();

        let centroid = marker_centroid(&screen)
            .unwrap_or_else(|| panic!("marker not visible at heading {heading}"));
        let drift = (centroid - anchor).length();
        assert!(
            drift <= 2.5,
            "anchor drift {drift:.2}px at heading {heading}: centroid {centroid:?}, anchor {anchor:?}"
        );
    }
}

#[test]
fn marker_tracks_the_anchor_away_from_the_canvas_center() {
    let car_pos = DVec2::new(420.0, 480.0);
    let world = world_with_marker(car_pos);
    let anchor = Camera::anchor((CROP, CROP));

    let mut camera = Camera::new().unwrap();
    let mut screen = Pixmap::new(CROP, CROP).unwrap();
    camera.compose(&world, car_pos, 135.0, &mut screen).unwrap();

    let centroid = marker_centroid(&screen).expect("marker not visible");
    assert!((centroid - anchor).length() <= 2.5);
}

#[test]
fn rotation_border_is_substituted_with_the_background_sample() {
    // A pose near the world corner drags the crop window past the rotated
    // world's edge; the uncovered region must read as background, not black.
    let car_pos = DVec2::new(5.0, 5.0);
    let mut world = Pixmap::new(WORLD_WIDTH, WORLD_HEIGHT).unwrap();
    world.fill(Color::from_rgba8(0, 255, 0, 255));

    let mut camera = Camera::new().unwrap();
    let mut screen = Pixmap::new(CROP, CROP).unwrap();
    camera.compose(&world, car_pos, 0.0, &mut screen).unwrap();

    for y in 0..CROP {
        for x in 0..CROP {
            let pixel = screen.pixel(x, y).unwrap().demultiply();
            let is_black =
                pixel.red() == 0 && pixel.green() == 0 && pixel.blue() == 0 && pixel.alpha() == 255;
            assert!(!is_black, "black border artifact at ({x}, {y})");
        }
    }
}

#[test]
fn view_angle_points_the_heading_up() {
    assert_eq!(Camera::view_angle(90.0), 0.0);
    assert_eq!(Camera::view_angle(0.0), 90.0);
    assert_eq!(Camera::view_angle(180.0), -90.0);
}
