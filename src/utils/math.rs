use glam::DVec2;
use std::f64::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Normalize an angle in degrees to [0, 360).
#[inline]
pub fn wrap_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Rotate `point` about `origin` by `degrees` in canvas coordinates.
///
/// Positive angles rotate counter-clockwise on a y-down canvas, the same
/// direction a positive-angle surface rotation turns the rendered image.
/// The camera relies on the point and image rotations staying in this one
/// convention.
pub fn rotate_point(point: DVec2, origin: DVec2, degrees: f64) -> DVec2 {
    let (sin, cos) = deg_to_rad(degrees).sin_cos();
    let adjusted = point - origin;
    DVec2::new(
        origin.x + cos * adjusted.x + sin * adjusted.y,
        origin.y - sin * adjusted.x + cos * adjusted.y,
    )
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn quarter_turn_is_counter_clockwise_on_canvas() {
        let origin = DVec2::new(0.0, 0.0);
        // A point to the right of the origin ends up above it (smaller y)
        // after a +90 degree rotation.
        let rotated = rotate_point(DVec2::new(10.0, 0.0), origin, 90.0);
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(rotated.y, -10.0, epsilon = 1e-9);
    }

    #[test]
    fn rotation_about_offset_pivot() {
        let origin = DVec2::new(640.0, 360.0);
        let rotated = rotate_point(DVec2::new(740.0, 240.0), origin, 90.0);
        assert_relative_eq!(rotated.x, 520.0, epsilon = 1e-9);
        assert_relative_eq!(rotated.y, 260.0, epsilon = 1e-9);
    }

    #[test]
    fn full_turn_is_identity() {
        let origin = DVec2::new(3.0, -2.0);
        let point = DVec2::new(17.5, 4.25);
        let rotated = rotate_point(point, origin, 360.0);
        assert_relative_eq!(rotated.x, point.x, epsilon = 1e-9);
        assert_relative_eq!(rotated.y, point.y, epsilon = 1e-9);
    }

    #[test]
    fn wrap_keeps_degrees_in_range() {
        assert_relative_eq!(wrap_degrees(370.0), 10.0);
        assert_relative_eq!(wrap_degrees(-90.0), 270.0);
        assert_relative_eq!(wrap_degrees(0.0), 0.0);
    }
}
