//! Screen-area projection: how much of the screen an object's bounding
//! sphere covers, normalized against total screen area.

use glam::Vec3;

/// Project a bounding sphere through a perspective camera and return the
/// fraction of the screen it covers.
///
/// `fov_y` is the vertical field of view in radians, `aspect` the
/// width/height ratio. The result is the sphere's projected disc area over
/// the view-plane area at the sphere's distance, so it is typically in
/// `[0, 1]` but may exceed 1 for objects wider than the screen. A camera
/// inside the sphere reports full coverage.
pub fn projected_screen_area(
    center: Vec3,
    radius: f32,
    camera_pos: Vec3,
    fov_y: f32,
    aspect: f32,
) -> f32 {
    debug_assert!(radius >= 0.0, "negative bounding radius");
    debug_assert!(fov_y > 0.0 && aspect > 0.0, "degenerate camera");

    let distance = center.distance(camera_pos);
    if distance <= radius {
        return 1.0;
    }

    // View-plane extents at the sphere's distance.
    let half_height = (fov_y * 0.5).tan() * distance;
    let half_width = half_height * aspect;

    let disc_area = std::f32::consts::PI * radius * radius;
    disc_area / (4.0 * half_width * half_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOV: f32 = std::f32::consts::FRAC_PI_2;

    /// Halving the distance quadruples the covered area.
    #[test]
    fn test_area_scales_inverse_square_with_distance() {
        let near = projected_screen_area(Vec3::new(0.0, 0.0, 10.0), 1.0, Vec3::ZERO, FOV, 16.0 / 9.0);
        let far = projected_screen_area(Vec3::new(0.0, 0.0, 20.0), 1.0, Vec3::ZERO, FOV, 16.0 / 9.0);
        assert!((near / far - 4.0).abs() < 1.0e-4);
    }

    /// A camera inside the bounding sphere sees full coverage.
    #[test]
    fn test_inside_sphere_is_full_coverage() {
        let area = projected_screen_area(Vec3::ZERO, 5.0, Vec3::new(1.0, 0.0, 0.0), FOV, 1.0);
        assert_eq!(area, 1.0);
    }

    /// A distant small object covers a vanishing fraction of the screen.
    #[test]
    fn test_distant_object_is_tiny() {
        let area = projected_screen_area(Vec3::new(0.0, 0.0, 5000.0), 0.5, Vec3::ZERO, FOV, 1.0);
        assert!(area > 0.0);
        assert!(area < 1.0e-6);
    }

    /// A wider field of view shrinks every object's relative coverage.
    #[test]
    fn test_wider_fov_reduces_coverage() {
        let narrow = projected_screen_area(Vec3::new(0.0, 0.0, 50.0), 2.0, Vec3::ZERO, 0.5, 1.0);
        let wide = projected_screen_area(Vec3::new(0.0, 0.0, 50.0), 2.0, Vec3::ZERO, 1.5, 1.0);
        assert!(narrow > wide);
    }
}
