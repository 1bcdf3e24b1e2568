//! Fixed-focal-length perspective projection around the vertical axis.
//!
//! This is the only transform the card needs: a yaw rotation on the x/z
//! plane followed by a perspective divide. It is a pure function of its
//! inputs, so it is safe to call from anywhere, for any particle, in any
//! order.

use crate::math::Vec3;

/// A world point mapped onto the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Screen x in pixels
    pub x: f32,
    /// Screen y in pixels
    pub y: f32,
    /// Rotated z before the perspective divide, used only for paint order
    pub depth: f32,
    /// Perspective scale factor; grows as the point swings toward the viewer
    pub perspective: f32,
}

impl Projected {
    /// Whether this projection is safe to draw.
    ///
    /// Points approaching the focal plane make the perspective factor
    /// diverge; anything non-finite, non-positive, or past `max_perspective`
    /// is dropped from the frame instead of rendering a smeared artifact.
    pub fn is_renderable(&self, max_perspective: f32) -> bool {
        self.perspective.is_finite()
            && self.perspective > 0.0
            && self.perspective <= max_perspective
            && self.x.is_finite()
            && self.y.is_finite()
    }
}

/// Project a world point rotated by `angle` around the vertical axis.
///
/// `center` is the screen-space origin and `scale` the world-to-pixel
/// factor. `focal` is the perspective focal length; the caller guarantees
/// the scene's geometry stays well inside it (see `SceneConfig::validate`).
pub fn project(point: Vec3, angle: f32, center: (f32, f32), scale: f32, focal: f32) -> Projected {
    let cos = angle.cos();
    let sin = angle.sin();

    let x = point.x * cos - point.z * sin;
    let z = point.x * sin + point.z * cos;

    let perspective = focal / (focal - z);

    Projected {
        x: x * perspective * scale + center.0,
        y: point.y * perspective * scale + center.1,
        depth: z,
        perspective,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    const FOCAL: f32 = 400.0;

    #[test]
    fn test_zero_angle_is_identity_rotation() {
        let p = project(Vec3::new(30.0, -50.0, 10.0), 0.0, (0.0, 0.0), 1.0, FOCAL);
        let expected_perspective = FOCAL / (FOCAL - 10.0);
        assert!((p.depth - 10.0).abs() < 0.0001);
        assert!((p.x - 30.0 * expected_perspective).abs() < 0.001);
        assert!((p.y - -50.0 * expected_perspective).abs() < 0.001);
    }

    #[test]
    fn test_rotation_is_periodic() {
        let point = Vec3::new(80.0, -120.0, -40.0);
        for i in 0..8 {
            let angle = i as f32 * 0.7;
            let a = project(point, angle, (200.0, 300.0), 0.8, FOCAL);
            let b = project(point, angle + TAU, (200.0, 300.0), 0.8, FOCAL);
            assert!((a.x - b.x).abs() < 0.01);
            assert!((a.y - b.y).abs() < 0.01);
            assert!((a.depth - b.depth).abs() < 0.01);
        }
    }

    #[test]
    fn test_center_and_scale_offset_screen_coords() {
        let point = Vec3::new(10.0, 20.0, 0.0);
        let p = project(point, 0.0, (100.0, 50.0), 2.0, FOCAL);
        assert!((p.x - (10.0 * 2.0 + 100.0)).abs() < 0.001);
        assert!((p.y - (20.0 * 2.0 + 50.0)).abs() < 0.001);
    }

    #[test]
    fn test_half_turn_flips_depth() {
        let point = Vec3::new(0.0, 0.0, 60.0);
        let front = project(point, 0.0, (0.0, 0.0), 1.0, FOCAL);
        let back = project(point, std::f32::consts::PI, (0.0, 0.0), 1.0, FOCAL);
        assert!((front.depth - 60.0).abs() < 0.001);
        assert!((back.depth + 60.0).abs() < 0.001);
        // Nearer to the viewer means larger perspective factor
        assert!(front.perspective > back.perspective);
    }

    #[test]
    fn test_near_focal_plane_is_flagged() {
        let p = project(Vec3::new(0.0, 0.0, 399.99), 0.0, (0.0, 0.0), 1.0, FOCAL);
        assert!(!p.is_renderable(40.0));

        // Exactly on the plane the divide is infinite
        let p = project(Vec3::new(0.0, 0.0, 400.0), 0.0, (0.0, 0.0), 1.0, FOCAL);
        assert!(!p.is_renderable(40.0));

        // Behind the focal plane the factor goes negative
        let p = project(Vec3::new(0.0, 0.0, 500.0), 0.0, (0.0, 0.0), 1.0, FOCAL);
        assert!(!p.is_renderable(40.0));
    }

    #[test]
    fn test_tree_bounds_are_renderable() {
        // Anything inside the default cone stays far from the focal plane
        let p = project(Vec3::new(125.0, 120.0, 125.0), 1.3, (0.0, 0.0), 1.0, FOCAL);
        assert!(p.is_renderable(40.0));
    }
}
