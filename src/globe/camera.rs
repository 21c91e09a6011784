use glam::DVec3;

use crate::globe::projection::GLOBE_RADIUS;

/// Closest the camera may orbit, in world units
pub const MIN_DISTANCE: f64 = 4.0;
/// Farthest the camera may orbit, in world units
pub const MAX_DISTANCE: f64 = 20.0;
/// Starting orbit distance
pub const DEFAULT_DISTANCE: f64 = 8.0;

const ZOOM_STEP: f64 = 1.25;

/// Orbit camera looking at the globe center. Orientation stored as a
/// rotation matrix (3 column vectors) for efficient point transformation
/// without quaternion dependency on DQuat.
#[derive(Clone)]
pub struct OrbitCamera {
    /// Direction from the globe center toward the camera
    forward: DVec3,
    /// Screen-right direction
    right: DVec3,
    /// Screen-up direction
    up: DVec3,
    /// Camera distance from the globe center in world units (controls zoom)
    pub distance: f64,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl OrbitCamera {
    /// Camera on the +z axis, y up — matches the scene's starting view.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            forward: DVec3::Z,
            right: DVec3::X,
            up: DVec3::Y,
            distance: DEFAULT_DISTANCE,
            width,
            height,
        }
    }

    /// Pixels per world unit at the current distance.
    fn scale(&self) -> f64 {
        1.4 * self.width.min(self.height) as f64 / self.distance
    }

    /// On-screen radius of the globe silhouette in pixels.
    pub fn globe_pixel_radius(&self) -> f64 {
        GLOBE_RADIUS * self.scale()
    }

    /// Project a world-space point to screen pixels.
    /// Returns `None` for points behind the globe-center plane
    /// (the back of the visible hemisphere).
    pub fn project(&self, p: DVec3) -> Option<(i32, i32)> {
        let depth = p.dot(self.forward);
        if depth < 0.0 {
            return None;
        }

        // Orthographic: project onto right/up plane
        let sx = p.dot(self.right) * self.scale();
        let sy = p.dot(self.up) * self.scale();

        let px = (self.width as f64 / 2.0 + sx) as i32;
        let py = (self.height as f64 / 2.0 - sy) as i32;

        Some((px, py))
    }

    /// Rotate the view by a pixel drag delta. Positive dx drags the
    /// surface left, so the camera orbits east — the surface follows
    /// the cursor.
    pub fn rotate_drag(&mut self, dx: i32, dy: i32) {
        let r = self.globe_pixel_radius().max(1.0);
        let angle_x = dx as f64 / r;
        let angle_y = -(dy as f64) / r;

        // Horizontal drag: rotate around the up axis
        if angle_x.abs() > 1e-10 {
            let (sin_a, cos_a) = angle_x.sin_cos();
            let new_forward = self.forward * cos_a + self.right * sin_a;
            let new_right = self.right * cos_a - self.forward * sin_a;
            self.forward = new_forward.normalize();
            self.right = new_right.normalize();
        }

        // Vertical drag: rotate around the right axis
        if angle_y.abs() > 1e-10 {
            let (sin_a, cos_a) = angle_y.sin_cos();
            let new_forward = self.forward * cos_a + self.up * sin_a;
            let new_up = self.up * cos_a - self.forward * sin_a;
            self.forward = new_forward.normalize();
            self.up = new_up.normalize();
        }
    }

    /// Move the camera closer (zoom in), clamped to the orbit bounds.
    pub fn zoom_in(&mut self) {
        self.distance = (self.distance / ZOOM_STEP).max(MIN_DISTANCE);
    }

    /// Move the camera away (zoom out), clamped to the orbit bounds.
    pub fn zoom_out(&mut self) {
        self.distance = (self.distance * ZOOM_STEP).min(MAX_DISTANCE);
    }

    /// Zoom factor relative to the starting distance (1.0 = default view).
    pub fn zoom(&self) -> f64 {
        DEFAULT_DISTANCE / self.distance
    }

    /// Restore the starting orientation and distance.
    pub fn reset(&mut self) {
        *self = Self::new(self.width, self.height);
    }

    /// Set viewport dimensions.
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Check if a projected point is within the viewport.
    pub fn is_visible(&self, px: i32, py: i32) -> bool {
        px >= -10
            && px < self.width as i32 + 10
            && py >= -10
            && py < self.height as i32 + 10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_point_projects_to_center() {
        let cam = OrbitCamera::new(200, 200);
        let (px, py) = cam.project(DVec3::new(0.0, 0.0, 2.0)).unwrap();
        assert_eq!((px, py), (100, 100));
    }

    #[test]
    fn test_back_point_culled() {
        let cam = OrbitCamera::new(200, 200);
        assert!(cam.project(DVec3::new(0.0, 0.0, -2.0)).is_none());
    }

    #[test]
    fn test_east_is_right_north_is_up() {
        let cam = OrbitCamera::new(200, 200);
        let (ex, _) = cam.project(DVec3::new(1.0, 0.0, 1.0)).unwrap();
        assert!(ex > 100);
        let (_, ny) = cam.project(DVec3::new(0.0, 1.0, 1.0)).unwrap();
        assert!(ny < 100);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut cam = OrbitCamera::new(200, 200);
        for _ in 0..100 {
            cam.zoom_in();
        }
        assert!((cam.distance - MIN_DISTANCE).abs() < 1e-9);
        for _ in 0..100 {
            cam.zoom_out();
        }
        assert!((cam.distance - MAX_DISTANCE).abs() < 1e-9);
    }

    #[test]
    fn test_drag_brings_hidden_point_into_view() {
        let mut cam = OrbitCamera::new(200, 200);
        let behind = DVec3::new(0.0, 0.0, -2.0);
        assert!(cam.project(behind).is_none());
        // Half a revolution of horizontal drag
        let r = cam.globe_pixel_radius();
        cam.rotate_drag((std::f64::consts::PI * r) as i32, 0);
        assert!(cam.project(behind).is_some());
    }

    #[test]
    fn test_drag_keeps_basis_normalized() {
        let mut cam = OrbitCamera::new(200, 200);
        for _ in 0..50 {
            cam.rotate_drag(17, -9);
        }
        assert!((cam.forward.length() - 1.0).abs() < 1e-9);
        assert!((cam.right.length() - 1.0).abs() < 1e-9);
        assert!((cam.up.length() - 1.0).abs() < 1e-9);
    }
}
