use glam::Mat4;

/// Viewing volume producing a projection matrix.
///
/// Depth is mapped to `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frustum {
    projection: Mat4,
}

impl Default for Frustum {
    /// Identity projection until a perspective is set.
    fn default() -> Self {
        Self { projection: Mat4::IDENTITY }
    }
}

impl Frustum {
    /// Creates a perspective frustum.
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut f = Self::default();
        f.set_perspective(fov_y_degrees, aspect, near, far);
        f
    }

    /// Sets a symmetric perspective projection.
    ///
    /// `aspect` is clamped away from zero so a collapsed window cannot produce
    /// a non-finite matrix.
    pub fn set_perspective(&mut self, fov_y_degrees: f32, aspect: f32, near: f32, far: f32) {
        self.projection =
            Mat4::perspective_rh(fov_y_degrees.to_radians(), aspect.max(1e-3), near, far);
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn perspective_maps_near_and_far_to_depth_range() {
        let f = Frustum::perspective(40.0, 800.0 / 600.0, 1.0, 500.0);
        let near = f.projection().project_point3(Vec3::new(0.0, 0.0, -1.0));
        let far = f.projection().project_point3(Vec3::new(0.0, 0.0, -500.0));
        assert!(near.z.abs() < 1e-5);
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn eye_space_point_ahead_projects_inside_volume() {
        let f = Frustum::perspective(40.0, 1.5, 1.0, 500.0);
        let ndc = f.projection().project_point3(Vec3::new(0.0, 0.0, -30.0));
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!((0.0..1.0).contains(&ndc.z));
    }

    #[test]
    fn zero_aspect_stays_finite() {
        let f = Frustum::perspective(40.0, 0.0, 1.0, 500.0);
        assert!(f.projection().is_finite());
    }
}
