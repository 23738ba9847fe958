use glam::{Mat4, Quat, Vec3, Vec4};

/// Position and orientation of a camera or an object.
///
/// A frame stores its origin plus two unit vectors, `forward` and `up`. The
/// third axis is derived as `up × forward`. A fresh frame sits at the world
/// origin looking down -Z with +Y up.
///
/// The same frame can be read two ways:
/// - [`matrix`](Self::matrix): model transform placing an object at the frame
/// - [`camera_matrix`](Self::camera_matrix): view transform looking out of it
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    origin: Vec3,
    forward: Vec3,
    up: Vec3,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
        }
    }
}

impl Frame {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a default-oriented frame at `origin`.
    #[inline]
    pub fn at(origin: Vec3) -> Self {
        Self { origin, ..Self::default() }
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Local X axis in world space (`up × forward`).
    #[inline]
    pub fn x_axis(&self) -> Vec3 {
        self.up.cross(self.forward)
    }

    /// Moves the origin along `forward`. Negative values move backwards.
    #[inline]
    pub fn move_forward(&mut self, delta: f32) {
        self.origin += self.forward * delta;
    }

    /// Rotates the orientation about a world-space axis through the origin.
    ///
    /// `angle` is in radians, positive is counter-clockwise when looking down
    /// the axis toward the origin. A zero-length axis leaves the frame unchanged.
    pub fn rotate_world(&mut self, angle: f32, axis: Vec3) {
        let Some(axis) = axis.try_normalize() else { return };
        let q = Quat::from_axis_angle(axis, angle);
        self.forward = q * self.forward;
        self.up = q * self.up;
        self.orthonormalize();
    }

    /// Model matrix: columns are the local X axis, `up`, `forward` and the origin.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_cols(
            self.x_axis().extend(0.0),
            self.up.extend(0.0),
            self.forward.extend(0.0),
            self.origin.extend(1.0),
        )
    }

    /// View matrix for a camera placed at this frame.
    ///
    /// The camera looks along `forward`; eye-space -Z maps to it.
    pub fn camera_matrix(&self) -> Mat4 {
        let z = -self.forward;
        let x = self.up.cross(z);
        let rotation = Mat4::from_cols(
            Vec4::new(x.x, self.up.x, z.x, 0.0),
            Vec4::new(x.y, self.up.y, z.y, 0.0),
            Vec4::new(x.z, self.up.z, z.z, 0.0),
            Vec4::W,
        );
        rotation * Mat4::from_translation(-self.origin)
    }

    // Repeated rotations drift; keep forward/up unit length and perpendicular.
    fn orthonormalize(&mut self) {
        self.forward = self.forward.normalize_or(Vec3::NEG_Z);
        let x = self.up.cross(self.forward).normalize_or(Vec3::X);
        self.up = self.forward.cross(x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_camera_matrix_is_identity() {
        assert!(Frame::new().camera_matrix().abs_diff_eq(Mat4::IDENTITY, EPS));
    }

    #[test]
    fn default_model_matrix_faces_negative_z() {
        // Local +Z maps to forward (-Z), local +X to up × forward (-X).
        let m = Frame::new().matrix();
        assert!(m.transform_vector3(Vec3::Z).abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(m.transform_vector3(Vec3::X).abs_diff_eq(Vec3::NEG_X, EPS));
        assert!(m.transform_vector3(Vec3::Y).abs_diff_eq(Vec3::Y, EPS));
    }

    #[test]
    fn move_forward_backs_camera_away() {
        let mut cam = Frame::new();
        cam.move_forward(-30.0);
        assert!(cam.origin().abs_diff_eq(Vec3::new(0.0, 0.0, 30.0), EPS));

        // A point at the world origin ends up 30 units in front of the eye.
        let p = cam.camera_matrix().transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -30.0), EPS));
    }

    #[test]
    fn rotate_world_quarter_turn_about_y() {
        let mut f = Frame::new();
        f.rotate_world(FRAC_PI_2, Vec3::Y);
        assert!(f.forward().abs_diff_eq(Vec3::NEG_X, EPS));
        assert!(f.up().abs_diff_eq(Vec3::Y, EPS));
    }

    #[test]
    fn rotate_world_keeps_axes_orthonormal() {
        let mut f = Frame::new();
        for i in 0..500 {
            let axis = if i % 2 == 0 { Vec3::X } else { Vec3::Y };
            f.rotate_world(5f32.to_radians(), axis);
        }
        assert!((f.forward().length() - 1.0).abs() < EPS);
        assert!((f.up().length() - 1.0).abs() < EPS);
        assert!(f.forward().dot(f.up()).abs() < EPS);
    }

    #[test]
    fn rotate_world_with_zero_axis_is_noop() {
        let mut f = Frame::new();
        f.rotate_world(1.0, Vec3::ZERO);
        assert_eq!(f, Frame::new());
    }

    #[test]
    fn camera_matrix_inverts_model_matrix_rotation() {
        let mut f = Frame::at(Vec3::new(1.0, 2.0, 3.0));
        f.rotate_world(0.7, Vec3::new(1.0, 1.0, 0.0));
        // The camera looks down -Z in eye space: forward must map there.
        let fwd_eye = f.camera_matrix().transform_vector3(f.forward());
        assert!(fwd_eye.abs_diff_eq(Vec3::NEG_Z, EPS));
        // The frame origin is the eye position.
        let eye = f.camera_matrix().transform_point3(f.origin());
        assert!(eye.abs_diff_eq(Vec3::ZERO, EPS));
    }
}
