use glam::Mat4;

use super::{Frustum, MatrixStack};

/// Model-view and projection stacks used together to build shader matrices.
#[derive(Debug, Clone, Default)]
pub struct GeometryTransform {
    pub model_view: MatrixStack,
    pub projection: MatrixStack,
}

impl GeometryTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `frustum`'s projection into the projection stack and resets the
    /// model-view stack to identity.
    pub fn reshape(&mut self, frustum: &Frustum) {
        self.projection.load_matrix(frustum.projection());
        self.model_view.load_identity();
    }

    #[inline]
    pub fn model_view_matrix(&self) -> Mat4 {
        self.model_view.top()
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.top()
    }

    /// `projection * model_view`.
    #[inline]
    pub fn model_view_projection(&self) -> Mat4 {
        self.projection.top() * self.model_view.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn mvp_applies_model_view_first() {
        let mut t = GeometryTransform::new();
        t.reshape(&Frustum::perspective(40.0, 1.0, 1.0, 500.0));
        t.model_view.translate(0.0, 0.0, -10.0);
        let expected = t.projection_matrix() * Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(t.model_view_projection(), expected);
    }

    #[test]
    fn reshape_resets_model_view() {
        let mut t = GeometryTransform::new();
        t.model_view.scale(2.0, 2.0, 2.0);
        t.reshape(&Frustum::default());
        assert_eq!(t.model_view_matrix(), Mat4::IDENTITY);
    }
}
