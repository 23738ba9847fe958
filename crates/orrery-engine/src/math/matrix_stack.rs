use std::fmt;

use glam::{Mat4, Vec3};

use super::Frame;

/// Default maximum number of matrices a stack can hold.
pub const DEFAULT_STACK_DEPTH: usize = 64;

/// Misuse of a [`MatrixStack`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MatrixStackError {
    /// `push` would exceed the configured depth.
    Overflow { depth: usize },
    /// `pop` was called with only the base matrix left.
    Underflow,
}

impl fmt::Display for MatrixStackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow { depth } => write!(f, "matrix stack overflow (max depth {depth})"),
            Self::Underflow => write!(f, "matrix stack underflow"),
        }
    }
}

impl std::error::Error for MatrixStackError {}

/// Stack of 4×4 matrices with a mutable top.
///
/// The stack always holds at least one matrix; a new stack starts with the
/// identity. Transform helpers post-multiply the top, so the last transform
/// applied is the first one a vertex sees.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    stack: Vec<Mat4>,
    max_depth: usize,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStack {
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_STACK_DEPTH)
    }

    /// Creates a stack holding at most `max_depth` matrices (minimum 1).
    pub fn with_depth(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        let mut stack = Vec::with_capacity(max_depth);
        stack.push(Mat4::IDENTITY);
        Self { stack, max_depth }
    }

    /// Current number of matrices on the stack.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the top matrix.
    #[inline]
    pub fn top(&self) -> Mat4 {
        // The base matrix is never popped.
        self.stack[self.stack.len() - 1]
    }

    #[inline]
    fn top_mut(&mut self) -> &mut Mat4 {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    pub fn load_identity(&mut self) {
        *self.top_mut() = Mat4::IDENTITY;
    }

    pub fn load_matrix(&mut self, m: Mat4) {
        *self.top_mut() = m;
    }

    /// `top = top * m`.
    pub fn mult_matrix(&mut self, m: Mat4) {
        let top = self.top_mut();
        *top *= m;
    }

    /// Multiplies the top by the model matrix of `frame`.
    pub fn mult_frame(&mut self, frame: &Frame) {
        self.mult_matrix(frame.matrix());
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.mult_matrix(Mat4::from_translation(Vec3::new(x, y, z)));
    }

    /// Rotates by `degrees` about `axis`. A zero-length axis is ignored.
    pub fn rotate(&mut self, degrees: f32, x: f32, y: f32, z: f32) {
        let Some(axis) = Vec3::new(x, y, z).try_normalize() else { return };
        self.mult_matrix(Mat4::from_axis_angle(axis, degrees.to_radians()));
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.mult_matrix(Mat4::from_scale(Vec3::new(x, y, z)));
    }

    /// Duplicates the top matrix.
    pub fn push(&mut self) -> Result<(), MatrixStackError> {
        self.push_matrix(self.top())
    }

    /// Pushes `m` as the new top.
    pub fn push_matrix(&mut self, m: Mat4) -> Result<(), MatrixStackError> {
        if self.stack.len() >= self.max_depth {
            return Err(MatrixStackError::Overflow { depth: self.max_depth });
        }
        self.stack.push(m);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<(), MatrixStackError> {
        if self.stack.len() <= 1 {
            return Err(MatrixStackError::Underflow);
        }
        self.stack.pop();
        Ok(())
    }

    /// Runs `f` between a `push` and a matching `pop`.
    pub fn scoped<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> R,
    ) -> Result<R, MatrixStackError> {
        self.push()?;
        let depth = self.depth();
        let out = f(self);
        // Unbalanced pushes inside `f` are unwound so the caller's top is restored.
        while self.depth() > depth {
            self.stack.pop();
        }
        self.pop()?;
        Ok(out)
    }
}
