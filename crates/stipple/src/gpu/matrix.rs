use core::ops::{Deref, DerefMut};

use crate::coords::{Mat4, Vec2};

/// Model-matrix stack operations a host exposes to presets.
///
/// Transforms post-multiply the current matrix, so the last transform issued
/// is the first one applied to vertices.
pub trait MatrixStack {
    /// Saves the current model matrix.
    fn push(&mut self);

    /// Restores the most recently saved model matrix.
    fn pop(&mut self);

    fn translate(&mut self, offset: Vec2);

    fn scale(&mut self, factors: Vec2);

    fn scale_uniform(&mut self, factor: f32) {
        self.scale(Vec2::splat(factor));
    }

    /// Number of saved matrices.
    fn depth(&self) -> usize;

    fn model_matrix(&self) -> Mat4;
}

/// CPU model-matrix stack.
#[derive(Debug, Clone, Default)]
pub struct ModelStack {
    current: Mat4,
    saved: Vec<Mat4>,
}

impl ModelStack {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all saved matrices and resets the current one to identity.
    pub fn reset(&mut self) {
        self.current = Mat4::IDENTITY;
        self.saved.clear();
    }
}

impl MatrixStack for ModelStack {
    #[inline]
    fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// # Panics
    /// Panics (debug only) if called without a matching `push`.
    #[inline]
    fn pop(&mut self) {
        debug_assert!(!self.saved.is_empty(), "pop called without matching push");
        if let Some(m) = self.saved.pop() {
            self.current = m;
        }
    }

    #[inline]
    fn translate(&mut self, offset: Vec2) {
        self.current = self.current * Mat4::translation(offset);
    }

    #[inline]
    fn scale(&mut self, factors: Vec2) {
        self.current = self.current * Mat4::scale(factors);
    }

    #[inline]
    fn depth(&self) -> usize {
        self.saved.len()
    }

    #[inline]
    fn model_matrix(&self) -> Mat4 {
        self.current
    }
}

/// Scoped push/pop around a [`MatrixStack`].
///
/// Pushes on creation and pops when dropped, so the stack is restored on
/// every exit path including `?` returns and unwinding.
pub struct MatrixScope<'a, M: MatrixStack + ?Sized> {
    stack: &'a mut M,
}

impl<'a, M: MatrixStack + ?Sized> MatrixScope<'a, M> {
    #[inline]
    pub fn new(stack: &'a mut M) -> Self {
        stack.push();
        Self { stack }
    }
}

impl<M: MatrixStack + ?Sized> Deref for MatrixScope<'_, M> {
    type Target = M;

    #[inline]
    fn deref(&self) -> &M {
        self.stack
    }
}

impl<M: MatrixStack + ?Sized> DerefMut for MatrixScope<'_, M> {
    #[inline]
    fn deref_mut(&mut self) -> &mut M {
        self.stack
    }
}

impl<M: MatrixStack + ?Sized> Drop for MatrixScope<'_, M> {
    #[inline]
    fn drop(&mut self) {
        self.stack.pop();
    }
}

/// Opens a [`MatrixScope`] on `stack`.
#[inline]
pub fn push_pop<M: MatrixStack + ?Sized>(stack: &mut M) -> MatrixScope<'_, M> {
    MatrixScope::new(stack)
}
