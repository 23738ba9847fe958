use super::{BatchError, Vertex};

/// Indexed triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleBatch {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl TriangleBatch {
    /// Validates and wraps an indexed triangle list.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self, BatchError> {
        if vertices.is_empty() || indices.is_empty() {
            return Err(BatchError::Empty);
        }
        if indices.len() % 3 != 0 {
            return Err(BatchError::PartialTriangle { index_count: indices.len() });
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(BatchError::IndexOutOfRange { index, vertex_count: vertices.len() });
        }
        Ok(Self { vertices, indices })
    }

    /// Wraps mesh data produced by a generator in this module.
    pub(crate) fn from_generated(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        debug_assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        Self { vertices, indices }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
