use std::fmt;

use glam::{Vec2, Vec3};

use super::{PrimitiveKind, Vertex};

/// Error finishing a [`BatchBuilder`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BatchError {
    /// No vertices were declared.
    Empty,
    /// The number of supplied vertices differs from the declared count.
    CountMismatch { declared: usize, supplied: usize },
    /// A triangle index refers past the end of the vertex list.
    IndexOutOfRange { index: u32, vertex_count: usize },
    /// The index list length is not a multiple of three.
    PartialTriangle { index_count: usize },
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "batch declares no vertices"),
            Self::CountMismatch { declared, supplied } => {
                write!(f, "batch declared {declared} vertices but {supplied} were supplied")
            }
            Self::IndexOutOfRange { index, vertex_count } => {
                write!(f, "index {index} out of range for {vertex_count} vertices")
            }
            Self::PartialTriangle { index_count } => {
                write!(f, "{index_count} indices do not form whole triangles")
            }
        }
    }
}

impl std::error::Error for BatchError {}

/// Immutable vertex sequence drawn with a single primitive kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    kind: PrimitiveKind,
    vertices: Vec<Vertex>,
}

impl Batch {
    /// Starts a batch that must receive exactly `vertex_count` vertices.
    pub fn begin(kind: PrimitiveKind, vertex_count: usize) -> BatchBuilder {
        BatchBuilder {
            kind,
            declared: vertex_count,
            vertices: Vec::with_capacity(vertex_count),
            normal: Vec3::Z,
            tex_coord: Vec2::ZERO,
        }
    }

    /// Builds a batch from bare positions.
    pub fn from_positions(kind: PrimitiveKind, positions: &[Vec3]) -> Result<Self, BatchError> {
        let mut b = Self::begin(kind, positions.len());
        b.copy_vertex_data(positions);
        b.end()
    }

    #[inline]
    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Triangle-list indices for filled kinds; empty otherwise.
    pub fn triangle_indices(&self) -> Vec<u32> {
        self.kind.triangle_indices(self.vertices.len())
    }

    /// Unique outline segments (see [`PrimitiveKind::outline_segments`]).
    pub fn outline_segments(&self) -> Vec<[u32; 2]> {
        self.kind.outline_segments(self.vertices.len())
    }
}

/// Accumulates vertices for a [`Batch`].
///
/// Attributes set with [`normal`](Self::normal) and
/// [`tex_coord`](Self::tex_coord) apply to every following
/// [`vertex`](Self::vertex) call.
#[derive(Debug)]
pub struct BatchBuilder {
    kind: PrimitiveKind,
    declared: usize,
    vertices: Vec<Vertex>,
    normal: Vec3,
    tex_coord: Vec2,
}

impl BatchBuilder {
    /// Replaces vertex positions from a packed array.
    ///
    /// Positions beyond the declared count are ignored.
    pub fn copy_vertex_data(&mut self, positions: &[Vec3]) {
        let n = positions.len().min(self.declared);
        for (i, p) in positions[..n].iter().enumerate() {
            match self.vertices.get_mut(i) {
                Some(v) => v.position = p.to_array(),
                None => self.vertices.push(Vertex::new(*p, self.normal, self.tex_coord)),
            }
        }
    }

    pub fn normal(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.normal = Vec3::new(x, y, z);
        self
    }

    pub fn tex_coord(&mut self, s: f32, t: f32) -> &mut Self {
        self.tex_coord = Vec2::new(s, t);
        self
    }

    /// Appends a vertex using the current normal and texture coordinate.
    pub fn vertex(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.vertices
            .push(Vertex::new(Vec3::new(x, y, z), self.normal, self.tex_coord));
        self
    }

    #[inline]
    pub fn supplied(&self) -> usize {
        self.vertices.len()
    }

    /// Finishes the batch. Fails unless exactly the declared number of
    /// vertices was supplied.
    pub fn end(self) -> Result<Batch, BatchError> {
        if self.declared == 0 {
            return Err(BatchError::Empty);
        }
        if self.vertices.len() != self.declared {
            return Err(BatchError::CountMismatch {
                declared: self.declared,
                supplied: self.vertices.len(),
            });
        }
        Ok(Batch { kind: self.kind, vertices: self.vertices })
    }
}
