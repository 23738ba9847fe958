use std::collections::HashSet;

/// How a sequence of vertices is assembled into primitives.
///
/// wgpu only rasterizes lists and strips, so fans and loops are expanded on
/// the CPU into triangle lists and segment lists respectively.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PrimitiveKind {
    Points,
    /// Independent segments from vertex pairs; a trailing odd vertex is ignored.
    Lines,
    LineStrip,
    /// Line strip closed back to the first vertex.
    LineLoop,
    Triangles,
    /// Triangles sharing the first vertex.
    TriangleFan,
    /// Triangles sharing the previous two vertices.
    TriangleStrip,
}

impl PrimitiveKind {
    #[inline]
    pub fn is_points(self) -> bool {
        matches!(self, Self::Points)
    }

    #[inline]
    pub fn is_lines(self) -> bool {
        matches!(self, Self::Lines | Self::LineStrip | Self::LineLoop)
    }

    #[inline]
    pub fn is_triangles(self) -> bool {
        matches!(self, Self::Triangles | Self::TriangleFan | Self::TriangleStrip)
    }

    /// Expands `count` vertices into triangle-list indices.
    ///
    /// Non-triangle kinds produce no triangles. Strip winding alternates so
    /// every triangle keeps the orientation of the first one.
    pub fn triangle_indices(self, count: usize) -> Vec<u32> {
        let count = count as u32;
        let mut out = Vec::new();
        match self {
            Self::Triangles => {
                out.extend(0..(count / 3) * 3);
            }
            Self::TriangleFan => {
                for i in 1..count.saturating_sub(1) {
                    out.extend_from_slice(&[0, i, i + 1]);
                }
            }
            Self::TriangleStrip => {
                for i in 0..count.saturating_sub(2) {
                    if i % 2 == 0 {
                        out.extend_from_slice(&[i, i + 1, i + 2]);
                    } else {
                        out.extend_from_slice(&[i + 1, i, i + 2]);
                    }
                }
            }
            Self::Points | Self::Lines | Self::LineStrip | Self::LineLoop => {}
        }
        out
    }

    /// Segments drawn for line kinds, as vertex index pairs.
    pub fn line_segments(self, count: usize) -> Vec<[u32; 2]> {
        let count = count as u32;
        match self {
            Self::Lines => (0..count / 2).map(|i| [2 * i, 2 * i + 1]).collect(),
            Self::LineStrip => (1..count).map(|i| [i - 1, i]).collect(),
            Self::LineLoop => {
                let mut segs: Vec<[u32; 2]> = (1..count).map(|i| [i - 1, i]).collect();
                if count > 2 {
                    segs.push([count - 1, 0]);
                }
                segs
            }
            _ => Vec::new(),
        }
    }

    /// Outline of the primitive as unique segments.
    ///
    /// Triangle kinds yield every triangle edge once (shared edges are
    /// deduplicated); line kinds yield their segments; points yield nothing.
    pub fn outline_segments(self, count: usize) -> Vec<[u32; 2]> {
        if !self.is_triangles() {
            return self.line_segments(count);
        }

        unique_edges(&self.triangle_indices(count))
    }
}

/// Edges of a triangle list, each shared edge reported once in first-seen order.
pub fn unique_edges(indices: &[u32]) -> Vec<[u32; 2]> {
    let mut seen: HashSet<(u32, u32)> = HashSet::new();
    let mut out = Vec::new();
    for tri in indices.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let key = if a < b { (a, b) } else { (b, a) };
            if seen.insert(key) {
                out.push([a, b]);
            }
        }
    }
    out
}
