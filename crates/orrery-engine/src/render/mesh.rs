use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::geometry::{unique_edges, Batch, TriangleBatch, Vertex};
use crate::render::RenderCtx;

/// One stroke segment; a point is a segment with `a == b`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct SegmentInstance {
    pub a: [f32; 3],
    pub b: [f32; 3],
}

impl SegmentInstance {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        1 => Float32x3, // a
        2 => Float32x3  // b
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SegmentInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

pub(crate) fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x2  // tex_coord
    ];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

// ── quad used to expand stroke segments ──────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct QuadVertex {
    pub corner: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(crate) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { corner: [0.0, 0.0] },
    QuadVertex { corner: [1.0, 0.0] },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex { corner: [0.0, 1.0] },
];

pub(crate) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// CPU-side mesh data expanded into what the GPU can draw directly.
#[derive(Debug, Clone)]
pub struct MeshData {
    label: String,
    vertices: Vec<Vertex>,
    /// Triangle-list indices for fills.
    indices: Vec<u32>,
    /// Segments for strokes: points, lines or unique triangle edges.
    segments: Vec<SegmentInstance>,
}

impl MeshData {
    pub fn from_batch(label: impl Into<String>, batch: &Batch) -> Self {
        let vertices = batch.vertices().to_vec();
        let segments = if batch.kind().is_points() {
            vertices
                .iter()
                .map(|v| SegmentInstance { a: v.position, b: v.position })
                .collect()
        } else {
            segment_instances(&vertices, &batch.outline_segments())
        };

        Self {
            label: label.into(),
            indices: batch.triangle_indices(),
            vertices,
            segments,
        }
    }

    pub fn from_triangles(label: impl Into<String>, batch: &TriangleBatch) -> Self {
        let vertices = batch.vertices().to_vec();
        let segments = segment_instances(&vertices, &unique_edges(batch.indices()));
        Self {
            label: label.into(),
            indices: batch.indices().to_vec(),
            vertices,
            segments,
        }
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Indices drawn by a fill; zero for point and line meshes.
    #[inline]
    pub fn fill_index_count(&self) -> usize {
        self.indices.len()
    }

    /// Segments drawn by a stroke.
    #[inline]
    pub fn stroke_segment_count(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn upload(&self, ctx: &RenderCtx<'_>) -> GpuMesh {
        let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&self.label),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = (!self.indices.is_empty()).then(|| {
            ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&self.label),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let segment_buffer = (!self.segments.is_empty()).then(|| {
            ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&self.label),
                contents: bytemuck::cast_slice(&self.segments),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: self.indices.len() as u32,
            segment_buffer,
            segment_count: self.segments.len() as u32,
        }
    }
}

fn segment_instances(vertices: &[Vertex], pairs: &[[u32; 2]]) -> Vec<SegmentInstance> {
    pairs
        .iter()
        .filter_map(|&[a, b]| {
            let a = vertices.get(a as usize)?;
            let b = vertices.get(b as usize)?;
            Some(SegmentInstance { a: a.position, b: b.position })
        })
        .collect()
}

/// GPU buffers for one mesh.
pub(crate) struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
    pub index_count: u32,
    pub segment_buffer: Option<wgpu::Buffer>,
    pub segment_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{make_sphere, PrimitiveKind};
    use glam::Vec3;

    fn positions(n: usize) -> Vec<Vec3> {
        (0..n).map(|i| Vec3::new(i as f32, (i * i) as f32, 0.0)).collect()
    }

    #[test]
    fn point_batch_strokes_each_vertex() {
        let batch = Batch::from_positions(PrimitiveKind::Points, &positions(3)).unwrap();
        let mesh = MeshData::from_batch("points", &batch);
        assert_eq!(mesh.fill_index_count(), 0);
        assert_eq!(mesh.stroke_segment_count(), 3);
        assert!(mesh.segments.iter().all(|s| s.a == s.b));
    }

    #[test]
    fn line_loop_closes() {
        let batch = Batch::from_positions(PrimitiveKind::LineLoop, &positions(3)).unwrap();
        let mesh = MeshData::from_batch("loop", &batch);
        assert_eq!(mesh.stroke_segment_count(), 3);
        assert_eq!(mesh.segments[2].b, mesh.segments[0].a);
    }

    #[test]
    fn fan_fills_and_outlines() {
        let batch = Batch::from_positions(PrimitiveKind::TriangleFan, &positions(6)).unwrap();
        let mesh = MeshData::from_batch("fan", &batch);
        assert_eq!(mesh.fill_index_count(), 12);
        assert_eq!(mesh.stroke_segment_count(), 9);
    }

    #[test]
    fn sphere_keeps_its_indices() {
        let sphere = make_sphere(0.1, 28, 14);
        let mesh = MeshData::from_triangles("moon", &sphere);
        assert_eq!(mesh.fill_index_count(), 6 * 28 * 14);
        assert_eq!(mesh.vertex_count(), 15 * 29);
    }
}
