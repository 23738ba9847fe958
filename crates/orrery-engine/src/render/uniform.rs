use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::render::RenderCtx;

/// Per-draw uniform block shared by every stock program.
///
/// Matches `DrawUniform` in `shaders/stock.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct DrawUniform {
    pub mvp: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// xyz = eye-space light position.
    pub light_position: [f32; 4],
    /// x, y = physical viewport size, z = stroke width (physical px), w = depth offset.
    pub stroke: [f32; 4],
}

impl DrawUniform {
    pub(crate) fn new(mvp: Mat4, color: [f32; 4]) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
            model_view: Mat4::IDENTITY.to_cols_array_2d(),
            color,
            light_position: [0.0; 4],
            stroke: [0.0; 4],
        }
    }
}

pub(crate) const DRAW_UNIFORM_SIZE: u64 = std::mem::size_of::<DrawUniform>() as u64;

fn align_up(value: u64, alignment: u64) -> u64 {
    let a = alignment.max(1);
    value.div_ceil(a) * a
}

/// Growable uniform buffer addressed with dynamic offsets, one slot per draw.
#[derive(Default)]
pub(crate) struct UniformArena {
    buffer: Option<wgpu::Buffer>,
    bind_group: Option<wgpu::BindGroup>,
    capacity: usize,
    stride: u64,
    staging: Vec<u8>,
}

impl UniformArena {
    /// Byte offset of slot `index`, valid after `upload`.
    #[inline]
    pub(crate) fn offset(&self, index: usize) -> u32 {
        (index as u64 * self.stride) as u32
    }

    pub(crate) fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.bind_group.as_ref()
    }

    /// Writes `uniforms` into consecutive aligned slots, growing the buffer if needed.
    pub(crate) fn upload(
        &mut self,
        ctx: &RenderCtx<'_>,
        layout: &wgpu::BindGroupLayout,
        uniforms: &[DrawUniform],
    ) {
        if uniforms.is_empty() {
            return;
        }

        let alignment = ctx.device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = align_up(DRAW_UNIFORM_SIZE, alignment);
        self.ensure_capacity(ctx, layout, uniforms.len(), stride);

        let Some(buffer) = self.buffer.as_ref() else { return };

        self.staging.clear();
        self.staging.resize(uniforms.len() * stride as usize, 0);
        for (i, u) in uniforms.iter().enumerate() {
            let start = i * stride as usize;
            self.staging[start..start + DRAW_UNIFORM_SIZE as usize]
                .copy_from_slice(bytemuck::bytes_of(u));
        }
        ctx.queue.write_buffer(buffer, 0, &self.staging);
    }

    fn ensure_capacity(
        &mut self,
        ctx: &RenderCtx<'_>,
        layout: &wgpu::BindGroupLayout,
        required: usize,
        stride: u64,
    ) {
        if required <= self.capacity && stride == self.stride && self.bind_group.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(64);
        let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("orrery draw uniforms"),
            size: new_cap as u64 * stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("orrery draw uniforms bind group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(DRAW_UNIFORM_SIZE),
                }),
            }],
        });

        self.buffer = Some(buffer);
        self.bind_group = Some(bind_group);
        self.capacity = new_cap;
        self.stride = stride;
    }

    pub(crate) fn invalidate(&mut self) {
        self.buffer = None;
        self.bind_group = None;
        self.capacity = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_is_wgsl_sized() {
        // Two mat4x4 plus three vec4.
        assert_eq!(DRAW_UNIFORM_SIZE, 176);
    }

    #[test]
    fn align_up_rounds_to_alignment() {
        assert_eq!(align_up(176, 256), 256);
        assert_eq!(align_up(256, 256), 256);
        assert_eq!(align_up(300, 256), 512);
        assert_eq!(align_up(176, 0), 176);
    }
}
