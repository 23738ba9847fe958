use wgpu::util::DeviceExt;

use crate::geometry::{Batch, TriangleBatch};
use crate::render::mesh::{GpuMesh, MeshData, QUAD_INDICES, QUAD_VERTICES};
use crate::render::pipeline::{PipelineCache, PipelineKey, Program};
use crate::render::texture::TextureBank;
use crate::render::uniform::{DrawUniform, UniformArena};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList, MeshId, RasterState, StockShader, TextureId};

struct MeshEntry {
    data: MeshData,
    gpu: Option<GpuMesh>,
}

#[derive(Debug, Copy, Clone)]
enum DrawKind {
    Fill,
    Stroke,
}

#[derive(Debug, Copy, Clone)]
struct PlannedDraw {
    kind: DrawKind,
    key: PipelineKey,
    mesh: MeshId,
    texture: Option<TextureId>,
    uniform: usize,
}

/// Draws a [`DrawList`] with the stock programs.
///
/// Meshes and textures are registered on the CPU side at any time and
/// uploaded on the first `render` that needs them. Pipelines are built lazily
/// per program and raster state.
#[derive(Default)]
pub struct SceneRenderer {
    meshes: Vec<MeshEntry>,
    textures: TextureBank,
    pipelines: PipelineCache,
    uniforms: UniformArena,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    warned_unknown_mesh: bool,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a vertex batch; fills use its triangles, strokes its outline.
    pub fn add_batch(&mut self, label: &str, batch: &Batch) -> MeshId {
        self.push_mesh(MeshData::from_batch(label, batch))
    }

    pub fn add_triangle_batch(&mut self, label: &str, batch: &TriangleBatch) -> MeshId {
        self.push_mesh(MeshData::from_triangles(label, batch))
    }

    fn push_mesh(&mut self, data: MeshData) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        log::debug!(
            "mesh '{}' registered: {} vertices, {} fill indices, {} stroke segments",
            data.label(),
            data.vertex_count(),
            data.fill_index_count(),
            data.stroke_segment_count()
        );
        self.meshes.push(MeshEntry { data, gpu: None });
        id
    }

    pub fn mesh(&self, id: MeshId) -> Option<&MeshData> {
        self.meshes.get(id.index()).map(|m| &m.data)
    }

    pub fn textures(&self) -> &TextureBank {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureBank {
        &mut self.textures
    }

    /// Renders `draw_list` into `target` on top of its current contents.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) {
        if self.pipelines.ensure_layouts(ctx) {
            self.textures.invalidate();
            self.uniforms.invalidate();
        }
        self.ensure_static_buffers(ctx);

        let (plan, uniforms) = self.plan(ctx, draw_list);
        if plan.is_empty() {
            return;
        }

        // Mutating methods must happen before borrowing pipelines/buffers immutably.
        for draw in &plan {
            self.pipelines.ensure(ctx, draw.key);
            let entry = &mut self.meshes[draw.mesh.index()];
            if entry.gpu.is_none() {
                entry.gpu = Some(entry.data.upload(ctx));
            }
        }
        let Some(layouts) = self.pipelines.layouts() else { return };
        self.textures.prepare(ctx, &layouts.texture);
        self.uniforms.upload(ctx, &layouts.uniforms, &uniforms);

        let Some(uniform_bg) = self.uniforms.bind_group() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        let depth_stencil_attachment =
            target.depth_view.map(|view| wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            });

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("orrery scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for draw in &plan {
            let Some(pipeline) = self.pipelines.get(&draw.key) else { continue };
            let Some(mesh) = self.meshes[draw.mesh.index()].gpu.as_ref() else { continue };
            let Some(texture_bg) = self.textures.bind_group(draw.texture) else { continue };

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, uniform_bg, &[self.uniforms.offset(draw.uniform)]);
            rpass.set_bind_group(1, texture_bg, &[]);

            match draw.kind {
                DrawKind::Fill => {
                    let Some(ibo) = mesh.index_buffer.as_ref() else { continue };
                    rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
                DrawKind::Stroke => {
                    let Some(segments) = mesh.segment_buffer.as_ref() else { continue };
                    rpass.set_vertex_buffer(0, quad_vbo.slice(..));
                    rpass.set_vertex_buffer(1, segments.slice(..));
                    rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
                    rpass.draw_indexed(0..6, 0, 0..mesh.segment_count);
                }
            }
        }
    }

    /// Resolves draw commands into pipeline keys and uniform blocks.
    ///
    /// Draws that would produce nothing (fills of line meshes, strokes of
    /// empty outlines, unknown meshes) are dropped here.
    fn plan(&mut self, ctx: &RenderCtx<'_>, draw_list: &DrawList) -> (Vec<PlannedDraw>, Vec<DrawUniform>) {
        let viewport = ctx.physical_viewport();
        let format = ctx.surface_format;
        let mut plan = Vec::with_capacity(draw_list.len());
        let mut uniforms = Vec::with_capacity(draw_list.len());

        for item in draw_list.items() {
            let mesh_id = match &item.cmd {
                DrawCmd::Fill(f) => f.mesh,
                DrawCmd::Stroke(s) => s.mesh,
            };
            let Some(entry) = self.meshes.get(mesh_id.index()) else {
                if !self.warned_unknown_mesh {
                    log::warn!("SceneRenderer: draw references unknown mesh {}", mesh_id.index());
                    self.warned_unknown_mesh = true;
                }
                continue;
            };

            match &item.cmd {
                DrawCmd::Fill(cmd) => {
                    if entry.data.fill_index_count() == 0 {
                        continue;
                    }
                    uniforms.push(fill_uniform(&cmd.shader, format));
                    plan.push(PlannedDraw {
                        kind: DrawKind::Fill,
                        key: PipelineKey { program: Program::for_shader(&cmd.shader), state: cmd.state },
                        mesh: cmd.mesh,
                        texture: cmd.shader.texture(),
                        uniform: uniforms.len() - 1,
                    });
                }
                DrawCmd::Stroke(cmd) => {
                    if entry.data.stroke_segment_count() == 0 {
                        continue;
                    }
                    let mut u = DrawUniform::new(cmd.mvp, cmd.color.encoded_for(format).to_array());
                    u.stroke = [
                        viewport.width.max(1.0),
                        viewport.height.max(1.0),
                        cmd.width * ctx.scale_factor,
                        cmd.depth_offset,
                    ];
                    uniforms.push(u);
                    plan.push(PlannedDraw {
                        kind: DrawKind::Stroke,
                        key: PipelineKey { program: Program::Stroke, state: RasterState::default() },
                        mesh: cmd.mesh,
                        texture: None,
                        uniform: uniforms.len() - 1,
                    });
                }
            }
        }

        (plan, uniforms)
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery stroke quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orrery stroke quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

fn fill_uniform(shader: &StockShader, format: wgpu::TextureFormat) -> DrawUniform {
    match *shader {
        StockShader::Flat { mvp, color } => DrawUniform::new(mvp, color.encoded_for(format).to_array()),
        StockShader::TextureModulate { mvp, color, .. } => {
            DrawUniform::new(mvp, color.encoded_for(format).to_array())
        }
        StockShader::TexturePointLightDiffuse { model_view, projection, light_position, color, .. } => {
            let mut u = DrawUniform::new(projection * model_view, color.encoded_for(format).to_array());
            u.model_view = model_view.to_cols_array_2d();
            u.light_position = light_position.extend(1.0).to_array();
            u
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{make_sphere, PrimitiveKind};
    use crate::paint::Color;
    use glam::{Mat4, Vec3};

    #[test]
    fn meshes_get_sequential_ids() {
        let mut r = SceneRenderer::new();
        let tri = Batch::from_positions(PrimitiveKind::Triangles, &[Vec3::ZERO, Vec3::X, Vec3::Y])
            .unwrap();
        let a = r.add_batch("tri", &tri);
        let b = r.add_triangle_batch("sphere", &make_sphere(1.0, 8, 4));
        assert_eq!((a.index(), b.index()), (0, 1));
        assert_eq!(r.mesh(b).map(|m| m.label()), Some("sphere"));
    }

    #[test]
    fn point_light_uniform_combines_projection_and_model_view() {
        let model_view = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
        let projection = Mat4::perspective_rh(0.7, 1.5, 1.0, 500.0);
        let u = fill_uniform(&StockShader::TexturePointLightDiffuse {
            model_view,
            projection,
            light_position: Vec3::new(3.0, 0.0, 3.0),
            color: Color::WHITE,
            texture: TextureId(0),
        }, wgpu::TextureFormat::Bgra8Unorm);
        assert_eq!(u.mvp, (projection * model_view).to_cols_array_2d());
        assert_eq!(u.model_view, model_view.to_cols_array_2d());
        assert_eq!(u.light_position, [3.0, 0.0, 3.0, 1.0]);
    }

    #[test]
    fn flat_fill_color_is_uploaded_as_recorded_on_unorm_target() {
        let color = Color::new(0.9, 0.2, 0.2, 1.0);
        let u = fill_uniform(
            &StockShader::Flat { mvp: Mat4::IDENTITY, color },
            wgpu::TextureFormat::Bgra8Unorm,
        );
        assert_eq!(u.color, color.to_array());

        let srgb = fill_uniform(
            &StockShader::Flat { mvp: Mat4::IDENTITY, color },
            wgpu::TextureFormat::Bgra8UnormSrgb,
        );
        assert!(srgb.color[1] < color.g);
        assert_eq!(srgb.color[3], 1.0);
    }
}
