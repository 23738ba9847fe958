use std::collections::HashMap;

use crate::render::mesh::{vertex_layout, QuadVertex, SegmentInstance};
use crate::render::uniform::DRAW_UNIFORM_SIZE;
use crate::render::RenderCtx;
use crate::scene::{BlendMode, RasterState, StockShader, Winding};

/// Shader program selected per draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) enum Program {
    Flat,
    TextureModulate,
    PointLightDiffuse,
    Stroke,
}

impl Program {
    pub(crate) fn for_shader(shader: &StockShader) -> Self {
        match shader {
            StockShader::Flat { .. } => Self::Flat,
            StockShader::TextureModulate { .. } => Self::TextureModulate,
            StockShader::TexturePointLightDiffuse { .. } => Self::PointLightDiffuse,
        }
    }

    fn entry_points(self) -> (&'static str, &'static str) {
        match self {
            Self::Flat => ("vs_flat", "fs_flat"),
            Self::TextureModulate => ("vs_texture", "fs_texture"),
            Self::PointLightDiffuse => ("vs_point_light", "fs_texture"),
            Self::Stroke => ("vs_stroke", "fs_flat"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) struct PipelineKey {
    pub program: Program,
    pub state: RasterState,
}

/// Bind group layouts shared by every stock pipeline.
pub(crate) struct Layouts {
    pub uniforms: wgpu::BindGroupLayout,
    pub texture: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
}

/// Lazily built render pipelines keyed by program and raster state.
#[derive(Default)]
pub(crate) struct PipelineCache {
    formats: Option<(wgpu::TextureFormat, Option<wgpu::TextureFormat>)>,
    shader: Option<wgpu::ShaderModule>,
    layouts: Option<Layouts>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
}

impl PipelineCache {
    /// Creates the shader and layouts; drops cached pipelines when target formats change.
    ///
    /// Returns `true` when the layouts were rebuilt, so bind groups made
    /// against the old ones must be recreated.
    pub(crate) fn ensure_layouts(&mut self, ctx: &RenderCtx<'_>) -> bool {
        let formats = (ctx.surface_format, ctx.depth_format);
        if self.formats == Some(formats) && self.layouts.is_some() {
            return false;
        }

        self.pipelines.clear();
        self.shader = Some(ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("orrery stock shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/stock.wgsl").into()),
        }));

        let uniforms = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("orrery uniforms bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(DRAW_UNIFORM_SIZE),
                },
                count: None,
            }],
        });

        let texture = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("orrery texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("orrery stock pipeline layout"),
            bind_group_layouts: &[&uniforms, &texture],
            immediate_size: 0,
        });

        self.layouts = Some(Layouts { uniforms, texture, pipeline_layout });
        self.formats = Some(formats);
        true
    }

    pub(crate) fn layouts(&self) -> Option<&Layouts> {
        self.layouts.as_ref()
    }

    pub(crate) fn ensure(&mut self, ctx: &RenderCtx<'_>, key: PipelineKey) {
        if self.pipelines.contains_key(&key) {
            return;
        }
        let (Some(shader), Some(layouts)) = (self.shader.as_ref(), self.layouts.as_ref()) else {
            return;
        };

        let (vs, fs) = key.program.entry_points();
        let stroke_buffers = [QuadVertex::layout(), SegmentInstance::layout()];
        let mesh_buffers = [vertex_layout()];
        let buffers: &[wgpu::VertexBufferLayout<'_>] = if key.program == Program::Stroke {
            &stroke_buffers
        } else {
            &mesh_buffers
        };

        let blend = match key.state.blend {
            BlendMode::Opaque => None,
            BlendMode::Alpha => Some(wgpu::BlendState::ALPHA_BLENDING),
        };

        let front_face = match key.state.front_face {
            Winding::Ccw => wgpu::FrontFace::Ccw,
            Winding::Cw => wgpu::FrontFace::Cw,
        };

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("orrery stock pipeline"),
            layout: Some(&layouts.pipeline_layout),

            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(vs),
                compilation_options: Default::default(),
                buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(fs),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face,
                cull_mode: key.state.cull_back.then_some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: ctx.depth_format.map(|format| wgpu::DepthStencilState {
                format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        log::debug!("built pipeline {:?}", key);
        self.pipelines.insert(key, pipeline);
    }

    pub(crate) fn get(&self, key: &PipelineKey) -> Option<&wgpu::RenderPipeline> {
        self.pipelines.get(key)
    }
}
