//! Integration tests across geometry, math, scene recording and textures.
//!
//! Everything here runs on the CPU; no window or GPU device is created.

use glam::{Mat4, Vec3};

use orrery_engine::assets::AssetLocator;
use orrery_engine::geometry::{make_sphere, Batch, PrimitiveKind};
use orrery_engine::math::{Frame, Frustum, GeometryTransform};
use orrery_engine::paint::Color;
use orrery_engine::render::{MagFilter, MinFilter, SceneRenderer, TextureParams, Wrap};
use orrery_engine::scene::{DrawList, RasterState, StockShader, TextureId, Winding};

const EPS: f32 = 1e-4;

fn hexagon() -> Vec<Vec3> {
    (0..6)
        .map(|i| {
            let a = i as f32 * std::f32::consts::TAU / 6.0;
            Vec3::new(a.cos(), a.sin(), 0.0)
        })
        .collect()
}

// --- Batches registered with the renderer ---

mod batch_meshes {
    use super::*;

    #[test]
    fn every_primitive_kind_yields_expected_fill_and_stroke() {
        // (kind, fill indices, stroke segments) for six vertices.
        let expected = [
            (PrimitiveKind::Points, 0, 6),
            (PrimitiveKind::Lines, 0, 3),
            (PrimitiveKind::LineStrip, 0, 5),
            (PrimitiveKind::LineLoop, 0, 6),
            (PrimitiveKind::Triangles, 6, 6),
            (PrimitiveKind::TriangleFan, 12, 9),
            (PrimitiveKind::TriangleStrip, 12, 9),
        ];

        let mut renderer = SceneRenderer::new();
        for (kind, fill, stroke) in expected {
            let batch = Batch::from_positions(kind, &hexagon()).unwrap();
            let id = renderer.add_batch("hexagon", &batch);
            let mesh = renderer.mesh(id).unwrap();
            assert_eq!(mesh.vertex_count(), 6, "{kind:?}");
            assert_eq!(mesh.fill_index_count(), fill, "{kind:?}");
            assert_eq!(mesh.stroke_segment_count(), stroke, "{kind:?}");
        }
    }

    #[test]
    fn sphere_outline_shares_edges() {
        let mut renderer = SceneRenderer::new();
        let sphere = make_sphere(0.1, 8, 4);
        let id = renderer.add_triangle_batch("sphere", &sphere);
        let mesh = renderer.mesh(id).unwrap();
        assert_eq!(mesh.fill_index_count(), sphere.triangle_count() * 3);
        // Each triangle edge is shared, so there are fewer segments than 3 per triangle.
        assert!(mesh.stroke_segment_count() < sphere.triangle_count() * 3);
    }
}

// --- Camera, matrix stack and draw list together ---

mod mirrored_recording {
    use super::*;

    fn centre(shader: &StockShader) -> Vec3 {
        match shader {
            StockShader::TexturePointLightDiffuse { model_view, .. } => {
                model_view.transform_point3(Vec3::ZERO)
            }
            other => panic!("unexpected shader {other:?}"),
        }
    }

    fn lit(model_view: Mat4, projection: Mat4, texture: TextureId) -> StockShader {
        StockShader::TexturePointLightDiffuse {
            model_view,
            projection,
            light_position: Vec3::new(3.0, 0.0, 3.0),
            color: Color::WHITE,
            texture,
        }
    }

    #[test]
    fn reflection_mirrors_below_floor_and_restores_stack() {
        let mut renderer = SceneRenderer::new();
        let sphere = renderer.add_triangle_batch("sphere", &make_sphere(0.5, 12, 6));
        let texture = renderer.textures_mut().add_slot("earth");

        let mut t = GeometryTransform::new();
        t.reshape(&Frustum::perspective(40.0, 1.5, 1.0, 500.0));
        let projection = t.projection_matrix();
        let camera = Frame::new();

        let mut list = DrawList::new();
        let mv = &mut t.model_view;
        mv.push().unwrap();
        mv.mult_matrix(camera.camera_matrix());

        mv.scoped(|mv| {
            mv.scale(1.0, -1.0, 1.0);
            mv.translate(0.0, 0.8, 0.0);
            mv.translate(0.0, 0.2, -2.5);
            let state = RasterState { front_face: Winding::Cw, ..Default::default() };
            list.fill(sphere, lit(mv.top(), projection, texture), state);
        })
        .unwrap();

        mv.translate(0.0, 0.2, -2.5);
        list.fill(sphere, lit(mv.top(), projection, texture), RasterState::default());
        mv.pop().unwrap();

        let fills: Vec<_> = list.fills().collect();
        assert_eq!(fills.len(), 2);
        assert!(centre(&fills[0].shader).abs_diff_eq(Vec3::new(0.0, -1.0, -2.5), EPS));
        assert!(centre(&fills[1].shader).abs_diff_eq(Vec3::new(0.0, 0.2, -2.5), EPS));
        assert_eq!(fills[0].state.front_face, Winding::Cw);
        assert_eq!(t.model_view.depth(), 1);
        assert_eq!(t.model_view_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn camera_backed_away_keeps_origin_in_view() {
        let mut t = GeometryTransform::new();
        t.reshape(&Frustum::perspective(40.0, 800.0 / 600.0, 1.0, 500.0));
        let mut camera = Frame::new();
        camera.move_forward(-30.0);
        t.model_view.mult_matrix(camera.camera_matrix());

        let ndc = t.model_view_projection().project_point3(Vec3::ZERO);
        assert!(ndc.x.abs() < EPS && ndc.y.abs() < EPS);
        assert!((0.0..1.0).contains(&ndc.z));
    }
}

// --- Asset lookup feeding the texture bank ---

mod texture_loading {
    use super::*;

    const PARAMS: TextureParams = TextureParams {
        min_filter: MinFilter::LinearMipmapLinear,
        mag_filter: MagFilter::Linear,
        wrap: Wrap::Repeat,
    };

    #[test]
    fn located_file_loads_into_renderer_slot() {
        let dir = std::env::temp_dir().join("orrery-engine-it-assets");
        std::fs::create_dir_all(&dir).unwrap();
        image::RgbaImage::from_pixel(16, 8, image::Rgba([0, 64, 128, 255]))
            .save(dir.join("water.png"))
            .unwrap();

        let locator = AssetLocator { override_dir: Some(dir.clone()), exe_dir: None };
        let mut renderer = SceneRenderer::new();
        let slot = renderer.textures_mut().add_slot("floor");
        renderer
            .textures_mut()
            .load(slot, &locator.resolve("water.png"), PARAMS)
            .unwrap();
        let _ = std::fs::remove_dir_all(&dir);

        let img = renderer.textures().image(slot).unwrap();
        assert_eq!((img.width(), img.height()), (16, 8));
        assert_eq!(img.mip_count(), 5);

        let fitted = img.fit_within(4).unwrap();
        assert_eq!((fitted.width(), fitted.height()), (4, 2));
        assert_eq!(fitted.mip_count(), 3);
    }

    #[test]
    fn missing_file_leaves_slot_unloaded() {
        let locator = AssetLocator {
            override_dir: Some(std::env::temp_dir().join("orrery-engine-it-none")),
            exe_dir: None,
        };
        let mut renderer = SceneRenderer::new();
        let slot = renderer.textures_mut().add_slot("earth");
        assert!(renderer
            .textures_mut()
            .load(slot, &locator.resolve("earth.bmp"), PARAMS)
            .is_err());
        assert!(!renderer.textures().is_loaded(slot));
    }
}
