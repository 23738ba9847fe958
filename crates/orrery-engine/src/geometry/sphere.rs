use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::{TriangleBatch, Vertex};

/// Builds a UV sphere centred on the origin with its poles on the Z axis.
///
/// Stack `i` sits at polar angle `i·π/stacks` from +Z, slice `j` at azimuth
/// `j·2π/slices`. The seam column is duplicated so texture coordinates run
/// `u = 0..1` around and `v = 0..1` from the +Z pole to the -Z pole.
/// Triangles wind counter-clockwise seen from outside.
///
/// `slices` is clamped to at least 3 and `stacks` to at least 2.
pub fn make_sphere(radius: f32, slices: u32, stacks: u32) -> TriangleBatch {
    let slices = slices.max(3);
    let stacks = stacks.max(2);
    let columns = slices + 1;

    let mut vertices = Vec::with_capacity(((stacks + 1) * columns) as usize);
    for i in 0..=stacks {
        let rho = i as f32 * PI / stacks as f32;
        let (srho, crho) = rho.sin_cos();
        for j in 0..=slices {
            let theta = j as f32 * TAU / slices as f32;
            let (stheta, ctheta) = theta.sin_cos();
            let normal = Vec3::new(-stheta * srho, ctheta * srho, crho);
            let uv = Vec2::new(j as f32 / slices as f32, i as f32 / stacks as f32);
            vertices.push(Vertex::new(normal * radius, normal, uv));
        }
    }

    let mut indices = Vec::with_capacity((6 * slices * stacks) as usize);
    for i in 0..stacks {
        for j in 0..slices {
            let a = i * columns + j;
            let below = a + columns;
            indices.extend_from_slice(&[a, below, a + 1]);
            indices.extend_from_slice(&[below, below + 1, a + 1]);
        }
    }

    TriangleBatch::from_generated(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    // ── counts ────────────────────────────────────────────────────────────

    #[test]
    fn earth_sphere_counts() {
        let s = make_sphere(0.5, 50, 100);
        assert_eq!(s.vertex_count(), 101 * 51);
        assert_eq!(s.indices().len(), 6 * 50 * 100);
    }

    #[test]
    fn degenerate_resolution_is_clamped() {
        let s = make_sphere(1.0, 0, 0);
        assert_eq!(s.vertex_count(), 3 * 4);
    }

    // ── shape ─────────────────────────────────────────────────────────────

    #[test]
    fn normals_are_unit_and_positions_on_radius() {
        let s = make_sphere(0.1, 28, 14);
        for v in s.vertices() {
            assert!((v.normal().length() - 1.0).abs() < EPS);
            assert!((v.position().length() - 0.1).abs() < EPS);
        }
    }

    #[test]
    fn first_stack_is_north_pole() {
        let s = make_sphere(2.0, 8, 4);
        assert!(s.vertices()[0].position().abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), EPS));
        assert_eq!(s.vertices()[0].tex_coord, [0.0, 0.0]);
    }

    #[test]
    fn triangles_face_outward() {
        let s = make_sphere(1.0, 16, 8);
        let v = s.vertices();
        for tri in s.indices().chunks_exact(3) {
            let (a, b, c) = (
                v[tri[0] as usize].position(),
                v[tri[1] as usize].position(),
                v[tri[2] as usize].position(),
            );
            let n = (b - a).cross(c - a);
            // Pole triangles collapse to zero area.
            if n.length() < 1e-6 {
                continue;
            }
            assert!(n.dot(a + b + c) > 0.0);
        }
    }
}
