//! Procedural position-only meshes for the demo scene.

use std::f32::consts::{PI, TAU};

#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    fn push_vertex(&mut self, x: f32, y: f32, z: f32) {
        self.vertices.extend_from_slice(&[x, y, z]);
    }
}

/// UV sphere centered on the origin
pub fn sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let mut mesh = MeshData::default();

    for ring in 0..=rings {
        let phi = ring as f32 / rings as f32 * PI;
        for segment in 0..=segments {
            let theta = segment as f32 / segments as f32 * TAU;
            mesh.push_vertex(
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            );
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for segment in 0..segments {
            let a = ring * stride + segment;
            let b = a + stride;
            mesh.indices
                .extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }

    mesh
}

pub fn cube(half_extent: f32) -> MeshData {
    let h = half_extent;
    let mut mesh = MeshData::default();

    for (x, y, z) in [
        (-h, -h, -h),
        (h, -h, -h),
        (h, h, -h),
        (-h, h, -h),
        (-h, -h, h),
        (h, -h, h),
        (h, h, h),
        (-h, h, h),
    ] {
        mesh.push_vertex(x, y, z);
    }

    mesh.indices = vec![
        0, 2, 1, 0, 3, 2, // back
        4, 5, 6, 4, 6, 7, // front
        0, 4, 7, 0, 7, 3, // left
        1, 2, 6, 1, 6, 5, // right
        0, 1, 5, 0, 5, 4, // bottom
        3, 7, 6, 3, 6, 2, // top
    ];

    mesh
}

/// Floor grid on the y=0 plane. Lines are thin quads, since everything
/// shares one triangle-list pipeline
pub fn grid(size: f32, divisions: u32, line_width: f32) -> MeshData {
    let mut mesh = MeshData::default();
    let half = size / 2.0;
    let half_width = line_width / 2.0;
    let step = size / divisions as f32;

    for line in 0..=divisions {
        let offset = -half + line as f32 * step;

        // along x
        push_quad(
            &mut mesh,
            [
                (-half, offset - half_width),
                (half, offset - half_width),
                (half, offset + half_width),
                (-half, offset + half_width),
            ],
        );
        // along z
        push_quad(
            &mut mesh,
            [
                (offset - half_width, -half),
                (offset + half_width, -half),
                (offset + half_width, half),
                (offset - half_width, half),
            ],
        );
    }

    mesh
}

fn push_quad(mesh: &mut MeshData, corners: [(f32, f32); 4]) {
    let base = mesh.vertex_count() as u32;
    for (x, z) in corners {
        mesh.push_vertex(x, 0.0, z);
    }
    mesh.indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}
