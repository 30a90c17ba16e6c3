//! Host-side mesh assembly (Deep Fried Edition)
//!
//! Drains the populated triangle slots into the final vertex/index/normal
//! arrays. This is the only place that touches winding: the lookup table
//! authors its triangles clockwise when seen from outside (under the
//! negative-inside sign convention), so every triangle is emitted reversed
//! as `p2, p1, p0`, yielding counter-clockwise, outward-facing triangles
//! in a right-handed convention.
//!
//! Author: Moroya Sakamoto

use crate::mesh::{Mesh, Triangle, Vertex};
use glam::Vec3;
use std::collections::HashMap;

/// Quantization factor for matching vertices that share a position
///
/// Crossing points on a shared cell face are bit-identical by
/// construction, so quantization only needs to bucket exact duplicates.
const POSITION_QUANTIZATION: f32 = 10000.0;

#[inline(always)]
fn quantize_position(p: Vec3) -> [i32; 3] {
    [
        (p.x * POSITION_QUANTIZATION) as i32,
        (p.y * POSITION_QUANTIZATION) as i32,
        (p.z * POSITION_QUANTIZATION) as i32,
    ]
}

/// Build the final mesh from the drained triangle slots
///
/// Vertices are dense (3 per triangle, no dedup) with the trivial index
/// array. Normals follow one uniform policy selected by `smooth_normals`:
/// area-weighted face normals averaged at shared positions, or flat
/// per-triangle normals. Triangle slot order carries no meaning; the
/// produced geometry is the same under any permutation of `triangles`.
pub fn assemble_mesh(triangles: &[Triangle], smooth_normals: bool) -> Mesh {
    let mut mesh = Mesh {
        vertices: Vec::with_capacity(triangles.len() * 3),
        indices: Vec::with_capacity(triangles.len() * 3),
    };

    for triangle in triangles {
        // Single deliberate winding reversal; see module docs.
        let corners = [triangle.p2, triangle.p1, triangle.p0];
        let face_normal = (corners[1] - corners[0])
            .cross(corners[2] - corners[0])
            .normalize_or_zero();

        let base = mesh.vertices.len() as u32;
        for (offset, &position) in corners.iter().enumerate() {
            mesh.vertices.push(Vertex::new(position, face_normal));
            mesh.indices.push(base + offset as u32);
        }
    }

    if smooth_normals {
        smooth_vertex_normals(&mut mesh);
    }
    mesh
}

/// Replace flat normals with position-shared, area-weighted averages
///
/// Accumulates the unnormalized face normal (magnitude = 2x area) at each
/// quantized vertex position, then normalizes. Degenerate triangles
/// contribute a zero cross product and fall back to their flat normal.
fn smooth_vertex_normals(mesh: &mut Mesh) {
    let mut accumulated: HashMap<[i32; 3], Vec3> = HashMap::with_capacity(mesh.vertices.len());

    for face in mesh.indices.chunks_exact(3) {
        let a = mesh.vertices[face[0] as usize].position;
        let b = mesh.vertices[face[1] as usize].position;
        let c = mesh.vertices[face[2] as usize].position;
        let weighted = (b - a).cross(c - a);

        for &index in face {
            let key = quantize_position(mesh.vertices[index as usize].position);
            *accumulated.entry(key).or_insert(Vec3::ZERO) += weighted;
        }
    }

    for vertex in &mut mesh.vertices {
        let key = quantize_position(vertex.position);
        if let Some(&sum) = accumulated.get(&key) {
            let normal = sum.normalize_or_zero();
            if normal != Vec3::ZERO {
                vertex.normal = normal;
            }
        }
    }
}
