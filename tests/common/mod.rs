//! Common test helpers for iso-march integration tests
//!
//! Author: Moroya Sakamoto

#![allow(dead_code)]

use iso_march::prelude::*;
use std::collections::HashMap;

// ============================================================================
// Standard test fields
// ============================================================================

/// Sphere of the given radius centered at the origin
pub fn sphere_field(radius: f32) -> impl Fn(Vec3) -> f32 + Sync {
    move |p: Vec3| sdf_sphere(p, radius)
}

/// Field with no surface anywhere inside any grid
pub fn empty_field() -> impl Fn(Vec3) -> f32 + Sync {
    |_: Vec3| 1.0
}

/// Standard sphere build: radius 0.8 in a 16-cell grid with margin
pub fn sphere_config() -> GridConfig {
    GridConfig::for_bounds(Vec3::splat(-1.0), Vec3::splat(1.0), 16, 0.1)
}

// ============================================================================
// Mesh inspection
// ============================================================================

/// Quantized position key (crossing points are bit-identical across cells,
/// so exact-duplicate bucketing is all this needs)
pub fn position_key(p: Vec3) -> [i32; 3] {
    [
        (p.x * 10000.0) as i32,
        (p.y * 10000.0) as i32,
        (p.z * 10000.0) as i32,
    ]
}

/// Count how many faces reference each undirected mesh edge
pub fn edge_face_counts(mesh: &Mesh) -> HashMap<([i32; 3], [i32; 3]), usize> {
    let mut counts = HashMap::new();
    for face in mesh.indices.chunks_exact(3) {
        let keys = [
            position_key(mesh.vertices[face[0] as usize].position),
            position_key(mesh.vertices[face[1] as usize].position),
            position_key(mesh.vertices[face[2] as usize].position),
        ];
        for (a, b) in [(0, 1), (1, 2), (2, 0)] {
            let edge = if keys[a] <= keys[b] {
                (keys[a], keys[b])
            } else {
                (keys[b], keys[a])
            };
            *counts.entry(edge).or_insert(0) += 1;
        }
    }
    counts
}

/// Sorted list of quantized vertex positions, for slot-order-independent
/// geometric comparison of two meshes
pub fn sorted_position_keys(mesh: &Mesh) -> Vec<[i32; 3]> {
    let mut keys: Vec<[i32; 3]> = mesh
        .vertices
        .iter()
        .map(|v| position_key(v.position))
        .collect();
    keys.sort_unstable();
    keys
}
