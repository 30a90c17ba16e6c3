//! Per-cell classification and triangulation (Deep Fried Edition)
//!
//! A pure function from one cell's 8 corner samples to 0-5 triangles.
//! No shared state between invocations: cells may run in any order or
//! interleaving, which is what lets the dispatcher fan them out freely.
//!
//! # Deep Fried Optimizations
//! - **Forced Inlining**: `#[inline(always)]` on the hot-path helpers.
//! - **Lazy Edge Interpolation**: Only edges flagged by `EDGE_TABLE` are
//!   interpolated.
//!
//! Author: Moroya Sakamoto

use crate::mesh::Triangle;
use crate::tables::{triangle_edges, EDGE_CONNECTIONS, EDGE_TABLE};
use glam::Vec3;

/// Classify a cell's corners into an 8-bit cube configuration
///
/// Bit `i` is set when corner `i` is inside the surface. A distance of
/// exactly `iso_level` counts as outside; this single tie-break keeps
/// neighboring cells from classifying a shared corner two different ways.
#[inline(always)]
pub fn cube_configuration(distances: &[f32; 8], iso_level: f32) -> usize {
    let mut configuration = 0usize;
    for (i, &d) in distances.iter().enumerate() {
        if d < iso_level {
            configuration |= 1 << i;
        }
    }
    configuration
}

/// Surface crossing point on the edge between two corner samples
///
/// The endpoints are put into canonical (lexicographic position) order
/// before interpolating. `EDGE_CONNECTIONS` traverses some shared edges in
/// opposite directions in neighboring cells, and the rounded divisions for
/// `t` and `1 - t` are not bit-exact complements; the canonical order makes
/// the crossing point bit-identical on both sides of a shared face.
///
/// The clamp guards the near-zero denominator when both corners sit almost
/// on the surface.
#[inline(always)]
fn edge_crossing(pa: Vec3, pb: Vec3, da: f32, db: f32, iso_level: f32) -> Vec3 {
    let ((p0, d0), (p1, d1)) = if (pb.x, pb.y, pb.z) < (pa.x, pa.y, pa.z) {
        ((pb, db), (pa, da))
    } else {
        ((pa, da), (pb, db))
    };
    let t = ((iso_level - d0) / (d1 - d0)).clamp(0.0, 1.0);
    p0 + (p1 - p0) * t
}

/// Triangulate one cell, emitting each triangle through `emit`
///
/// `positions` and `distances` are the 8 corner samples in
/// [`crate::tables::CORNER_OFFSETS`] order. Emits nothing for the two
/// trivial configurations; otherwise up to 5 triangles in table winding
/// order. Degenerate (zero-area) triangles from corners lying exactly on
/// the surface are emitted as-is.
pub fn triangulate_cell<E>(
    positions: &[Vec3; 8],
    distances: &[f32; 8],
    iso_level: f32,
    emit: &mut E,
) where
    E: FnMut(Triangle),
{
    let configuration = cube_configuration(distances, iso_level);
    let crossed = EDGE_TABLE[configuration];
    if crossed == 0 {
        return;
    }

    let mut edge_points = [Vec3::ZERO; 12];
    for (edge, &[a, b]) in EDGE_CONNECTIONS.iter().enumerate() {
        if crossed & (1 << edge) != 0 {
            edge_points[edge] = edge_crossing(
                positions[a],
                positions[b],
                distances[a],
                distances[b],
                iso_level,
            );
        }
    }

    for [e0, e1, e2] in triangle_edges(configuration) {
        emit(Triangle::new(edge_points[e0], edge_points[e1], edge_points[e2]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::CORNER_OFFSETS;

    fn unit_cube_corners() -> [Vec3; 8] {
        let mut positions = [Vec3::ZERO; 8];
        for (i, offset) in CORNER_OFFSETS.iter().enumerate() {
            positions[i] = Vec3::new(offset[0] as f32, offset[1] as f32, offset[2] as f32);
        }
        positions
    }

    #[test]
    fn test_trivial_configurations_emit_nothing() {
        let positions = unit_cube_corners();
        let mut count = 0;
        triangulate_cell(&positions, &[1.0; 8], 0.0, &mut |_| count += 1);
        triangulate_cell(&positions, &[-1.0; 8], 0.0, &mut |_| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_zero_distance_is_outside() {
        // One corner exactly on the surface, rest outside: still trivial.
        let positions = unit_cube_corners();
        let mut distances = [1.0f32; 8];
        distances[0] = 0.0;
        assert_eq!(cube_configuration(&distances, 0.0), 0);
        let mut count = 0;
        triangulate_cell(&positions, &distances, 0.0, &mut |_| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_single_inside_corner_emits_one_triangle() {
        let positions = unit_cube_corners();
        let mut distances = [1.0f32; 8];
        distances[0] = -1.0;
        let mut triangles = Vec::new();
        triangulate_cell(&positions, &distances, 0.0, &mut |t| triangles.push(t));
        assert_eq!(triangles.len(), 1);
        // Equal magnitudes put every crossing at the edge midpoint.
        for p in [triangles[0].p0, triangles[0].p1, triangles[0].p2] {
            assert!((p - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6
                || (p - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-6
                || (p - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-6);
        }
    }

    #[test]
    fn test_never_more_than_five_triangles() {
        let positions = unit_cube_corners();
        for configuration in 0..256usize {
            let mut distances = [1.0f32; 8];
            for corner in 0..8 {
                if configuration & (1 << corner) != 0 {
                    distances[corner] = -1.0;
                }
            }
            let mut count = 0;
            triangulate_cell(&positions, &distances, 0.0, &mut |_| count += 1);
            assert!(count <= 5, "configuration {:#04x} emitted {}", configuration, count);
        }
    }

    #[test]
    fn test_crossing_is_direction_independent() {
        let pa = Vec3::new(0.125, 0.25, 0.5);
        let pb = Vec3::new(0.125, 0.75, 0.5);
        let crossing_ab = edge_crossing(pa, pb, -0.3, 0.7, 0.0);
        let crossing_ba = edge_crossing(pb, pa, 0.7, -0.3, 0.0);
        assert_eq!(crossing_ab, crossing_ba);
    }

    #[test]
    fn test_planar_field_gives_planar_crossings() {
        let positions = unit_cube_corners();
        // Field increases with x: surface plane at x = iso.
        let mut distances = [0.0f32; 8];
        for (i, p) in positions.iter().enumerate() {
            distances[i] = p.x - 0.25;
        }
        let mut triangles = Vec::new();
        triangulate_cell(&positions, &distances, 0.0, &mut |t| triangles.push(t));
        assert!(!triangles.is_empty());
        for t in &triangles {
            for p in [t.p0, t.p1, t.p2] {
                assert!((p.x - 0.25).abs() < 1e-6);
            }
        }
    }
}
