//! Mesh output types (Deep Fried Edition)
//!
//! The extractor produces raw [`Triangle`]s (three explicit positions,
//! no shared-vertex indexing); the assembler turns them into a renderable
//! [`Mesh`] of vertices + indices.
//!
//! Author: Moroya Sakamoto

use glam::Vec3;

/// A single surface triangle with explicit corner positions
///
/// Winding is the lookup-table order as emitted by the cell triangulator;
/// the mesh assembler applies the final winding convention. Adjacent
/// triangles duplicate their shared corners by design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First corner
    pub p0: Vec3,
    /// Second corner
    pub p1: Vec3,
    /// Third corner
    pub p2: Vec3,
}

impl Triangle {
    /// Create a new triangle
    #[inline]
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        Triangle { p0, p1, p2 }
    }

    /// Unnormalized face normal (cross product of the edge vectors)
    ///
    /// Magnitude is twice the triangle area; zero for degenerate triangles.
    #[inline]
    pub fn face_normal_raw(&self) -> Vec3 {
        (self.p1 - self.p0).cross(self.p2 - self.p0)
    }
}

/// Vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// Position in 3D space
    pub position: Vec3,
    /// Surface normal
    pub normal: Vec3,
}

impl Vertex {
    /// Create a new vertex
    #[inline]
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Vertex { position, normal }
    }
}

/// Final renderable mesh
///
/// Vertices are not deduplicated: `indices` is the trivial sequence
/// `[0, 1, 2, ..., 3·triangle_count - 1]`, three consecutive vertices per
/// face. The caller owns the mesh outright after assembly.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Mesh vertices (positions + normals)
    pub vertices: Vec<Vertex>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Mesh {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True if the mesh has no triangles
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_normal_raw() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!((tri.face_normal_raw() - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_degenerate_normal_is_zero() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let tri = Triangle::new(p, p, p);
        assert_eq!(tri.face_normal_raw(), Vec3::ZERO);
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }
}
