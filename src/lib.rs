//! # iso-march
//!
//! Parallel Marching Cubes isosurface extraction for signed distance
//! fields.
//!
//! Samples a user-supplied SDF over a regular 3D grid and converts its
//! zero-level-set into an explicit triangle mesh. Every grid cell is
//! classified and triangulated independently and in parallel; the
//! variable number of triangles per cell is accumulated wait-free into a
//! single shared buffer via an atomic slot-claim protocol, then assembled
//! host-side into vertex/index/normal arrays.
//!
//! ## Example
//!
//! ```rust
//! use iso_march::prelude::*;
//!
//! // Any Sync closure from position to signed distance is a field.
//! let field = |p: glam::Vec3| sdf_sphere(p, 0.8);
//!
//! let config = GridConfig::for_bounds(
//!     glam::Vec3::splat(-1.0),
//!     glam::Vec3::splat(1.0),
//!     16,
//!     0.1,
//! );
//! let mesh = extract_mesh(&field, &config).unwrap();
//! assert!(mesh.triangle_count() > 0);
//! ```
//!
//! ## Author
//!
//! Moroya Sakamoto

#![warn(missing_docs)]

pub mod append;
pub mod assemble;
pub mod cell;
pub mod extract;
pub mod grid;
pub mod io;
pub mod mesh;
pub mod sdf;
pub mod tables;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::append::TriangleBuffer;
    pub use crate::assemble::assemble_mesh;
    pub use crate::cell::{cube_configuration, triangulate_cell};
    pub use crate::extract::{extract_mesh, BuildError, Remesher};
    pub use crate::grid::{GridConfig, MAX_TRIANGLES_PER_CELL};
    pub use crate::io::{export_stl, export_stl_ascii, IoError};
    pub use crate::mesh::{Mesh, Triangle, Vertex};
    pub use crate::sdf::{sdf_box3d, sdf_sphere, sdf_sphere_at, sdf_torus, Sdf};
    pub use glam::Vec3;
}

// Re-exports for convenience
pub use extract::{extract_mesh, BuildError, Remesher};
pub use grid::GridConfig;
pub use mesh::Mesh;
pub use sdf::Sdf;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_basic_workflow() {
        let field = |p: Vec3| sdf_sphere(p, 0.5);
        let config = GridConfig::for_bounds(Vec3::splat(-0.6), Vec3::splat(0.6), 10, 0.1);

        let mut host = Remesher::new(field, config);
        assert!(host.mesh().is_none());

        let count = host.rebuild().unwrap().triangle_count();
        assert!(count > 0);

        // Rebuilding with nothing changed reproduces the same geometry.
        assert_eq!(host.rebuild().unwrap().triangle_count(), count);
    }
}
