//! Parallel grid dispatch and the rebuild pipeline (Deep Fried Edition)
//!
//! Fans the cell triangulator out over every cell of the grid with rayon
//! (Z-slab outer parallel loop, X/Y inner loops), all cells appending into
//! one shared [`TriangleBuffer`]. The join at the end of the parallel
//! iterator is the single blocking point of the pipeline; the buffer is
//! consumed by value afterwards, so a partial buffer can never leak to the
//! assembler.
//!
//! # Deep Fried Optimizations
//! - **Z-Slab Parallelization**: One task per Z-layer; no integer
//!   division to reconstruct coordinates.
//! - **Wait-Free Accumulation**: One atomic fetch-add per triangle, no
//!   locks, no sub-mesh merging phase.
//!
//! Author: Moroya Sakamoto

use crate::append::TriangleBuffer;
use crate::assemble::assemble_mesh;
use crate::cell::triangulate_cell;
use crate::grid::GridConfig;
use crate::mesh::Mesh;
use crate::sdf::Sdf;
use crate::tables::CORNER_OFFSETS;
use glam::Vec3;
use rayon::prelude::*;
use thiserror::Error;

/// Errors from a mesh build
#[derive(Error, Debug)]
pub enum BuildError {
    /// Cell size must be positive and finite
    #[error("invalid cell_size {0}: must be positive and finite")]
    InvalidCellSize(f32),

    /// Cell count must be positive
    #[error("invalid cell_count_per_axis {0}: must be at least 1")]
    InvalidCellCount(usize),

    /// Padding must be non-negative and finite
    #[error("invalid sdf_padding {0}: must be non-negative and finite")]
    InvalidPadding(f32),

    /// Parallelism must be at least one worker
    #[error("invalid parallelism {0}: must be at least 1")]
    InvalidParallelism(usize),

    /// More triangles were appended than the worst-case bound allows
    #[error("triangle buffer capacity {capacity} exceeded")]
    CapacityExceeded {
        /// Preallocated worst-case capacity (5 triangles per cell)
        capacity: usize,
    },

    /// Worker thread pool construction failed
    #[error("thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Triangulate one cell of the grid into the shared buffer
#[inline]
fn march_cell<S: Sdf + ?Sized>(
    sdf: &S,
    config: &GridConfig,
    x: usize,
    y: usize,
    z: usize,
    buffer: &TriangleBuffer,
) {
    let mut positions = [Vec3::ZERO; 8];
    let mut distances = [0.0f32; 8];
    for (i, offset) in CORNER_OFFSETS.iter().enumerate() {
        let p = config.corner_position(x + offset[0], y + offset[1], z + offset[2]);
        positions[i] = p;
        distances[i] = sdf.sample(p);
    }
    triangulate_cell(&positions, &distances, config.iso_level, &mut |triangle| {
        // Overflow is checked once after the join; a failed append here
        // writes nothing and cannot corrupt neighboring slots.
        buffer.append(triangle);
    });
}

/// Extract the iso-surface of `sdf` over the configured grid
///
/// Validates the configuration before any allocation, dispatches every
/// cell in parallel and assembles the drained triangles into a complete
/// mesh. The same field and configuration always produce the same set of
/// triangles regardless of scheduling; only slot order may differ.
///
/// # Arguments
/// * `sdf` - The signed distance field (negative inside)
/// * `config` - Grid parameters for this build
///
/// # Returns
/// The assembled mesh, or a [`BuildError`] with nothing built.
pub fn extract_mesh<S: Sdf + ?Sized>(sdf: &S, config: &GridConfig) -> Result<Mesh, BuildError> {
    config.validate()?;

    let capacity = config.max_triangle_count();
    let buffer = TriangleBuffer::with_capacity(capacity);
    let n = config.cell_count_per_axis;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.parallelism)
        .build()?;
    pool.install(|| {
        (0..n).into_par_iter().for_each(|z| {
            for y in 0..n {
                for x in 0..n {
                    march_cell(sdf, config, x, y, z, &buffer);
                }
            }
        });
    });
    // All producers joined: the counter is final and the slots are stable.

    if buffer.overflowed() {
        return Err(BuildError::CapacityExceeded { capacity });
    }

    let triangles = buffer.into_triangles();
    Ok(assemble_mesh(&triangles, config.smooth_normals))
}

/// Rebuildable mesh host
///
/// Owns a field and a configuration and keeps the last successfully built
/// mesh. [`Remesher::rebuild`] is idempotent and safe to trigger
/// repeatedly; a failed rebuild leaves the previous mesh untouched, so a
/// partial result is never observable.
pub struct Remesher<S: Sdf> {
    sdf: S,
    config: GridConfig,
    mesh: Option<Mesh>,
}

impl<S: Sdf> Remesher<S> {
    /// Create a host with no mesh built yet
    pub fn new(sdf: S, config: GridConfig) -> Self {
        Remesher {
            sdf,
            config,
            mesh: None,
        }
    }

    /// Rebuild the mesh from scratch, replacing the previous one on success
    pub fn rebuild(&mut self) -> Result<&Mesh, BuildError> {
        let mesh = extract_mesh(&self.sdf, &self.config)?;
        Ok(self.mesh.insert(mesh))
    }

    /// Last successfully built mesh, if any
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Current configuration
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Replace the configuration used by the next rebuild
    pub fn set_config(&mut self, config: GridConfig) {
        self.config = config;
    }

    /// Give up the host, keeping only the last mesh
    pub fn into_mesh(self) -> Option<Mesh> {
        self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::sdf_sphere;

    fn sphere_config() -> GridConfig {
        GridConfig::for_bounds(Vec3::splat(-1.0), Vec3::splat(1.0), 12, 0.2)
    }

    #[test]
    fn test_sphere_produces_triangles() {
        let mesh = extract_mesh(&|p: Vec3| sdf_sphere(p, 0.8), &sphere_config()).unwrap();
        assert!(mesh.triangle_count() > 0);
        assert!(mesh.triangle_count() <= 5 * 12 * 12 * 12);
    }

    #[test]
    fn test_all_outside_field_is_empty_not_an_error() {
        let mesh = extract_mesh(&|_: Vec3| 1.0, &sphere_config()).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_invalid_config_fails_before_building() {
        let config = GridConfig {
            cell_size: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            extract_mesh(&|_: Vec3| 1.0, &config),
            Err(BuildError::InvalidCellSize(_))
        ));
    }

    #[test]
    fn test_failed_rebuild_keeps_previous_mesh() {
        let mut host = Remesher::new(|p: Vec3| sdf_sphere(p, 0.8), sphere_config());
        let count = host.rebuild().unwrap().triangle_count();
        assert!(count > 0);

        host.set_config(GridConfig {
            cell_count_per_axis: 0,
            ..Default::default()
        });
        assert!(host.rebuild().is_err());
        assert_eq!(host.mesh().unwrap().triangle_count(), count);
    }
}
