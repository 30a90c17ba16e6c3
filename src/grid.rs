//! Grid configuration and lattice geometry (Deep Fried Edition)
//!
//! The sampling grid is an axis-aligned lattice of cubic cells centered on
//! `origin`. All corner positions are derived from integer lattice
//! coordinates, so a corner shared by up to eight cells evaluates to a
//! bit-identical world position in every one of them.
//!
//! Author: Moroya Sakamoto

use crate::extract::BuildError;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Worst-case triangles a single cell can emit (lookup-table maximum)
pub const MAX_TRIANGLES_PER_CELL: usize = 5;

/// Configuration for one mesh build
///
/// Validated by [`GridConfig::validate`] before any buffer allocation;
/// invalid values fail the build synchronously.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridConfig {
    /// Edge length of each cubic cell (must be > 0)
    pub cell_size: f32,
    /// Number of cells along each axis (must be > 0)
    pub cell_count_per_axis: usize,
    /// Extra margin sampled beyond the object's nominal bounds (must be >= 0)
    pub sdf_padding: f32,
    /// World-space center of the grid volume
    pub origin: Vec3,
    /// Iso-level of the extracted surface (0 for SDF zero-level-set)
    pub iso_level: f32,
    /// Worker thread count for the parallel dispatch (must be >= 1).
    ///
    /// Tuning only: has no effect on the produced geometry.
    pub parallelism: usize,
    /// Average face normals at shared positions instead of flat shading
    pub smooth_normals: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            cell_size: 0.03,
            cell_count_per_axis: 32,
            sdf_padding: 0.05,
            origin: Vec3::ZERO,
            iso_level: 0.0,
            parallelism: 8,
            smooth_normals: true,
        }
    }
}

impl GridConfig {
    /// Configuration covering `[min, max]` inflated by `sdf_padding`
    ///
    /// Derives `cell_size` so that `cell_count_per_axis` cells span the
    /// largest padded extent, keeping cells cubic.
    pub fn for_bounds(min: Vec3, max: Vec3, cell_count_per_axis: usize, sdf_padding: f32) -> Self {
        let extent = (max - min).max_element() + 2.0 * sdf_padding;
        let cell_size = if cell_count_per_axis > 0 {
            extent / cell_count_per_axis as f32
        } else {
            0.0
        };
        GridConfig {
            cell_size,
            cell_count_per_axis,
            sdf_padding,
            origin: (min + max) * 0.5,
            ..Default::default()
        }
    }

    /// Check all parameters, failing fast before any allocation
    pub fn validate(&self) -> Result<(), BuildError> {
        if !(self.cell_size > 0.0) || !self.cell_size.is_finite() {
            return Err(BuildError::InvalidCellSize(self.cell_size));
        }
        if self.cell_count_per_axis == 0 {
            return Err(BuildError::InvalidCellCount(self.cell_count_per_axis));
        }
        if !(self.sdf_padding >= 0.0) || !self.sdf_padding.is_finite() {
            return Err(BuildError::InvalidPadding(self.sdf_padding));
        }
        if self.parallelism == 0 {
            return Err(BuildError::InvalidParallelism(self.parallelism));
        }
        Ok(())
    }

    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        let n = self.cell_count_per_axis;
        n * n * n
    }

    /// Capacity bound for the triangle buffer (5 triangles per cell)
    pub fn max_triangle_count(&self) -> usize {
        MAX_TRIANGLES_PER_CELL * self.cell_count()
    }

    /// World-space minimum corner of the grid volume
    pub fn grid_min(&self) -> Vec3 {
        let half = 0.5 * self.cell_size * self.cell_count_per_axis as f32;
        self.origin - Vec3::splat(half)
    }

    /// World-space position of lattice corner `(gx, gy, gz)`
    ///
    /// Computed from integer coordinates only, so every cell touching this
    /// corner sees the exact same position.
    #[inline(always)]
    pub fn corner_position(&self, gx: usize, gy: usize, gz: usize) -> Vec3 {
        self.grid_min() + Vec3::new(gx as f32, gy as f32, gz as f32) * self.cell_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GridConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let mut config = GridConfig {
            cell_size: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.cell_size = f32::NAN;
        assert!(config.validate().is_err());

        config = GridConfig {
            cell_count_per_axis: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config = GridConfig {
            sdf_padding: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config = GridConfig {
            parallelism: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_capacity_bound() {
        let config = GridConfig {
            cell_count_per_axis: 16,
            ..Default::default()
        };
        assert_eq!(config.max_triangle_count(), 5 * 16 * 16 * 16);
    }

    #[test]
    fn test_shared_corner_is_bit_identical() {
        let config = GridConfig::default();
        // Corner (1,1,1) seen as the +x+y+z corner of cell (0,0,0) and the
        // origin corner of cell (1,1,1) must be the exact same floats.
        let a = config.corner_position(1, 1, 1);
        let b = config.corner_position(1, 1, 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_for_bounds_covers_padded_volume() {
        let config = GridConfig::for_bounds(Vec3::splat(-1.0), Vec3::splat(1.0), 16, 0.5);
        let span = config.cell_size * config.cell_count_per_axis as f32;
        assert!((span - 3.0).abs() < 1e-5);
        assert!(config.grid_min().x <= -1.5 + 1e-5);
    }
}
