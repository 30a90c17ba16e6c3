//! Mesh export (Deep Fried Edition)
//!
//! File-form handoff for the assembled mesh. The extractor core never
//! depends on a renderer; STL is the lowest-common-denominator way to hand
//! a finished mesh to one.
//!
//! Author: Moroya Sakamoto

mod stl;

pub use stl::{export_stl, export_stl_ascii};

use thiserror::Error;

/// File I/O errors
#[derive(Error, Debug)]
pub enum IoError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid file format
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),
}
