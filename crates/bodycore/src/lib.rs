//! Shared vocabulary for the sagittal-plane body model
//!
//! This crate provides:
//! - Segment and joint identifiers and the keyed tables built from them
//! - Per-individual body parameters and optional foot geometry
//! - Anthropometric ratio tables (segment mass and CoM fractions)
//! - Sample counting for stepped sweeps
//! - The error type shared by every body-model operation

pub mod anthropometry;
pub mod error;
pub mod params;
pub mod range;
pub mod types;

pub use anthropometry::*;
pub use error::*;
pub use params::*;
pub use range::*;
pub use types::*;
