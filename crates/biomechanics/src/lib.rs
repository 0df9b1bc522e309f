//! Static sagittal-plane body model
//!
//! This crate provides:
//! - Forward kinematics of the ankle→wrist segment chain
//! - Segment mass decomposition from anthropometric ratios
//! - Per-segment and whole-body centre of mass
//! - Sequential (ankle→hip) joint reaction loads under static equilibrium

pub mod analysis;
pub mod com;
pub mod kinematics;
pub mod loads;
pub mod mass;
pub mod model;

pub use analysis::PostureAnalysis;
pub use model::BodyModel;
