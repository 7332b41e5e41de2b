//! # Core Models Module
//!
//! Data structures describing what gets reconstructed.
//!
//! - [`residue`] - The standard amino-acid alphabet used to key residue templates
//! - [`internal`] - Fixed-width per-residue internal coordinate tables
//! - [`chain`] - A chain to reconstruct: sequence, internal coordinates and real length
//!
//! All models are created before reconstruction begins and are never mutated by it.

pub mod chain;
pub mod internal;
pub mod residue;
