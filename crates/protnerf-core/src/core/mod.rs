//! # Core Module
//!
//! Fundamental building blocks for coordinate reconstruction.
//!
//! - **Data Models** ([`models`]) - Residue alphabet, internal coordinate tables and chain inputs
//! - **Residue Templates** ([`topology`]) - Side-chain geometry templates keyed by residue type
//! - **Placement** ([`nerf`]) - The single NeRF placement step
//! - **Utilities** ([`utils`]) - Geometry primitives and residue code tables
//!
//! Nothing in this module holds mutable state; every function is a pure
//! computation over its arguments.

pub mod models;
pub mod nerf;
pub mod topology;
pub mod utils;
