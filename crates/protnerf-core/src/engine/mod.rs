//! # Engine Module
//!
//! The per-residue building blocks of chain reconstruction: everything the
//! chain assembler in [`crate::workflows`] drives, one residue at a time.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Backbone bond lengths, normalization epsilon
//!   and the geometry of the synthetic carbon preceding the first residue
//! - **Frame State** ([`frame`]) - The three most recently placed backbone atoms
//! - **Backbone** ([`backbone`]) - Seeding the first residue and extending the
//!   backbone by `N`, `CA`, `C`
//! - **Side Chains** ([`sidechain`]) - Template-driven placement of side-chain atoms
//! - **Validation** ([`validation`]) - Post-hoc checks on reconstructed coordinates
//! - **Progress Monitoring** ([`progress`]) - Callback-based reporting for batches
//! - **Error Handling** ([`error`]) - Reconstruction error taxonomy

pub mod backbone;
pub mod config;
pub mod error;
pub mod frame;
pub mod progress;
pub mod sidechain;
pub mod validation;
