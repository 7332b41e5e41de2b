//! # ProtNeRF Core Library
//!
//! Rebuilds the Cartesian coordinates of a protein chain from its per-residue
//! internal geometry (bond lengths, bond angles and dihedral angles) using the
//! Natural Extension Reference Frame (NeRF) recurrence.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (residue alphabet,
//!   internal coordinate tables, chain inputs), the residue geometry template
//!   registry, and the pure geometry of a single NeRF placement.
//!
//! - **[`engine`]: The Logic Core.** Reconstruction configuration, the backbone
//!   seeding and extension steps, template-driven side-chain extension, and
//!   post-hoc validation of produced coordinates.
//!
//! - **[`workflows`]: The Public API.** The chain assembler that drives the
//!   per-residue recurrence for one chain, and batch reconstruction of many
//!   independent chains.
//!
//! ## Precision
//!
//! Every algorithm is written once against nalgebra's `Point3<T>`/`Vector3<T>`
//! with `T: RealField + Copy`; callers choose `f32` or `f64` through the
//! element type of the internal coordinate table they pass in.

pub mod core;
pub mod engine;
pub mod workflows;
