//! # Workflows Module
//!
//! Top-level entry points that turn internal coordinates into Cartesian
//! coordinates.
//!
//! - **Reconstruction Workflow** ([`reconstruct`]) - One chain, driven by an
//!   explicit assembler state machine.
//! - **Batch Workflow** ([`batch`]) - Many independent chains, in parallel when
//!   the `parallel` feature is enabled, with progress reporting.

pub mod batch;
pub mod reconstruct;
