//! # Topology Module
//!
//! Residue geometry templates: for each amino-acid type, the ordered list of
//! side-chain atoms to place, their anchor atoms and their internal geometry.
//!
//! ## Overview
//!
//! Residue-specific knowledge lives here as data, never as branches in the
//! placement code. Glycine maps to an empty template; proline and every other
//! residue are ordinary entries. Correcting an atom list or a bond angle only
//! touches the template file.
//!
//! ## Usage
//!
//! ```ignore
//! use protnerf::core::topology::registry::TemplateRegistry;
//!
//! let registry = TemplateRegistry::standard();
//! let custom = TemplateRegistry::load(Path::new("templates.toml"))?;
//! ```

pub mod registry;
