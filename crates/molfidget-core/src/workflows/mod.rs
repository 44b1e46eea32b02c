//! # Workflows Module
//!
//! End-to-end procedures built from the [`core`](crate::core) and
//! [`engine`](crate::engine) layers.
//!
//! - **Fidget Workflow** ([`fidget`]) - Load a PDB or MOL file, build the scene,
//!   optionally show it, and write every mesh plus the configuration record.

pub mod fidget;
