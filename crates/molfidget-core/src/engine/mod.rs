//! # Engine Module
//!
//! Turns a parsed [`Molecule`](crate::core::models::molecule::Molecule) into
//! printable pieces and writes them out.
//!
//! - **Configuration** ([`config`]) - Shape parameters, validation and the YAML record
//! - **Shapes** ([`shape`]) - Sphere and half-shaft geometry for atoms and merged groups
//! - **Scene** ([`scene`]) - Named per-atom meshes and whole-scene export
//! - **Export** ([`export`]) - Per-atom and per-group STL files
//! - **Viewer** ([`viewer`]) - The seam through which a scene is shown to the user
//! - **Progress Monitoring** ([`progress`]) - Progress reporting and user feedback
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod config;
pub mod error;
pub mod export;
pub mod progress;
pub mod scene;
pub mod shape;
pub mod viewer;
