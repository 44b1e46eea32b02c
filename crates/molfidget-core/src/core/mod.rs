//! # Core Module
//!
//! Stateless building blocks: the molecule model, file readers, triangle
//! meshes with their file encoders, and small geometry helpers.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds, merged groups
//! - **File I/O** ([`io`]) - PDB and MOL V2000 readers
//! - **Meshes** ([`mesh`]) - Triangle meshes, primitives, STL and PLY writers
//! - **Utilities** ([`utils`]) - Vector geometry

pub mod io;
pub mod mesh;
pub mod models;
pub mod utils;
