//! # molfidget
//!
//! Builds 3-D printable ball-and-shaft models of small molecules.
//!
//! The library is organized in three layers:
//!
//! - **[`core`]: The Foundation.** Data models (`Molecule`, `Atom`, `Bond`),
//!   PDB and MOL readers, triangle meshes with their STL and PLY encoders.
//!
//! - **[`engine`]: The Shape Logic.** Shape configuration, per-atom and
//!   per-group piece construction, scenes, exports and progress reporting.
//!
//! - **[`workflows`]: The Public API.** The complete run from an input file to
//!   the files in the output directory.

pub mod core;
pub mod engine;
pub mod workflows;
