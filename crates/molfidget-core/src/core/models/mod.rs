//! # Core Models Module
//!
//! Data structures describing a molecule as it is read from disk, before any
//! geometry is built from it.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atoms with element, name and coordinates
//! - [`element`] - Van der Waals and covalent radii per element
//! - [`topology`] - Bonds between atoms
//! - [`molecule`] - The molecule itself, its bonds and its merged atom groups
//!
//! ## Usage
//!
//! ```ignore
//! use molfidget::core::models::{atom::Atom, molecule::Molecule};
//!
//! let mut molecule = Molecule::new("water");
//! let o = molecule.add_atom(Atom::new(1, "O", "O", Point3::origin()));
//! let h = molecule.add_atom(Atom::new(2, "H1", "H", Point3::new(0.96, 0.0, 0.0)));
//! molecule.add_bond(o, h);
//! molecule.merge_atoms(true);
//! ```

pub mod atom;
pub mod element;
pub mod molecule;
pub mod topology;
