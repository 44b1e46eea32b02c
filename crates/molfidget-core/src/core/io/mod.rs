//! Readers for molecule file formats.
//!
//! Each format implements [`traits::MolecularFile`]; the workflow picks one
//! from the input file's extension.

pub mod mol;
pub mod pdb;
pub mod traits;

pub(crate) fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}
