use crate::core::models::molecule::Molecule;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading molecule file formats.
///
/// Implementors handle format-specific parsing and hand back a fully
/// connected [`Molecule`].
pub trait MolecularFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads a molecule from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Molecule, Self::Error>;

    /// Reads a molecule from a file path.
    ///
    /// If the file carries no title, the molecule is named after the file stem.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the file to read.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Molecule, Self::Error> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut molecule = Self::read_from(&mut reader)?;
        if molecule.name.is_empty() {
            if let Some(stem) = path.file_stem() {
                molecule.name = stem.to_string_lossy().into_owned();
            }
        }
        Ok(molecule)
    }
}
