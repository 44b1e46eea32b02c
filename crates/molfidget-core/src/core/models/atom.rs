use super::element;
use nalgebra::Point3;

/// Represents an atom read from a molecule file.
///
/// Atoms are stored in file order inside a [`Molecule`](super::molecule::Molecule),
/// and their position in that list is what bonds and groups refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The serial number from the source file (PDB serial or 1-based MOL row).
    pub serial: usize,
    /// The atom name (e.g., "C1", "HO"). MOL files use the element symbol.
    pub name: String,
    /// The canonical element symbol (e.g., "C", "Cl").
    pub element: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom`.
    ///
    /// # Arguments
    ///
    /// * `serial` - The serial number from the source file.
    /// * `name` - The name of the atom.
    /// * `element` - The canonical element symbol.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(serial: usize, name: &str, element: &str, position: Point3<f64>) -> Self {
        Self {
            serial,
            name: name.to_string(),
            element: element.to_string(),
            position,
        }
    }

    pub fn is_hydrogen(&self) -> bool {
        element::is_hydrogen(&self.element)
    }

    pub fn vdw_radius(&self) -> f64 {
        element::vdw_radius(&self.element)
    }

    pub fn covalent_radius(&self) -> f64 {
        element::covalent_radius(&self.element)
    }
}
