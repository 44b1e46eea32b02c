use phf::{Map, Set, phf_map, phf_set};
use tracing::warn;

/// Radius assumed for an element without tabulated radii.
pub const FALLBACK_VDW_RADIUS: f64 = 2.0;
pub const FALLBACK_COVALENT_RADIUS: f64 = 1.5;

/// Tabulated radii of a chemical element, in Angstroms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementData {
    /// Bondi van der Waals radius (Mantina et al. for main-group elements Bondi lacks).
    pub vdw_radius: f64,
    /// Single-bond covalent radius (Cordero et al.).
    pub covalent_radius: f64,
}

const fn data(vdw_radius: f64, covalent_radius: f64) -> ElementData {
    ElementData {
        vdw_radius,
        covalent_radius,
    }
}

/// Every element symbol from H to Og, plus D for deuterium.
static ELEMENT_SYMBOLS: Set<&'static str> = phf_set! {
    "H", "D", "He",
    "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar",
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr",
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe",
    "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy",
    "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt",
    "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn",
    "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf",
    "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds",
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
};

static ELEMENT_DATA: Map<&'static str, ElementData> = phf_map! {
    "H" => data(1.20, 0.31), "D" => data(1.20, 0.31), "He" => data(1.40, 0.28),
    "Li" => data(1.82, 1.28), "Be" => data(1.53, 0.96), "B" => data(1.92, 0.84),
    "C" => data(1.70, 0.76), "N" => data(1.55, 0.71), "O" => data(1.52, 0.66),
    "F" => data(1.47, 0.57), "Ne" => data(1.54, 0.58), "Na" => data(2.27, 1.66),
    "Mg" => data(1.73, 1.41), "Al" => data(1.84, 1.21), "Si" => data(2.10, 1.11),
    "P" => data(1.80, 1.07), "S" => data(1.80, 1.05), "Cl" => data(1.75, 1.02),
    "Ar" => data(1.88, 1.06), "K" => data(2.75, 2.03), "Ca" => data(2.31, 1.76),
    "Mn" => data(2.05, 1.39), "Fe" => data(2.04, 1.32), "Co" => data(2.00, 1.26),
    "Ni" => data(1.63, 1.24), "Cu" => data(1.40, 1.32), "Zn" => data(1.39, 1.22),
    "Ga" => data(1.87, 1.22), "Ge" => data(2.11, 1.20), "As" => data(1.85, 1.19),
    "Se" => data(1.90, 1.20), "Br" => data(1.85, 1.20), "Kr" => data(2.02, 1.16),
    "Rb" => data(3.03, 2.20), "Sr" => data(2.49, 1.95), "Pd" => data(1.63, 1.39),
    "Ag" => data(1.72, 1.45), "Cd" => data(1.58, 1.44), "In" => data(1.93, 1.42),
    "Sn" => data(2.17, 1.39), "Sb" => data(2.06, 1.39), "Te" => data(2.06, 1.38),
    "I" => data(1.98, 1.39), "Xe" => data(2.16, 1.40), "Cs" => data(3.43, 2.44),
    "Ba" => data(2.68, 2.15), "Pt" => data(1.75, 1.36), "Au" => data(1.66, 1.36),
    "Hg" => data(1.55, 1.32), "Tl" => data(1.96, 1.45), "Pb" => data(2.02, 1.46),
    "Bi" => data(2.07, 1.48), "Po" => data(1.97, 1.40), "At" => data(2.02, 1.50),
    "Rn" => data(2.20, 1.50), "Fr" => data(3.48, 2.60), "Ra" => data(2.83, 2.21),
    "U" => data(1.86, 1.96),
};

/// Normalizes an element symbol to its canonical capitalization ("CL" -> "Cl").
///
/// Returns `None` if the symbol is not an element.
pub fn normalize_symbol(symbol: &str) -> Option<String> {
    let trimmed = symbol.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?.to_ascii_uppercase();
    let canonical: String = std::iter::once(first)
        .chain(chars.map(|c| c.to_ascii_lowercase()))
        .collect();
    ELEMENT_SYMBOLS
        .contains(canonical.as_str())
        .then_some(canonical)
}

/// Guesses an element from a PDB-style atom name ("CA", "HO2", "1HB").
///
/// Two-letter symbols are only considered when the name is left-justified in
/// its column, which is how PDB writers distinguish calcium from C-alpha.
/// Four-character names starting with H ("HE21", "HG11") fill the column from
/// the left and are read as hydrogen.
pub fn element_from_atom_name(name: &str, left_justified: bool) -> Option<String> {
    let trimmed = name.trim();
    let letters: String = trimmed
        .chars()
        .skip_while(|c| c.is_ascii_digit())
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    if letters.is_empty() {
        return None;
    }
    let full_width_hydrogen = trimmed.len() == 4 && letters.starts_with(['H', 'h']);
    if left_justified && letters.len() >= 2 && !full_width_hydrogen {
        if let Some(two) = normalize_symbol(&letters[..2]) {
            return Some(two);
        }
    }
    normalize_symbol(&letters[..1])
}

pub fn element_data(symbol: &str) -> Option<ElementData> {
    ELEMENT_DATA.get(symbol).copied()
}

pub fn vdw_radius(symbol: &str) -> f64 {
    element_data(symbol).map_or_else(
        || {
            warn!(
                "No van der Waals radius for element '{}', using {:.2} A.",
                symbol, FALLBACK_VDW_RADIUS
            );
            FALLBACK_VDW_RADIUS
        },
        |d| d.vdw_radius,
    )
}

pub fn covalent_radius(symbol: &str) -> f64 {
    element_data(symbol).map_or(FALLBACK_COVALENT_RADIUS, |d| d.covalent_radius)
}

pub fn is_hydrogen(symbol: &str) -> bool {
    matches!(symbol, "H" | "D")
}
