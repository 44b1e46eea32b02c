use super::slice_and_trim;
use super::traits::MolecularFile;
use crate::core::models::atom::Atom;
use crate::core::models::element::{element_from_atom_name, normalize_symbol};
use crate::core::models::molecule::{BOND_PERCEPTION_TOLERANCE, Molecule, MoleculeBuilder};
use nalgebra::Point3;
use std::collections::{BTreeSet, HashSet};
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, warn};

/// Shortest ATOM/HETATM line that still carries coordinates (through column 54).
const MIN_ATOM_LINE_LEN: usize = 54;

/// Column ranges of the up to five atom serials on a CONECT record.
const CONECT_FIELDS: [(usize, usize); 5] = [(6, 11), (11, 16), (16, 21), (21, 26), (26, 31)];

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
    #[error("Cannot determine element from '{value}'")]
    UnknownElement { value: String },
    #[error("CONECT record has no readable atom serials")]
    InvalidConectFormat,
}

fn parse_float(line: &str, start: usize, end: usize, line_num: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

/// Reads the serials of a CONECT record, by fixed columns first and by
/// whitespace when the record is not column-aligned.
fn parse_conect_serials(line: &str) -> Option<Vec<usize>> {
    let fixed: Option<Vec<usize>> = CONECT_FIELDS
        .iter()
        .map(|&(start, end)| slice_and_trim(line, start, end))
        .filter(|field| !field.is_empty())
        .map(|field| field.parse().ok())
        .collect();
    match fixed {
        Some(serials) if serials.len() >= 2 => Some(serials),
        _ => {
            let loose: Option<Vec<usize>> = line
                .split_whitespace()
                .skip(1)
                .map(|field| field.parse().ok())
                .collect();
            loose.filter(|serials| serials.len() >= 2)
        }
    }
}

pub struct PdbFile;

impl MolecularFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Molecule, Self::Error> {
        let mut builder = MoleculeBuilder::new("");
        // Serial pairs, lower serial first.
        let mut conect_pairs: BTreeSet<(usize, usize)> = BTreeSet::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match slice_and_trim(&line, 0, 6) {
                "ATOM" | "HETATM" => {
                    if line.len() < MIN_ATOM_LINE_LEN {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }

                    let alt_loc = slice_and_trim(&line, 16, 17);
                    if !alt_loc.is_empty() && alt_loc != "A" {
                        debug!("Skipping alternate location '{}' on line {}.", alt_loc, line_num);
                        continue;
                    }

                    let serial_str = slice_and_trim(&line, 6, 11);
                    let serial: usize = serial_str.parse().map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidInt {
                            columns: "7-11".into(),
                            value: serial_str.into(),
                        },
                    })?;
                    let name = slice_and_trim(&line, 12, 16);
                    let x = parse_float(&line, 30, 38, line_num)?;
                    let y = parse_float(&line, 38, 46, line_num)?;
                    let z = parse_float(&line, 46, 54, line_num)?;

                    // The element column, when filled, is authoritative.
                    let element_str = slice_and_trim(&line, 76, 78);
                    let (element, source) = if element_str.is_empty() {
                        let left_justified = line.as_bytes().get(12).is_some_and(|b| *b != b' ');
                        (element_from_atom_name(name, left_justified), name)
                    } else {
                        (normalize_symbol(element_str), element_str)
                    };
                    let element = element.ok_or_else(|| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::UnknownElement {
                            value: source.to_string(),
                        },
                    })?;

                    let atom = Atom::new(serial, name, &element, Point3::new(x, y, z));
                    if !builder.add_atom(atom) {
                        return Err(PdbError::Inconsistency(format!(
                            "Duplicate atom serial: {}",
                            serial
                        )));
                    }
                }
                "CONECT" => {
                    let serials = parse_conect_serials(&line).ok_or(PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidConectFormat,
                    })?;
                    let origin = serials[0];
                    for &partner in &serials[1..] {
                        if partner != origin {
                            conect_pairs.insert((origin.min(partner), origin.max(partner)));
                        }
                    }
                }
                "COMPND" | "TITLE" => {
                    if builder.name().is_empty() {
                        let title = slice_and_trim(&line, 10, line.len());
                        let title = title.strip_prefix("MOLECULE:").unwrap_or(title).trim();
                        builder.set_name(title.trim_end_matches(';'));
                    }
                }
                "ENDMDL" | "END" => break,
                _ => {}
            }
        }

        if builder.atom_count() == 0 {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }

        // Atoms named by a CONECT record take their bonds from CONECT only;
        // all others are bonded by distance.
        let mut conect_atoms: HashSet<usize> = HashSet::new();
        for (a, b) in conect_pairs {
            match (builder.index_of(a), builder.index_of(b)) {
                (Some(i), Some(j)) => {
                    builder.add_bond(a, b);
                    conect_atoms.extend([i, j]);
                }
                _ => warn!(
                    "Ignoring CONECT between serials {} and {}: atom not loaded.",
                    a, b
                ),
            }
        }

        let mut molecule = builder.build();
        let perceived = molecule
            .perceive_bonds(BOND_PERCEPTION_TOLERANCE, |i| !conect_atoms.contains(&i));
        debug!(
            "{} bonds from CONECT records, {} perceived from distances.",
            molecule.bonds().len() - perceived,
            perceived
        );
        Ok(molecule)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;

    pub(crate) const ETHANOL_PDB: &str = "\
COMPND    ETHANOL
HETATM    1  C1  EOH     1      -0.748  -0.015   0.024  1.00  0.00           C
HETATM    2  C2  EOH     1       0.558   0.420  -0.657  1.00  0.00           C
HETATM    3  O   EOH     1       0.621   1.861  -0.632  1.00  0.00           O
HETATM    4  H1  EOH     1      -1.410   0.871   0.024  1.00  0.00           H
HETATM    5  H2  EOH     1      -1.210  -0.800  -0.584  1.00  0.00           H
HETATM    6  H3  EOH     1      -0.560  -0.340   1.049  1.00  0.00           H
HETATM    7  H4  EOH     1       1.404   0.009  -0.101  1.00  0.00           H
HETATM    8  H5  EOH     1       0.596   0.052  -1.686  1.00  0.00           H
HETATM    9  HO  EOH     1       0.669   2.166   0.293  1.00  0.00           H
CONECT    1    2    4    5    6
CONECT    2    1    3    7    8
CONECT    3    2    9
CONECT    4    1
CONECT    5    1
CONECT    6    1
CONECT    7    2
CONECT    8    2
CONECT    9    3
END
";

    fn read(text: &str) -> Result<Molecule, PdbError> {
        PdbFile::read_from(&mut Cursor::new(text))
    }

    #[test]
    fn reads_atoms_bonds_and_title() {
        let m = read(ETHANOL_PDB).unwrap();
        assert_eq!(m.name, "ETHANOL");
        assert_eq!(m.atoms().len(), 9);
        assert_eq!(m.bonds().len(), 8);
        assert_eq!(m.atoms()[2].element, "O");
        assert_eq!(m.atoms()[0].position, Point3::new(-0.748, -0.015, 0.024));
    }

    #[test]
    fn repeated_conect_partner_gives_one_bond() {
        let text = "\
ATOM      1  C   FOR     1       0.000   0.000   0.000  1.00  0.00           C
ATOM      2  O   FOR     1       1.210   0.000   0.000  1.00  0.00           O
CONECT    1    2    2
CONECT    2    1    1
END
";
        let m = read(text).unwrap();
        assert_eq!(m.bonds().len(), 1);
        assert_eq!(m.neighbors(0), &[1]);
    }

    #[test]
    fn bonds_are_perceived_without_conect() {
        let text: String = ETHANOL_PDB
            .lines()
            .filter(|l| !l.starts_with("CONECT"))
            .map(|l| format!("{}\n", l))
            .collect();
        let m = read(&text).unwrap();
        assert_eq!(m.bonds().len(), 8);
    }

    #[test]
    fn element_falls_back_to_atom_name() {
        let text = "\
ATOM      1  CA  GLY     1       0.000   0.000   0.000
ATOM      2 CL   LIG     2       2.000   0.000   0.000
";
        let m = read(text).unwrap();
        assert_eq!(m.atoms()[0].element, "C");
        assert_eq!(m.atoms()[1].element, "Cl");
    }

    fn atom_line(
        record: &str,
        serial: usize,
        name: &str,
        residue: &str,
        [x, y, z]: [f64; 3],
        element: &str,
    ) -> String {
        format!(
            "{record:<6}{serial:>5} {name:<4} {residue:>3} A   1    {x:>8.3}{y:>8.3}{z:>8.3}  1.00  0.00          {element:>2}\n"
        )
    }

    #[test]
    fn element_column_names_heavy_metals() {
        let text = [
            atom_line("HETATM", 1, "HG", "HG", [0.0, 0.0, 0.0], "HG"),
            atom_line("HETATM", 2, "PT", "CPT", [5.0, 0.0, 0.0], "PT"),
            atom_line("HETATM", 3, "SN", "SN", [10.0, 0.0, 0.0], "SN"),
        ]
        .concat();
        let m = read(&text).unwrap();
        let elements: Vec<&str> = m.atoms().iter().map(|a| a.element.as_str()).collect();
        assert_eq!(elements, ["Hg", "Pt", "Sn"]);
        assert!(!m.atoms()[0].is_hydrogen());
        assert_eq!(m.atoms()[0].vdw_radius(), 1.55);
    }

    #[test]
    fn filled_element_column_is_not_second_guessed() {
        let text = atom_line("HETATM", 1, "CA", "CA", [0.0, 0.0, 0.0], "XX");
        match read(&text).unwrap_err() {
            PdbError::Parse {
                line: 1,
                kind: PdbParseErrorKind::UnknownElement { value },
            } => assert_eq!(value, "XX"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn name_justification_separates_mercury_from_hydrogen() {
        let mercury = atom_line("HETATM", 1, "HG", "HG", [0.0, 0.0, 0.0], "");
        let hydrogen = atom_line("ATOM", 2, " HG", "SER", [5.0, 0.0, 0.0], "");
        let text = format!("{}\n{}\n", &mercury[..54], &hydrogen[..54]);
        let m = read(&text).unwrap();
        assert_eq!(m.atoms()[0].element, "Hg");
        assert_eq!(m.atoms()[1].element, "H");
    }

    #[test]
    fn residues_without_conect_are_bonded_by_distance() {
        let text = [
            atom_line("ATOM", 1, " N", "GLY", [0.000, 0.000, 0.000], "N"),
            atom_line("ATOM", 2, " CA", "GLY", [1.458, 0.000, 0.000], "C"),
            atom_line("ATOM", 3, " C", "GLY", [2.009, 1.420, 0.000], "C"),
            atom_line("HETATM", 4, " C1", "LIG", [10.000, 0.000, 0.000], "C"),
            atom_line("HETATM", 5, " O1", "LIG", [11.200, 0.000, 0.000], "O"),
            "CONECT    4    5\nCONECT    5    4\nEND\n".to_string(),
        ]
        .concat();
        let m = read(&text).unwrap();
        assert_eq!(m.bonds().len(), 3);
        assert_eq!(m.neighbors(1), &[0, 2]);
        assert_eq!(m.neighbors(3), &[4]);
    }

    #[test]
    fn conect_atoms_take_no_distance_bonds() {
        // O1 sits within bonding distance of C2, but only C1-O1 and C1-C2 are listed.
        let text = [
            atom_line("HETATM", 1, " C1", "LIG", [0.000, 0.000, 0.000], "C"),
            atom_line("HETATM", 2, " C2", "LIG", [1.500, 0.000, 0.000], "C"),
            atom_line("HETATM", 3, " O1", "LIG", [0.750, 1.200, 0.000], "O"),
            "CONECT    1    2    3\nEND\n".to_string(),
        ]
        .concat();
        let m = read(&text).unwrap();
        assert_eq!(m.bonds().len(), 2);
        assert_eq!(m.neighbors(2), &[0]);
    }

    #[test]
    fn alternate_locations_other_than_a_are_skipped() {
        let text = "\
ATOM      1  O  AHOH     1       0.000   0.000   0.000  0.50  0.00           O
ATOM      2  O  BHOH     1       0.300   0.000   0.000  0.50  0.00           O
";
        let m = read(text).unwrap();
        assert_eq!(m.atoms().len(), 1);
    }

    #[test]
    fn reading_stops_at_first_model_end() {
        let text = "\
MODEL        1
ATOM      1  O   HOH     1       0.000   0.000   0.000  1.00  0.00           O
ENDMDL
MODEL        2
ATOM      2  O   HOH     1       9.000   0.000   0.000  1.00  0.00           O
ENDMDL
";
        let m = read(text).unwrap();
        assert_eq!(m.atoms().len(), 1);
    }

    #[test]
    fn short_atom_line_is_rejected() {
        let err = read("ATOM      1  C   LIG     1       0.000\n").unwrap_err();
        assert!(matches!(
            err,
            PdbError::Parse {
                line: 1,
                kind: PdbParseErrorKind::LineTooShort
            }
        ));
    }

    #[test]
    fn invalid_coordinate_reports_columns() {
        let text = "ATOM      1  C   LIG     1       0.000   abcde   0.000  1.00  0.00           C\n";
        match read(text).unwrap_err() {
            PdbError::Parse {
                kind: PdbParseErrorKind::InvalidFloat { columns, .. },
                ..
            } => assert_eq!(columns, "39-46"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn duplicate_serial_is_inconsistent() {
        let text = "\
ATOM      1  C   LIG     1       0.000   0.000   0.000  1.00  0.00           C
ATOM      1  O   LIG     1       1.000   0.000   0.000  1.00  0.00           O
";
        assert!(matches!(read(text), Err(PdbError::Inconsistency(_))));
    }

    #[test]
    fn file_without_atoms_is_rejected() {
        assert!(matches!(
            read("REMARK nothing here\nEND\n"),
            Err(PdbError::MissingRecord(_))
        ));
    }

    #[test]
    fn conect_to_unknown_serial_is_ignored() {
        let text = "\
ATOM      1  C   LIG     1       0.000   0.000   0.000  1.00  0.00           C
ATOM      2  O   LIG     1       1.400   0.000   0.000  1.00  0.00           O
CONECT    1    2   99
";
        let m = read(text).unwrap();
        assert_eq!(m.bonds().len(), 1);
    }

    #[test]
    fn read_from_path_names_untitled_molecules_after_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.pdb");
        std::fs::write(
            &path,
            "ATOM      1  O   HOH     1       0.000   0.000   0.000  1.00  0.00           O\n",
        )
        .unwrap();
        let m = PdbFile::read_from_path(&path).unwrap();
        assert_eq!(m.name, "water");
    }

    #[test]
    fn read_from_path_propagates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdbFile::read_from_path(dir.path().join("absent.pdb"));
        assert!(matches!(result, Err(PdbError::Io(_))));
    }
}
