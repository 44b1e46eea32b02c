use super::slice_and_trim;
use super::traits::MolecularFile;
use crate::core::models::atom::Atom;
use crate::core::models::element::normalize_symbol;
use crate::core::models::molecule::{Molecule, MoleculeBuilder};
use nalgebra::Point3;
use std::io::{self, BufRead};
use std::ops::RangeInclusive;
use thiserror::Error;

/// MDL bond types: single, double, triple and aromatic.
const BOND_TYPES: RangeInclusive<u8> = 1..=4;

#[derive(Debug, Error)]
pub enum MolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: MolParseErrorKind },
    #[error("Unexpected end of file while reading {0}")]
    UnexpectedEof(String),
    #[error("Unsupported MOL version '{0}' (only V2000 is supported)")]
    UnsupportedVersion(String),
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
}

#[derive(Debug, Error)]
pub enum MolParseErrorKind {
    #[error("Counts line must start with atom and bond counts")]
    InvalidCounts,
    #[error("Atom line must contain x, y, z and an element symbol")]
    InvalidAtomLine,
    #[error("Bond line must contain two atom numbers and a bond type")]
    InvalidBondLine,
    #[error("Unknown element symbol '{value}'")]
    UnknownElement { value: String },
    #[error("Unsupported bond type {value}")]
    InvalidBondType { value: u8 },
}

/// Tracks line numbers while reading the fixed-order MOL blocks.
struct LineReader<'a, R: BufRead> {
    lines: io::Lines<&'a mut R>,
    line_num: usize,
}

impl<'a, R: BufRead> LineReader<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, MolError> {
        match self.lines.next() {
            Some(line) => {
                self.line_num += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    fn expect_line(&mut self, what: &str) -> Result<String, MolError> {
        self.next_line()?
            .ok_or_else(|| MolError::UnexpectedEof(what.to_string()))
    }

    fn parse_error(&self, kind: MolParseErrorKind) -> MolError {
        MolError::Parse {
            line: self.line_num,
            kind,
        }
    }
}

fn parse_counts(line: &str) -> Option<(usize, usize)> {
    let fixed = (
        slice_and_trim(line, 0, 3).parse().ok(),
        slice_and_trim(line, 3, 6).parse().ok(),
    );
    if let (Some(atoms), Some(bonds)) = fixed {
        return Some((atoms, bonds));
    }
    let mut fields = line.split_whitespace();
    let atoms = fields.next()?.parse().ok()?;
    let bonds = fields.next()?.parse().ok()?;
    Some((atoms, bonds))
}

fn parse_atom_line(line: &str) -> Option<(Point3<f64>, String)> {
    let fixed = (
        slice_and_trim(line, 0, 10).parse().ok(),
        slice_and_trim(line, 10, 20).parse().ok(),
        slice_and_trim(line, 20, 30).parse().ok(),
        slice_and_trim(line, 31, 34),
    );
    if let (Some(x), Some(y), Some(z), symbol) = fixed {
        if !symbol.is_empty() {
            return Some((Point3::new(x, y, z), symbol.to_string()));
        }
    }
    let mut fields = line.split_whitespace();
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    let z = fields.next()?.parse().ok()?;
    let symbol = fields.next()?;
    Some((Point3::new(x, y, z), symbol.to_string()))
}

fn parse_bond_line(line: &str) -> Option<(usize, usize, u8)> {
    let fixed = (
        slice_and_trim(line, 0, 3).parse().ok(),
        slice_and_trim(line, 3, 6).parse().ok(),
        slice_and_trim(line, 6, 9).parse().ok(),
    );
    if let (Some(a), Some(b), Some(kind)) = fixed {
        return Some((a, b, kind));
    }
    let mut fields = line.split_whitespace();
    let a = fields.next()?.parse().ok()?;
    let b = fields.next()?.parse().ok()?;
    let kind = fields.next()?.parse().ok()?;
    Some((a, b, kind))
}

/// Reader for MDL MOL files (V2000 connection tables).
pub struct MolFile;

impl MolecularFile for MolFile {
    type Error = MolError;

    fn read_from(reader: &mut impl BufRead) -> Result<Molecule, Self::Error> {
        let mut lines = LineReader::new(reader);

        let name = lines.expect_line("header name line")?;
        lines.expect_line("header program line")?;
        lines.expect_line("header comment line")?;
        let counts_line = lines.expect_line("counts line")?;

        let version = slice_and_trim(&counts_line, 34, 39);
        if version == "V3000" || counts_line.split_whitespace().any(|f| f == "V3000") {
            return Err(MolError::UnsupportedVersion("V3000".into()));
        }
        let (atom_count, bond_count) = parse_counts(&counts_line)
            .ok_or_else(|| lines.parse_error(MolParseErrorKind::InvalidCounts))?;

        let mut builder = MoleculeBuilder::new(name.trim());

        for serial in 1..=atom_count {
            let line = lines.expect_line(&format!("atom {} of {}", serial, atom_count))?;
            let (position, symbol) = parse_atom_line(&line)
                .ok_or_else(|| lines.parse_error(MolParseErrorKind::InvalidAtomLine))?;
            let element = normalize_symbol(&symbol).ok_or_else(|| {
                lines.parse_error(MolParseErrorKind::UnknownElement {
                    value: symbol.clone(),
                })
            })?;
            let atom_name = format!("{}{}", element, serial);
            builder.add_atom(Atom::new(serial, &atom_name, &element, position));
        }

        for bond_num in 1..=bond_count {
            let line = lines.expect_line(&format!("bond {} of {}", bond_num, bond_count))?;
            let (a, b, kind) = parse_bond_line(&line)
                .ok_or_else(|| lines.parse_error(MolParseErrorKind::InvalidBondLine))?;
            if !BOND_TYPES.contains(&kind) {
                return Err(lines.parse_error(MolParseErrorKind::InvalidBondType { value: kind }));
            }
            if !builder.add_bond(a, b) {
                return Err(MolError::Inconsistency(format!(
                    "Bond {} references atoms {} and {}, but only {} atoms are defined",
                    bond_num, a, b, atom_count
                )));
            }
        }

        while let Some(line) = lines.next_line()? {
            if line.starts_with("M  END") || line.starts_with("$$$$") {
                break;
            }
        }

        Ok(builder.build())
    }
}
