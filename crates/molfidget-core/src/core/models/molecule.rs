use super::atom::Atom;
use super::topology::Bond;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Extra slack added to the sum of covalent radii when perceiving bonds from distances.
pub const BOND_PERCEPTION_TOLERANCE: f64 = 0.45;

/// A set of atoms that is printed as one piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomGroup {
    /// Indices into [`Molecule::atoms`], sorted ascending.
    pub atom_indices: Vec<usize>,
    /// Hill-order formula of the group (e.g., "CH3").
    pub formula: String,
}

impl AtomGroup {
    pub fn contains(&self, atom: usize) -> bool {
        self.atom_indices.binary_search(&atom).is_ok()
    }
}

/// A molecule: atoms in file order, the bonds between them, and, once
/// [`merge_atoms`](Molecule::merge_atoms) has run, the groups they print as.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    /// Title from the source file (PDB `COMPND`/`TITLE`, MOL name line).
    pub name: String,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// [`Bond::key`] of every bond, for constant-time duplicate checks.
    bond_keys: HashSet<(usize, usize)>,
    /// Cached adjacency list, indexed by atom index.
    adjacency: Vec<Vec<usize>>,
    groups: Vec<AtomGroup>,
    merged: bool,
}

impl Molecule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn groups(&self) -> &[AtomGroup] {
        &self.groups
    }

    pub fn is_merged(&self) -> bool {
        self.merged
    }

    /// Returns the indices of the atoms bonded to `atom`.
    pub fn neighbors(&self, atom: usize) -> &[usize] {
        self.adjacency.get(atom).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Appends an atom and returns its index. Invalidates any previous merge.
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.adjacency.push(Vec::new());
        self.clear_groups();
        self.atoms.len() - 1
    }

    /// Adds a bond between two atoms.
    ///
    /// Adding an existing bond, in either direction, is a no-op. Self-bonds
    /// and out-of-range indices are rejected.
    ///
    /// # Return
    ///
    /// Returns `Some(())` if the bond exists afterwards, otherwise `None`.
    pub fn add_bond(&mut self, atom1: usize, atom2: usize) -> Option<()> {
        if atom1 == atom2 || atom1 >= self.atoms.len() || atom2 >= self.atoms.len() {
            return None;
        }

        let bond = Bond::new(atom1, atom2);
        if !self.bond_keys.insert(bond.key()) {
            return Some(());
        }

        self.bonds.push(bond);
        self.adjacency[atom1].push(atom2);
        self.adjacency[atom2].push(atom1);
        self.clear_groups();
        Some(())
    }

    /// Adds bonds between atoms closer than the sum of their covalent radii
    /// plus `tolerance`, considering only pairs in which both atoms satisfy
    /// `include`. Returns the number of bonds added.
    pub fn perceive_bonds(
        &mut self,
        tolerance: f64,
        include: impl Fn(usize) -> bool,
    ) -> usize {
        let candidates: Vec<usize> = (0..self.atoms.len()).filter(|&i| include(i)).collect();
        let mut pairs = Vec::new();
        for (n, &i) in candidates.iter().enumerate() {
            for &j in &candidates[n + 1..] {
                let a = &self.atoms[i];
                let b = &self.atoms[j];
                let cutoff = a.covalent_radius() + b.covalent_radius() + tolerance;
                let distance = (a.position - b.position).norm();
                if distance > 0.0 && distance <= cutoff {
                    pairs.push((i, j));
                }
            }
        }
        let before = self.bonds.len();
        for (i, j) in pairs {
            self.add_bond(i, j);
        }
        let added = self.bonds.len() - before;
        debug!("Perceived {} bonds from interatomic distances.", added);
        added
    }

    /// Partitions the atoms into printable groups.
    ///
    /// With `merge_hydrogens`, each hydrogen bonded to exactly one heavy atom
    /// joins that atom's group; every other atom starts its own group. Groups
    /// are ordered by their lowest atom index. Calling this again recomputes
    /// the partition from scratch.
    pub fn merge_atoms(&mut self, merge_hydrogens: bool) {
        let mut sets = DisjointSet::new(self.atoms.len());

        if merge_hydrogens {
            for (index, atom) in self.atoms.iter().enumerate() {
                if !atom.is_hydrogen() {
                    continue;
                }
                let heavy: Vec<usize> = self.adjacency[index]
                    .iter()
                    .copied()
                    .filter(|&n| !self.atoms[n].is_hydrogen())
                    .collect();
                if let [partner] = heavy.as_slice() {
                    sets.union(index, *partner);
                }
            }
        }

        let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        let mut root_to_first: HashMap<usize, usize> = HashMap::new();
        for index in 0..self.atoms.len() {
            let root = sets.find(index);
            let first = *root_to_first.entry(root).or_insert(index);
            members.entry(first).or_default().push(index);
        }

        self.groups = members
            .into_values()
            .map(|atom_indices| AtomGroup {
                formula: self.formula(&atom_indices),
                atom_indices,
            })
            .collect();
        self.merged = true;

        debug!(
            "Merged {} atoms into {} groups.",
            self.atoms.len(),
            self.groups.len()
        );
    }

    /// Hill-order formula of a subset of atoms: carbon first, then hydrogen,
    /// then the rest alphabetically. Without carbon, everything is alphabetical.
    pub fn formula(&self, atom_indices: &[usize]) -> String {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for &index in atom_indices {
            if let Some(atom) = self.atoms.get(index) {
                let symbol = if atom.is_hydrogen() { "H" } else { atom.element.as_str() };
                *counts.entry(symbol).or_default() += 1;
            }
        }

        let mut ordered: Vec<(&str, usize)> = Vec::with_capacity(counts.len());
        if let Some(c) = counts.remove("C") {
            ordered.push(("C", c));
            if let Some(h) = counts.remove("H") {
                ordered.push(("H", h));
            }
        }
        ordered.extend(counts);

        ordered
            .into_iter()
            .map(|(symbol, count)| {
                if count == 1 {
                    symbol.to_string()
                } else {
                    format!("{}{}", symbol, count)
                }
            })
            .collect()
    }

    fn clear_groups(&mut self) {
        self.groups.clear();
        self.merged = false;
    }
}

/// Builds a [`Molecule`] while resolving file serial numbers to atom indices.
#[derive(Debug, Default)]
pub struct MoleculeBuilder {
    molecule: Molecule,
    serial_map: HashMap<usize, usize>,
}

impl MoleculeBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            molecule: Molecule::new(name),
            serial_map: HashMap::new(),
        }
    }

    pub fn set_name(&mut self, name: &str) -> &mut Self {
        self.molecule.name = name.to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.molecule.name
    }

    /// Adds an atom. Returns `false` if its serial number was already used.
    pub fn add_atom(&mut self, atom: Atom) -> bool {
        if self.serial_map.contains_key(&atom.serial) {
            return false;
        }
        let serial = atom.serial;
        let index = self.molecule.add_atom(atom);
        self.serial_map.insert(serial, index);
        true
    }

    /// Adds a bond between two serial numbers. Returns `false` if either is unknown.
    pub fn add_bond(&mut self, serial1: usize, serial2: usize) -> bool {
        match (self.serial_map.get(&serial1), self.serial_map.get(&serial2)) {
            (Some(&a), Some(&b)) => self.molecule.add_bond(a, b).is_some(),
            _ => false,
        }
    }

    /// Returns the atom index assigned to a serial number.
    pub fn index_of(&self, serial: usize) -> Option<usize> {
        self.serial_map.get(&serial).copied()
    }

    pub fn atom_count(&self) -> usize {
        self.molecule.atoms.len()
    }

    pub fn build(self) -> Molecule {
        self.molecule
    }
}

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            self.parent[root_b.max(root_a)] = root_a.min(root_b);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use nalgebra::Point3;

    /// Ethanol (CH3-CH2-OH) with explicit hydrogens, in file order C C O H H H H H H.
    pub(crate) fn ethanol() -> Molecule {
        let mut m = Molecule::new("ethanol");
        let atoms = [
            ("C1", "C", [-0.748, -0.015, 0.024]),
            ("C2", "C", [0.558, 0.420, -0.657]),
            ("O", "O", [0.621, 1.861, -0.632]),
            ("H1", "H", [-1.410, 0.871, 0.024]),
            ("H2", "H", [-1.210, -0.800, -0.584]),
            ("H3", "H", [-0.560, -0.340, 1.049]),
            ("H4", "H", [1.404, 0.009, -0.101]),
            ("H5", "H", [0.596, 0.052, -1.686]),
            ("HO", "H", [0.669, 2.166, 0.293]),
        ];
        for (i, (name, element, [x, y, z])) in atoms.iter().enumerate() {
            m.add_atom(Atom::new(i + 1, name, element, Point3::new(*x, *y, *z)));
        }
        for (a, b) in [(0, 1), (1, 2), (0, 3), (0, 4), (0, 5), (1, 6), (1, 7), (2, 8)] {
            m.add_bond(a, b).unwrap();
        }
        m
    }

    #[test]
    fn add_bond_is_idempotent_in_both_directions() {
        let mut m = Molecule::new("co");
        m.add_atom(Atom::new(1, "C", "C", Point3::origin()));
        m.add_atom(Atom::new(2, "O", "O", Point3::new(1.2, 0.0, 0.0)));

        assert!(m.add_bond(0, 1).is_some());
        assert!(m.add_bond(1, 0).is_some());
        assert!(m.add_bond(0, 1).is_some());
        assert_eq!(m.bonds().len(), 1);
        assert_eq!(m.neighbors(0), &[1]);
        assert_eq!(m.neighbors(1), &[0]);
    }

    #[test]
    fn add_bond_rejects_self_and_out_of_range() {
        let mut m = Molecule::new("x");
        m.add_atom(Atom::new(1, "C", "C", Point3::origin()));
        assert!(m.add_bond(0, 0).is_none());
        assert!(m.add_bond(0, 5).is_none());
        assert!(m.bonds().is_empty());
    }

    #[test]
    fn perceive_bonds_finds_covalent_neighbors_only() {
        let mut m = ethanol();
        let expected = m.bonds().len();
        let mut bare = Molecule::new("ethanol");
        for atom in m.atoms() {
            bare.add_atom(atom.clone());
        }

        assert_eq!(bare.perceive_bonds(BOND_PERCEPTION_TOLERANCE, |_| true), expected);
        for bond in m.bonds() {
            assert!(bare.neighbors(bond.atom1).contains(&bond.atom2));
        }
        m.perceive_bonds(BOND_PERCEPTION_TOLERANCE, |_| true);
        assert_eq!(m.bonds().len(), expected);
    }

    #[test]
    fn perceive_bonds_skips_excluded_atoms() {
        let mut bare = Molecule::new("ethanol");
        for atom in ethanol().atoms() {
            bare.add_atom(atom.clone());
        }
        // Leave the hydroxyl oxygen out: C2-O and O-HO are not perceived.
        let added = bare.perceive_bonds(BOND_PERCEPTION_TOLERANCE, |i| i != 2);
        assert_eq!(added, 6);
        assert!(bare.neighbors(2).is_empty());
        assert!(bare.neighbors(8).is_empty());
    }

    #[test]
    fn large_chain_keeps_one_bond_per_pair() {
        let mut m = Molecule::new("chain");
        for i in 0..2000 {
            m.add_atom(Atom::new(i + 1, "C", "C", Point3::new(1.5 * i as f64, 0.0, 0.0)));
        }
        assert_eq!(m.perceive_bonds(BOND_PERCEPTION_TOLERANCE, |_| true), 1999);
        for i in 0..1999 {
            m.add_bond(i + 1, i).unwrap();
        }
        assert_eq!(m.bonds().len(), 1999);
        assert_eq!(m.neighbors(1), &[0, 2]);
    }

    #[test]
    fn merge_atoms_groups_hydrogens_with_their_heavy_atom() {
        let mut m = ethanol();
        assert!(!m.is_merged());
        m.merge_atoms(true);

        assert!(m.is_merged());
        let formulas: Vec<&str> = m.groups().iter().map(|g| g.formula.as_str()).collect();
        assert_eq!(formulas, vec!["CH3", "CH2", "HO"]);
        assert_eq!(m.groups()[0].atom_indices, vec![0, 3, 4, 5]);
        assert_eq!(m.groups()[2].atom_indices, vec![2, 8]);
        assert!(m.groups()[1].contains(6));
    }

    #[test]
    fn merge_atoms_without_hydrogen_rule_keeps_every_atom_alone() {
        let mut m = ethanol();
        m.merge_atoms(false);
        assert_eq!(m.groups().len(), m.atoms().len());
        assert_eq!(m.groups()[3].formula, "H");
    }

    #[test]
    fn merge_atoms_recomputes_from_scratch() {
        let mut m = ethanol();
        m.merge_atoms(false);
        m.merge_atoms(true);
        assert_eq!(m.groups().len(), 3);
    }

    #[test]
    fn bridging_hydrogen_stays_alone() {
        let mut m = Molecule::new("bridge");
        m.add_atom(Atom::new(1, "O1", "O", Point3::new(-1.2, 0.0, 0.0)));
        m.add_atom(Atom::new(2, "H", "H", Point3::origin()));
        m.add_atom(Atom::new(3, "O2", "O", Point3::new(1.2, 0.0, 0.0)));
        m.add_bond(0, 1);
        m.add_bond(1, 2);
        m.merge_atoms(true);
        assert_eq!(m.groups().len(), 3);
    }

    #[test]
    fn adding_an_atom_invalidates_groups() {
        let mut m = ethanol();
        m.merge_atoms(true);
        m.add_atom(Atom::new(10, "X", "C", Point3::new(5.0, 5.0, 5.0)));
        assert!(!m.is_merged());
        assert!(m.groups().is_empty());
    }

    #[test]
    fn formula_without_carbon_is_alphabetical() {
        let mut m = Molecule::new("water");
        m.add_atom(Atom::new(1, "O", "O", Point3::origin()));
        m.add_atom(Atom::new(2, "H1", "H", Point3::new(0.96, 0.0, 0.0)));
        m.add_atom(Atom::new(3, "H2", "H", Point3::new(-0.24, 0.93, 0.0)));
        assert_eq!(m.formula(&[0, 1, 2]), "H2O");
    }

    #[test]
    fn builder_resolves_serials_and_rejects_duplicates() {
        let mut builder = MoleculeBuilder::new("test");
        assert!(builder.add_atom(Atom::new(10, "C", "C", Point3::origin())));
        assert!(builder.add_atom(Atom::new(20, "O", "O", Point3::new(1.4, 0.0, 0.0))));
        assert!(!builder.add_atom(Atom::new(10, "N", "N", Point3::origin())));
        assert!(builder.add_bond(10, 20));
        assert!(!builder.add_bond(10, 99));
        assert_eq!(builder.index_of(20), Some(1));
        assert_eq!(builder.index_of(99), None);

        let m = builder.build();
        assert_eq!(m.atoms().len(), 2);
        assert_eq!(m.bonds(), &[Bond::new(0, 1)]);
    }
}
