/// An undirected bond between two atoms, by index into the molecule's atom list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize) -> Self {
        Self { atom1, atom2 }
    }

    /// The atom pair with the lower index first, identical for both directions.
    pub fn key(&self) -> (usize, usize) {
        (self.atom1.min(self.atom2), self.atom1.max(self.atom2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_ignores_direction() {
        assert_eq!(Bond::new(3, 8).key(), (3, 8));
        assert_eq!(Bond::new(8, 3).key(), Bond::new(3, 8).key());
    }
}
