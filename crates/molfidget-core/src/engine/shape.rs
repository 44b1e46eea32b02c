use super::config::{ConfigError, ShapeConfig};
use crate::core::mesh::primitives::{capped_cylinder, uv_sphere};
use crate::core::mesh::trimesh::TriMesh;
use crate::core::models::molecule::{AtomGroup, Molecule};
use crate::core::utils::geometry::{centroid, split_distance};
use nalgebra::{Point3, Unit};

/// Name of the piece for the atom at `index`, e.g. `C_1` for the first atom.
pub fn atom_piece_name(molecule: &Molecule, index: usize) -> String {
    let element = molecule
        .atom(index)
        .map(|atom| atom.element.as_str())
        .unwrap_or("X");
    format!("{}_{}", element, index + 1)
}

/// Name of the piece for the group at `index`, e.g. `group_1_CH3`.
pub fn group_piece_name(index: usize, group: &AtomGroup) -> String {
    format!("group_{}_{}", index + 1, group.formula)
}

/// Builds printable pieces of a molecule.
///
/// Geometry is laid out in Angstroms around the molecule's centroid and
/// scaled by [`ShapeConfig::scale`] as each piece is finished.
pub struct ShapeBuilder<'a> {
    molecule: &'a Molecule,
    config: &'a ShapeConfig,
    origin: Point3<f64>,
}

impl<'a> ShapeBuilder<'a> {
    pub fn new(molecule: &'a Molecule, config: &'a ShapeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let positions: Vec<Point3<f64>> = molecule.atoms().iter().map(|a| a.position).collect();
        Ok(Self {
            molecule,
            config,
            origin: centroid(&positions).unwrap_or_else(Point3::origin),
        })
    }

    /// A single atom printed on its own: every bond leaves a gap.
    pub fn atom_piece(&self, index: usize) -> TriMesh {
        let mut mesh = self.atom_mesh(index, |_| false);
        mesh.scale(self.config.scale);
        mesh
    }

    /// All atoms of a merged group as one piece. Bonds inside the group are
    /// closed; bonds leaving it keep the gap.
    pub fn group_piece(&self, group: &AtomGroup) -> TriMesh {
        let mut mesh = TriMesh::new();
        for &index in &group.atom_indices {
            mesh.append(&self.atom_mesh(index, |partner| group.contains(partner)));
        }
        mesh.scale(self.config.scale);
        mesh
    }

    fn radius(&self, index: usize) -> f64 {
        self.molecule
            .atom(index)
            .map_or(0.0, |atom| atom.vdw_radius() * self.config.atom_radius_scale)
    }

    fn local_position(&self, index: usize) -> Option<Point3<f64>> {
        self.molecule
            .atom(index)
            .map(|atom| Point3::from(atom.position - self.origin))
    }

    fn atom_mesh(&self, index: usize, same_piece: impl Fn(usize) -> bool) -> TriMesh {
        let Some(center) = self.local_position(index) else {
            return TriMesh::new();
        };
        let mut mesh = uv_sphere(center, self.radius(index), self.config.sphere_segments);
        for (start, end) in self.half_shafts(index, same_piece) {
            mesh.append(&capped_cylinder(
                start,
                end,
                self.config.shaft_radius,
                self.config.shaft_segments,
            ));
        }
        mesh
    }

    /// Start and end points, in unscaled local coordinates, of the half-shafts
    /// owned by the atom at `index`.
    pub(crate) fn half_shafts(
        &self,
        index: usize,
        same_piece: impl Fn(usize) -> bool,
    ) -> Vec<(Point3<f64>, Point3<f64>)> {
        let Some(center) = self.local_position(index) else {
            return Vec::new();
        };
        let own_radius = self.radius(index);

        self.molecule
            .neighbors(index)
            .iter()
            .filter_map(|&partner| {
                let partner_center = self.local_position(partner)?;
                let bond = partner_center - center;
                let distance = bond.norm();
                let axis = Unit::try_new(bond, f64::EPSILON)?;
                let gap = if same_piece(partner) {
                    0.0
                } else {
                    self.config.shaft_gap
                };
                let length =
                    split_distance(distance, own_radius, self.radius(partner)) - gap / 2.0;
                (length > 0.0).then(|| (center, center + axis.as_ref() * length))
            })
            .collect()
    }
}
