use nalgebra::{Point3, Vector3};

/// An indexed triangle mesh.
///
/// Triangles wind counter-clockwise when seen from outside, so face normals
/// computed from them point outwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    pub vertices: Vec<Point3<f64>>,
    pub triangles: Vec<[u32; 3]>,
}

impl TriMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Appends another mesh, offsetting its indices.
    pub fn append(&mut self, other: &TriMesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|[a, b, c]| [a + offset, b + offset, c + offset]),
        );
    }

    /// Concatenates several meshes into one.
    pub fn concatenate<'a>(meshes: impl IntoIterator<Item = &'a TriMesh>) -> TriMesh {
        let mut combined = TriMesh::new();
        for mesh in meshes {
            combined.append(mesh);
        }
        combined
    }

    /// Multiplies every vertex coordinate by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.vertices {
            v.coords *= factor;
        }
    }

    /// Returns the three corner positions of a triangle.
    pub fn triangle_vertices(&self, triangle: usize) -> Option<[Point3<f64>; 3]> {
        let [a, b, c] = *self.triangles.get(triangle)?;
        Some([
            *self.vertices.get(a as usize)?,
            *self.vertices.get(b as usize)?,
            *self.vertices.get(c as usize)?,
        ])
    }

    /// Unit face normal of a triangle; zero for degenerate triangles.
    pub fn face_normal(&self, triangle: usize) -> Vector3<f64> {
        self.triangle_vertices(triangle)
            .and_then(|[a, b, c]| (b - a).cross(&(c - a)).try_normalize(f64::EPSILON))
            .unwrap_or_else(Vector3::zeros)
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), v| (lo.inf(v), hi.sup(v))),
        )
    }

    /// Signed volume via the divergence theorem. Positive for closed,
    /// outward-wound meshes.
    #[cfg(test)]
    pub(crate) fn signed_volume(&self) -> f64 {
        (0..self.triangles.len())
            .filter_map(|t| self.triangle_vertices(t))
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)) / 6.0)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> TriMesh {
        TriMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            triangles: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn append_offsets_indices() {
        let mut mesh = unit_triangle();
        mesh.append(&unit_triangle());
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangles, vec![[0, 1, 2], [3, 4, 5]]);
    }

    #[test]
    fn concatenate_of_nothing_is_empty() {
        let mesh = TriMesh::concatenate(std::iter::empty());
        assert!(mesh.is_empty());
        assert!(mesh.bounds().is_none());
    }

    #[test]
    fn face_normal_follows_winding() {
        let mesh = unit_triangle();
        assert_eq!(mesh.face_normal(0), Vector3::z());
        assert_eq!(mesh.face_normal(5), Vector3::zeros());
    }

    #[test]
    fn scale_grows_bounds() {
        let mut mesh = unit_triangle();
        mesh.scale(10.0);
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, Point3::origin());
        assert_eq!(hi, Point3::new(10.0, 10.0, 0.0));
    }
}
