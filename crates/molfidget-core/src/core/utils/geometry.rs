use nalgebra::{Point3, Unit, Vector3};

/// Returns two unit vectors that, together with `axis`, form a right-handed
/// orthonormal frame.
pub fn orthonormal_frame(axis: &Unit<Vector3<f64>>) -> (Vector3<f64>, Vector3<f64>) {
    let helper = if axis.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = (helper - axis.as_ref() * axis.dot(&helper)).normalize();
    let v = axis.cross(&u);
    (u, v)
}

/// Distance from atom `a` to the point where its bond to `b` is split
/// between the two pieces: halfway across the exposed part of the bond.
///
/// The result is clamped to `[0, distance]` so overlapping spheres still get
/// a split point on the bond.
pub fn split_distance(distance: f64, radius_a: f64, radius_b: f64) -> f64 {
    let exposed = distance - radius_a - radius_b;
    (radius_a + exposed / 2.0).clamp(0.0, distance.max(0.0))
}

pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}
