use super::trimesh::TriMesh;
use crate::core::utils::geometry::orthonormal_frame;
use nalgebra::{Point3, Unit, Vector3};
use std::f64::consts::{PI, TAU};

/// Builds a closed UV sphere.
///
/// `segments` is the number of meridians; the sphere gets `segments / 2`
/// latitude bands (at least two). Returns an empty mesh for a non-positive
/// radius or fewer than three segments.
pub fn uv_sphere(center: Point3<f64>, radius: f64, segments: u32) -> TriMesh {
    if radius <= 0.0 || segments < 3 {
        return TriMesh::new();
    }
    let bands = (segments / 2).max(2);
    let mut mesh = TriMesh::new();

    mesh.vertices.push(center + Vector3::z() * radius);
    for band in 1..bands {
        let theta = PI * band as f64 / bands as f64;
        for seg in 0..segments {
            let phi = TAU * seg as f64 / segments as f64;
            let dir = Vector3::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos());
            mesh.vertices.push(center + dir * radius);
        }
    }
    mesh.vertices.push(center - Vector3::z() * radius);

    let north = 0u32;
    let south = (mesh.vertices.len() - 1) as u32;
    let ring = |band: u32, seg: u32| 1 + band * segments + seg % segments;

    for seg in 0..segments {
        mesh.triangles.push([north, ring(0, seg), ring(0, seg + 1)]);
    }
    for band in 0..bands - 2 {
        for seg in 0..segments {
            let upper = ring(band, seg);
            let upper_next = ring(band, seg + 1);
            let lower = ring(band + 1, seg);
            let lower_next = ring(band + 1, seg + 1);
            mesh.triangles.push([upper, lower, lower_next]);
            mesh.triangles.push([upper, lower_next, upper_next]);
        }
    }
    let last = bands - 2;
    for seg in 0..segments {
        mesh.triangles.push([ring(last, seg), south, ring(last, seg + 1)]);
    }
    mesh
}

/// Builds a closed cylinder between two points, capped at both ends.
///
/// Returns an empty mesh when the points coincide, the radius is not
/// positive, or there are fewer than three segments.
pub fn capped_cylinder(
    start: Point3<f64>,
    end: Point3<f64>,
    radius: f64,
    segments: u32,
) -> TriMesh {
    let Some(axis) = Unit::try_new(end - start, f64::EPSILON) else {
        return TriMesh::new();
    };
    if radius <= 0.0 || segments < 3 {
        return TriMesh::new();
    }
    let (u, v) = orthonormal_frame(&axis);
    let mut mesh = TriMesh::new();

    for base in [start, end] {
        for seg in 0..segments {
            let phi = TAU * seg as f64 / segments as f64;
            mesh.vertices
                .push(base + (u * phi.cos() + v * phi.sin()) * radius);
        }
    }
    let bottom_center = mesh.vertices.len() as u32;
    mesh.vertices.push(start);
    let top_center = bottom_center + 1;
    mesh.vertices.push(end);

    let bottom = |seg: u32| seg % segments;
    let top = |seg: u32| segments + seg % segments;

    for seg in 0..segments {
        mesh.triangles
            .push([bottom(seg), bottom(seg + 1), top(seg + 1)]);
        mesh.triangles.push([bottom(seg), top(seg + 1), top(seg)]);
        mesh.triangles
            .push([bottom_center, bottom(seg + 1), bottom(seg)]);
        mesh.triangles.push([top_center, top(seg), top(seg + 1)]);
    }
    mesh
}
