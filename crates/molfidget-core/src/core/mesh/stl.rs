//! Binary STL export through `stl_io`.

use super::traits::MeshFile;
use super::trimesh::TriMesh;
use nalgebra::{Point3, Vector3};
use std::io::{self, Write};
use stl_io::{Normal, Triangle, Vertex};

fn to_f32(v: &Vector3<f64>) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

fn vertex(p: &Point3<f64>) -> Vertex {
    Vertex::new(to_f32(&p.coords))
}

pub struct StlFile;

impl MeshFile for StlFile {
    const EXTENSION: &'static str = "stl";

    fn write_to(mesh: &TriMesh, writer: &mut impl Write) -> io::Result<()> {
        if u32::try_from(mesh.triangle_count()).is_err() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "mesh has too many triangles for binary STL",
            ));
        }

        let triangles = (0..mesh.triangle_count())
            .map(|t| {
                let corners = mesh.triangle_vertices(t).ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("triangle {} references a missing vertex", t),
                    )
                })?;
                Ok(Triangle {
                    normal: Normal::new(to_f32(&mesh.face_normal(t))),
                    vertices: corners.map(|c| vertex(&c)),
                })
            })
            .collect::<io::Result<Vec<Triangle>>>()?;

        stl_io::write_stl(writer, triangles.iter())
    }
}
