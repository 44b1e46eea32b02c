//! Binary little-endian PLY export through `ply-rs`.

use super::traits::MeshFile;
use super::trimesh::TriMesh;
use ply_rs::ply::{
    Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
    ScalarType,
};
use ply_rs::writer::Writer;
use std::io::{self, Write};

const VERTEX: &str = "vertex";
const FACE: &str = "face";
const VERTEX_INDICES: &str = "vertex_indices";

fn header(ply: &mut Ply<DefaultElement>) {
    ply.header.encoding = Encoding::BinaryLittleEndian;
    ply.header.comments.push("written by molfidget".to_string());

    let mut vertex = ElementDef::new(VERTEX.to_string());
    for axis in ["x", "y", "z"] {
        vertex.properties.add(PropertyDef::new(
            axis.to_string(),
            PropertyType::Scalar(ScalarType::Float),
        ));
    }
    ply.header.elements.add(vertex);

    let mut face = ElementDef::new(FACE.to_string());
    face.properties.add(PropertyDef::new(
        VERTEX_INDICES.to_string(),
        PropertyType::List(ScalarType::UChar, ScalarType::Int),
    ));
    ply.header.elements.add(face);
}

pub struct PlyFile;

impl MeshFile for PlyFile {
    const EXTENSION: &'static str = "ply";

    fn write_to(mesh: &TriMesh, writer: &mut impl Write) -> io::Result<()> {
        let mut ply = Ply::<DefaultElement>::new();
        header(&mut ply);

        let vertices = mesh
            .vertices
            .iter()
            .map(|v| {
                let mut element = DefaultElement::new();
                element.insert("x".to_string(), Property::Float(v.x as f32));
                element.insert("y".to_string(), Property::Float(v.y as f32));
                element.insert("z".to_string(), Property::Float(v.z as f32));
                element
            })
            .collect();

        let faces = mesh
            .triangles
            .iter()
            .map(|triangle| {
                let indices = triangle
                    .iter()
                    .map(|&i| i32::try_from(i))
                    .collect::<Result<Vec<i32>, _>>()
                    .map_err(|_| {
                        io::Error::new(
                            io::ErrorKind::InvalidInput,
                            "vertex index exceeds PLY int range",
                        )
                    })?;
                let mut element = DefaultElement::new();
                element.insert(VERTEX_INDICES.to_string(), Property::ListInt(indices));
                Ok(element)
            })
            .collect::<io::Result<Vec<DefaultElement>>>()?;

        ply.payload.insert(VERTEX.to_string(), vertices);
        ply.payload.insert(FACE.to_string(), faces);
        ply.make_consistent().map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("inconsistent PLY: {:?}", e))
        })?;

        Writer::new().write_ply(writer, &mut ply)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use ply_rs::parser::Parser;
    use std::io::Cursor;

    #[test]
    fn write_to_emits_binary_ply_that_reads_back() {
        let mesh = TriMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            triangles: vec![[0, 1, 2]],
        };
        let mut bytes = Vec::new();
        PlyFile::write_to(&mesh, &mut bytes).unwrap();
        assert!(bytes.starts_with(b"ply\nformat binary_little_endian 1.0\n"));

        let read = Parser::<DefaultElement>::new()
            .read_ply(&mut Cursor::new(&bytes))
            .unwrap();
        assert_eq!(read.payload[VERTEX].len(), 3);
        assert_eq!(read.payload[VERTEX][1]["x"], Property::Float(1.0));
        assert_eq!(read.payload[FACE].len(), 1);
        assert_eq!(
            read.payload[FACE][0][VERTEX_INDICES],
            Property::ListInt(vec![0, 1, 2])
        );
    }

    #[test]
    fn empty_mesh_still_has_a_header() {
        let mut bytes = Vec::new();
        PlyFile::write_to(&TriMesh::new(), &mut bytes).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("element vertex 0\n"));
        assert!(text.contains("element face 0\n"));
        assert!(text.ends_with("end_header\n"));
    }
}
