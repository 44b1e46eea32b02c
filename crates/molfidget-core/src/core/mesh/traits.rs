use super::trimesh::TriMesh;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Defines the interface for encoding a triangle mesh into a file format.
pub trait MeshFile {
    /// Conventional file extension, without the leading dot.
    const EXTENSION: &'static str;

    /// Writes a mesh to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh cannot be represented in the format or
    /// the writer fails.
    fn write_to(mesh: &TriMesh, writer: &mut impl Write) -> io::Result<()>;

    /// Writes a mesh to a file path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(mesh: &TriMesh, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(mesh, &mut writer)?;
        writer.flush()
    }
}
