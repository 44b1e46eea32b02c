//! Triangle meshes and the file formats they are exported to.
//!
//! Pieces are unions of closed spheres and cylinders stored as one indexed
//! triangle list. No boolean operations are performed; the encoders write the
//! list as-is.

pub mod ply;
pub mod primitives;
pub mod stl;
pub mod traits;
pub mod trimesh;
