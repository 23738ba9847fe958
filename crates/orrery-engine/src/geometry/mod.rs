//! CPU-side geometry: vertex batches, primitive topologies and procedural meshes.
//!
//! Everything here is plain data. Upload to the GPU happens in `render::mesh`.

mod batch;
mod primitive;
mod sphere;
mod triangle_batch;
mod vertex;

pub use batch::{Batch, BatchBuilder, BatchError};
pub use primitive::{unique_edges, PrimitiveKind};
pub use sphere::make_sphere;
pub use triangle_batch::TriangleBatch;
pub use vertex::Vertex;
