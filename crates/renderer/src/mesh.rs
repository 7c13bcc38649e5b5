pub mod error;
pub mod material;
pub mod registry;

pub use error::{AwsmMeshError, Result};
pub use material::{MaterialData, MaterialId};
pub use registry::{MeshDefinition, MeshRegistry};

#[cfg(test)]
mod tests;
