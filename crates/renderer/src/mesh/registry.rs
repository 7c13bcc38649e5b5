use std::ops::Range;

use indexmap::IndexMap;

use super::{
    error::{AwsmMeshError, Result},
    material::{MaterialData, MaterialId},
};

/// Where a mesh lives inside the combined vertex and index arrays.
///
/// Offsets are in elements, not bytes: `vertex_offset` counts vertices
/// (3 floats each) and `index_offset` counts indices. Index values stay local
/// to the mesh, and are rebased at draw time with `base_vertex`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshDefinition {
    pub id: String,
    pub vertex_offset: u32,
    pub vertex_count: u32,
    pub index_offset: u32,
    pub index_count: u32,
}

impl MeshDefinition {
    pub const COMPONENTS_PER_VERTEX: usize = 3;

    pub fn is_indexed(&self) -> bool {
        self.index_count > 0
    }

    // offset into the combined float array
    pub fn vertex_float_offset(&self) -> usize {
        self.vertex_offset as usize * Self::COMPONENTS_PER_VERTEX
    }

    // registration rejects offsets past i32::MAX
    pub fn base_vertex(&self) -> i32 {
        self.vertex_offset as i32
    }

    pub fn vertex_float_range(&self) -> Range<usize> {
        let start = self.vertex_float_offset();
        start..start + self.vertex_count as usize * Self::COMPONENTS_PER_VERTEX
    }

    pub fn index_range(&self) -> Range<usize> {
        let start = self.index_offset as usize;
        start..start + self.index_count as usize
    }
}

/// Append-only store of every mesh and material known to the renderer.
///
/// All vertices end up in one float array and all indices in one u32 array,
/// which is what lets every mesh share a single vertex and index buffer.
/// Registration order is preserved and is also the order instances get
/// grouped in.
#[derive(Debug, Default)]
pub struct MeshRegistry {
    meshes: IndexMap<String, MeshDefinition>,
    vertices: Vec<f32>,
    indices: Vec<u32>,
    materials: Vec<MaterialData>,
    version: u64,
}

impl MeshRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_mesh(
        &mut self,
        id: impl Into<String>,
        vertices: &[f32],
        indices: &[u32],
    ) -> Result<MeshDefinition> {
        let id = id.into();

        if self.meshes.contains_key(&id) {
            return Err(AwsmMeshError::DuplicateMesh(id));
        }
        if vertices.is_empty() {
            return Err(AwsmMeshError::EmptyVertices(id));
        }
        if vertices.len() % MeshDefinition::COMPONENTS_PER_VERTEX != 0 {
            return Err(AwsmMeshError::VertexStride {
                id,
                len: vertices.len(),
            });
        }

        let Ok(vertex_count) = u32::try_from(vertices.len() / MeshDefinition::COMPONENTS_PER_VERTEX)
        else {
            return Err(AwsmMeshError::Overflow(id));
        };

        if let Some(&index) = indices.iter().find(|&&index| index >= vertex_count) {
            return Err(AwsmMeshError::IndexOutOfRange {
                id,
                index,
                vertex_count,
            });
        }

        let total_vertices = self.vertices.len() / MeshDefinition::COMPONENTS_PER_VERTEX;
        let (Ok(vertex_offset), Ok(index_offset), Ok(index_count)) = (
            u32::try_from(total_vertices),
            u32::try_from(self.indices.len()),
            u32::try_from(indices.len()),
        ) else {
            return Err(AwsmMeshError::Overflow(id));
        };

        if i32::try_from(vertex_offset).is_err() {
            return Err(AwsmMeshError::Overflow(id));
        }

        let definition = MeshDefinition {
            id: id.clone(),
            vertex_offset,
            vertex_count,
            index_offset,
            index_count,
        };

        self.vertices.extend_from_slice(vertices);
        self.indices.extend_from_slice(indices);
        self.meshes.insert(id, definition.clone());
        self.version += 1;

        tracing::debug!(
            "registered mesh {}: {} vertices, {} indices",
            definition.id,
            vertex_count,
            index_count
        );

        Ok(definition)
    }

    pub fn register_material(&mut self, material: MaterialData) -> MaterialId {
        let id = MaterialId::new(self.materials.len() as u32);
        self.materials.push(material);
        self.version += 1;
        id
    }

    pub fn get_mesh(&self, id: &str) -> Option<&MeshDefinition> {
        self.meshes.get(id)
    }

    pub fn mesh(&self, id: &str) -> Result<&MeshDefinition> {
        self.meshes
            .get(id)
            .ok_or_else(|| AwsmMeshError::MeshNotFound(id.to_string()))
    }

    /// Registration position, used to identify the mesh on the GPU side
    pub fn mesh_index(&self, id: &str) -> Result<u32> {
        self.meshes
            .get_index_of(id)
            .map(|index| index as u32)
            .ok_or_else(|| AwsmMeshError::MeshNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.meshes.contains_key(id)
    }

    pub fn material(&self, id: MaterialId) -> Result<&MaterialData> {
        self.materials
            .get(id.index() as usize)
            .ok_or(AwsmMeshError::MaterialNotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &MeshDefinition> {
        self.meshes.values()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn vertices_of(&self, id: &str) -> Result<&[f32]> {
        let mesh = self.mesh(id)?;
        Ok(&self.vertices[mesh.vertex_float_range()])
    }

    pub fn indices_of(&self, id: &str) -> Result<&[u32]> {
        let mesh = self.mesh(id)?;
        Ok(&self.indices[mesh.index_range()])
    }

    pub fn combined_vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn combined_indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn material_data(&self) -> &[MaterialData] {
        &self.materials
    }

    /// Bumped on every registration, so uploads can skip unchanged data
    pub fn version(&self) -> u64 {
        self.version
    }
}
