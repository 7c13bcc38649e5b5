//! Per-frame instance records and the GPU buffers they are packed into.

use awsm_unified_renderer_core::{buffers::BufferUsage, renderer::AwsmRendererWebGpu};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use thiserror::Error;

use crate::{
    buffer::GrowableBuffer,
    debug::AwsmRendererLogging,
    mesh::{AwsmMeshError, MaterialId, MeshRegistry},
};

pub type Result<T> = std::result::Result<T, AwsmInstanceError>;

#[derive(Error, Debug)]
pub enum AwsmInstanceError {
    #[error("[instances] {0}")]
    Mesh(#[from] AwsmMeshError),

    #[error("[instances] {0}")]
    Core(#[from] awsm_unified_renderer_core::error::AwsmCoreError),
}

/// One drawable occurrence of a mesh
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceRecord {
    pub world_transform: Mat4,
    pub material_id: MaterialId,
    pub mesh_id: String,
    pub object_id: u32,
}

/// A run of consecutive records sharing a mesh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderBatch {
    pub mesh_id: String,
    pub instance_count: u32,
    pub first_instance: u32,
}

/// Metadata row as read by the shader, one per instance
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct InstanceMetadata {
    pub material_id: u32,
    pub mesh_index: u32,
    pub object_id: u32,
    _padding: u32,
}

impl InstanceMetadata {
    pub const BYTE_SIZE: usize = 16;

    pub fn new(material_id: MaterialId, mesh_index: u32, object_id: u32) -> Self {
        Self {
            material_id: material_id.index(),
            mesh_index,
            object_id,
            _padding: 0,
        }
    }
}

pub const TRANSFORM_BYTE_SIZE: usize = 64;

/// Groups consecutive records with the same mesh.
/// Records are not reordered, so interleaved meshes produce extra batches
pub fn build_batches(records: &[InstanceRecord]) -> Vec<RenderBatch> {
    let mut batches: Vec<RenderBatch> = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match batches.last_mut() {
            Some(batch) if batch.mesh_id == record.mesh_id => batch.instance_count += 1,
            _ => batches.push(RenderBatch {
                mesh_id: record.mesh_id.clone(),
                instance_count: 1,
                first_instance: index as u32,
            }),
        }
    }

    batches
}

/// Collects instance records between `clear` calls, then packs them into
/// the transform and metadata storage buffers.
///
/// `instance_count` and `batches` describe what was last packed,
/// not what is currently pending.
#[derive(Debug)]
pub struct Instances {
    pending: Vec<InstanceRecord>,
    batches: Vec<RenderBatch>,
    instance_count: usize,
    transforms: Vec<Mat4>,
    metadata: Vec<InstanceMetadata>,
    transform_buffer: GrowableBuffer,
    metadata_buffer: GrowableBuffer,
}

impl Instances {
    pub fn new(floor_bytes: usize) -> Self {
        Self {
            pending: Vec::new(),
            batches: Vec::new(),
            instance_count: 0,
            transforms: Vec::new(),
            metadata: Vec::new(),
            transform_buffer: GrowableBuffer::new(
                "Instance Transforms",
                BufferUsage::new().with_storage(),
                floor_bytes,
            ),
            metadata_buffer: GrowableBuffer::new(
                "Instance Metadata",
                BufferUsage::new().with_storage(),
                floor_bytes / (TRANSFORM_BYTE_SIZE / InstanceMetadata::BYTE_SIZE),
            ),
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn push(&mut self, record: InstanceRecord) {
        self.pending.push(record);
    }

    pub fn pending(&self) -> &[InstanceRecord] {
        &self.pending
    }

    /// CPU side of `update_buffers`: batches and packed rows, no GPU access
    pub fn prepare(&mut self, registry: &MeshRegistry) -> Result<()> {
        let mut transforms = Vec::with_capacity(self.pending.len());
        let mut metadata = Vec::with_capacity(self.pending.len());

        for record in &self.pending {
            let mesh_index = registry.mesh_index(&record.mesh_id)?;
            transforms.push(record.world_transform);
            metadata.push(InstanceMetadata::new(
                record.material_id,
                mesh_index,
                record.object_id,
            ));
        }

        self.batches = build_batches(&self.pending);
        self.instance_count = self.pending.len();
        self.transforms = transforms;
        self.metadata = metadata;

        Ok(())
    }

    pub fn update_buffers(
        &mut self,
        gpu: &AwsmRendererWebGpu,
        registry: &MeshRegistry,
        logging: &AwsmRendererLogging,
    ) -> Result<()> {
        let _maybe_span_guard = if logging.render_timings {
            Some(tracing::span!(tracing::Level::INFO, "Instances GPU write").entered())
        } else {
            None
        };

        self.prepare(registry)?;

        self.transform_buffer
            .write(gpu, bytemuck::cast_slice(&self.transforms))?;
        self.metadata_buffer
            .write(gpu, bytemuck::cast_slice(&self.metadata))?;

        Ok(())
    }

    pub fn instance_count(&self) -> usize {
        self.instance_count
    }

    pub fn batches(&self) -> &[RenderBatch] {
        &self.batches
    }

    pub fn transform_data(&self) -> &[Mat4] {
        &self.transforms
    }

    pub fn metadata(&self) -> &[InstanceMetadata] {
        &self.metadata
    }

    pub fn transform_buffer(&self) -> &GrowableBuffer {
        &self.transform_buffer
    }

    pub fn metadata_buffer(&self) -> &GrowableBuffer {
        &self.metadata_buffer
    }

    pub fn dispose(&mut self) {
        self.transform_buffer.destroy();
        self.metadata_buffer.destroy();
        self.pending.clear();
        self.batches.clear();
        self.transforms.clear();
        self.metadata.clear();
        self.instance_count = 0;
    }
}
