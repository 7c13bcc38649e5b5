//! The shared vertex, index and material buffers every mesh draws from.

use awsm_unified_renderer_core::{
    buffers::BufferUsage, command::render_pass::RenderPassEncoder, error::AwsmCoreError,
    pipeline::primitive::IndexFormat, renderer::AwsmRendererWebGpu,
};
use thiserror::Error;

use crate::{
    buffer::GrowableBuffer,
    config::BufferFloors,
    debug::AwsmRendererLogging,
    draw::DrawCall,
    mesh::{AwsmMeshError, MeshRegistry},
};

pub type Result<T> = std::result::Result<T, AwsmGeometryError>;

#[derive(Error, Debug)]
pub enum AwsmGeometryError {
    #[error("[geometry] buffers have been disposed")]
    Disposed,

    #[error("[geometry] {0} buffer has not been uploaded yet")]
    NotUploaded(&'static str),

    #[error("[geometry] {0}")]
    Mesh(#[from] AwsmMeshError),

    #[error("[geometry] {0:?}")]
    Core(#[from] AwsmCoreError),
}

pub struct GeometryBuffers {
    vertex: GrowableBuffer,
    index: GrowableBuffer,
    material: GrowableBuffer,
    uploaded_version: Option<u64>,
    disposed: bool,
}

impl GeometryBuffers {
    pub fn new(floors: &BufferFloors) -> Self {
        Self {
            vertex: GrowableBuffer::new(
                "Geometry Vertices",
                BufferUsage::new().with_vertex(),
                floors.vertex_bytes,
            ),
            index: GrowableBuffer::new(
                "Geometry Indices",
                BufferUsage::new().with_index(),
                floors.index_bytes,
            ),
            material: GrowableBuffer::new(
                "Materials",
                BufferUsage::new().with_storage(),
                floors.material_bytes,
            ),
            uploaded_version: None,
            disposed: false,
        }
    }

    pub fn needs_upload(&self, registry: &MeshRegistry) -> bool {
        self.uploaded_version != Some(registry.version())
    }

    /// Writes the registry's combined arrays, replacing whatever was there.
    /// Buffers are grown first if the data no longer fits
    pub fn upload(
        &mut self,
        gpu: &AwsmRendererWebGpu,
        registry: &MeshRegistry,
        logging: &AwsmRendererLogging,
    ) -> Result<()> {
        if self.disposed {
            return Err(AwsmGeometryError::Disposed);
        }

        let _maybe_span_guard = if logging.render_timings {
            Some(tracing::span!(tracing::Level::INFO, "Geometry GPU write").entered())
        } else {
            None
        };

        self.vertex
            .write(gpu, bytemuck::cast_slice(registry.combined_vertices()))?;
        self.index
            .write(gpu, bytemuck::cast_slice(registry.combined_indices()))?;
        self.material
            .write(gpu, bytemuck::cast_slice(registry.material_data()))?;

        self.uploaded_version = Some(registry.version());

        Ok(())
    }

    /// Returns true if anything was uploaded
    pub fn upload_if_changed(
        &mut self,
        gpu: &AwsmRendererWebGpu,
        registry: &MeshRegistry,
        logging: &AwsmRendererLogging,
    ) -> Result<bool> {
        if !self.needs_upload(registry) {
            return Ok(false);
        }
        self.upload(gpu, registry, logging)?;
        Ok(true)
    }

    pub fn bind(&self, render_pass: &RenderPassEncoder) -> Result<()> {
        self.ensure_usable()?;

        let vertex = self
            .vertex
            .gpu_buffer()
            .ok_or(AwsmGeometryError::NotUploaded("vertex"))?;
        let index = self
            .index
            .gpu_buffer()
            .ok_or(AwsmGeometryError::NotUploaded("index"))?;

        render_pass.set_vertex_buffer(0, vertex, None, None);
        render_pass.set_index_buffer(index, IndexFormat::Uint32, None, None);

        Ok(())
    }

    /// The draw that `draw_mesh` would encode, without touching the GPU
    pub fn draw_call(
        &self,
        registry: &MeshRegistry,
        mesh_id: &str,
        instance_count: u32,
        first_instance: u32,
    ) -> Result<DrawCall> {
        self.ensure_usable()?;
        if self.uploaded_version.is_none() {
            return Err(AwsmGeometryError::NotUploaded("vertex"));
        }

        let mesh = registry.mesh(mesh_id)?;
        Ok(DrawCall::for_mesh(mesh, instance_count, first_instance))
    }

    pub fn draw_mesh(
        &self,
        render_pass: &RenderPassEncoder,
        registry: &MeshRegistry,
        mesh_id: &str,
        instance_count: u32,
        first_instance: u32,
    ) -> Result<DrawCall> {
        let call = self.draw_call(registry, mesh_id, instance_count, first_instance)?;
        call.encode(render_pass);
        Ok(call)
    }

    pub fn vertex_buffer(&self) -> &GrowableBuffer {
        &self.vertex
    }

    pub fn index_buffer(&self) -> &GrowableBuffer {
        &self.index
    }

    pub fn material_buffer(&self) -> &GrowableBuffer {
        &self.material
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Releases all three buffers. Returns false if already disposed
    pub fn dispose(&mut self) -> bool {
        if self.disposed {
            return false;
        }

        self.vertex.destroy();
        self.index.destroy();
        self.material.destroy();
        self.uploaded_version = None;
        self.disposed = true;

        true
    }

    fn ensure_usable(&self) -> Result<()> {
        if self.disposed {
            Err(AwsmGeometryError::Disposed)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> MeshRegistry {
        let mut registry = MeshRegistry::new();
        registry
            .register_mesh("tri", &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2])
            .unwrap();
        registry
    }

    #[test]
    fn new_registry_needs_upload() {
        let geometry = GeometryBuffers::new(&BufferFloors::default());
        let registry = MeshRegistry::new();
        assert!(geometry.needs_upload(&registry));
    }

    #[test]
    fn draw_before_upload_fails() {
        let geometry = GeometryBuffers::new(&BufferFloors::default());
        assert!(matches!(
            geometry.draw_call(&registry(), "tri", 1, 0),
            Err(AwsmGeometryError::NotUploaded(_))
        ));
    }

    #[test]
    fn dispose_is_idempotent() {
        let mut geometry = GeometryBuffers::new(&BufferFloors::default());
        assert!(geometry.dispose());
        assert!(!geometry.dispose());
        assert!(geometry.is_disposed());
        assert!(geometry.vertex_buffer().gpu_buffer().is_none());
        assert!(matches!(
            geometry.draw_call(&registry(), "tri", 1, 0),
            Err(AwsmGeometryError::Disposed)
        ));
    }
}
