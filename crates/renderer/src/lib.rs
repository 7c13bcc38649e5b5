//! A unified WebGPU renderer: every mesh lives in one shared vertex/index buffer,
//! every instance in one transform/metadata buffer, and each frame is drawn with
//! a single pipeline and bind group, switching to indirect draws as instance counts grow.

pub mod bind_groups;
pub mod buffer;
pub mod camera;
pub mod config;
pub mod debug;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod instances;
pub mod mesh;
pub mod physics;
pub mod pipeline;
pub mod render;
pub mod scene;
pub mod shaders;
pub mod transform;

pub mod core {
    pub use awsm_unified_renderer_core::*;
}

use awsm_unified_renderer_core::buffers::BufferUsage;
use strum::EnumCount;
use bind_groups::{BoundBuffer, UnifiedBindGroup};
use buffer::GrowableBuffer;
use camera::{CameraBuffer, ViewProjection};
use config::RendererConfig;
use debug::AwsmRendererLogging;
use error::{AwsmError, Result};
use geometry::GeometryBuffers;
use instances::Instances;
use mesh::{MaterialData, MaterialId, MeshDefinition, MeshRegistry};
use physics::{PhysicsSync, PhysicsWorld};
use render::{textures::DepthTexture, FrameStats};
use scene::Scene;

/// Lifecycle of an `AwsmRenderer`
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum RendererState {
    /// GPU context and pipeline exist, the bind group does not yet
    Initialized,
    Ready,
    Disposed,
}

pub struct AwsmRenderer {
    pub gpu: core::renderer::AwsmRendererWebGpu,
    pub config: RendererConfig,
    pub logging: AwsmRendererLogging,
    pub meshes: MeshRegistry,
    pub geometry: GeometryBuffers,
    pub instances: Instances,
    pub camera: CameraBuffer,
    pipeline: web_sys::GpuRenderPipeline,
    bind_group: UnifiedBindGroup,
    indirect_buffer: GrowableBuffer,
    depth_texture: DepthTexture,
    indirect_supported: bool,
    disposed: bool,
}

impl AwsmRenderer {
    pub fn register_mesh(
        &mut self,
        id: impl Into<String>,
        vertices: &[f32],
        indices: &[u32],
    ) -> Result<MeshDefinition> {
        Ok(self.meshes.register_mesh(id, vertices, indices)?)
    }

    pub fn register_material(&mut self, material: MaterialData) -> MaterialId {
        self.meshes.register_material(material)
    }

    /// Uploads the registry if it changed since the last upload
    pub fn upload_geometry(&mut self) -> Result<bool> {
        self.ensure_not_disposed()?;
        Ok(self
            .geometry
            .upload_if_changed(&self.gpu, &self.meshes, &self.logging)?)
    }

    /// Packs whatever was pushed into `instances` since its last `clear`
    pub fn update_instance_buffers(&mut self) -> Result<()> {
        self.ensure_not_disposed()?;
        Ok(self
            .instances
            .update_buffers(&self.gpu, &self.meshes, &self.logging)?)
    }

    pub fn set_view_projection(&mut self, view: glam::Mat4, projection: glam::Mat4) {
        self.camera.update(ViewProjection::new(view, projection));
    }

    /// See `ViewProjection::from_shared_block` for the expected layout
    pub fn set_view_projection_from_shared(&mut self, block: &[f32], byte_offset: usize) -> Result<()> {
        let view_projection = ViewProjection::from_shared_block(block, byte_offset)?;
        self.camera.update(view_projection);
        Ok(())
    }

    /// Builds the bind group against the current buffers.
    /// Geometry and instance buffers must have been uploaded at least once
    pub fn update_bind_group(&mut self) -> Result<()> {
        self.ensure_not_disposed()?;
        self.camera.write_gpu(&self.gpu, &self.logging)?;

        let buffers = [
            self.camera.gpu_buffer(),
            self.instances.transform_buffer(),
            self.instances.metadata_buffer(),
            self.geometry.material_buffer(),
        ];
        self.bind_group.recreate(&self.gpu, buffers)?;

        Ok(())
    }

    /// True if any bound buffer was reallocated since the bind group was built
    pub fn bind_group_is_stale(&self) -> bool {
        self.bind_group.is_stale(self.bound_buffers())
    }

    /// Runs one whole frame: physics, transforms, instances, uploads, then render
    pub fn update_frame(
        &mut self,
        scene: &mut Scene,
        world: &mut impl PhysicsWorld,
        sync: &mut PhysicsSync,
    ) -> Result<FrameStats> {
        self.ensure_not_disposed()?;

        sync.sync(scene, world)?;
        scene.populate_instances(&self.meshes, &mut self.instances)?;

        self.upload_geometry()?;
        self.update_instance_buffers()?;

        if self.bind_group.bind_group().is_none() {
            self.update_bind_group()?;
        }

        self.render()
    }

    pub fn state(&self) -> RendererState {
        if self.disposed {
            RendererState::Disposed
        } else if self.bind_group.bind_group().is_some() {
            RendererState::Ready
        } else {
            RendererState::Initialized
        }
    }

    pub fn indirect_supported(&self) -> bool {
        self.indirect_supported
    }

    /// Releases every GPU resource. Safe to call more than once
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }

        self.geometry.dispose();
        self.instances.dispose();
        self.camera.destroy();
        self.indirect_buffer.destroy();
        self.depth_texture.destroy();
        self.bind_group.clear();
        self.disposed = true;

        tracing::info!("renderer disposed");
    }

    fn bound_buffers(&self) -> [&GrowableBuffer; BoundBuffer::COUNT] {
        [
            self.camera.gpu_buffer(),
            self.instances.transform_buffer(),
            self.instances.metadata_buffer(),
            self.geometry.material_buffer(),
        ]
    }

    fn ensure_not_disposed(&self) -> Result<()> {
        if self.disposed {
            Err(AwsmError::Disposed)
        } else {
            Ok(())
        }
    }
}

const INDIRECT_FIRST_INSTANCE: &str = "indirect-first-instance";

pub struct AwsmRendererBuilder {
    gpu: core::renderer::AwsmRendererWebGpuBuilder,
    config: RendererConfig,
    logging: AwsmRendererLogging,
}

impl AwsmRendererBuilder {
    pub fn new(gpu: web_sys::Gpu, canvas: web_sys::HtmlCanvasElement) -> Self {
        Self {
            gpu: core::renderer::AwsmRendererWebGpuBuilder::new(gpu, canvas)
                .with_optional_feature(INDIRECT_FIRST_INSTANCE),
            config: RendererConfig::default(),
            logging: AwsmRendererLogging::default(),
        }
    }

    pub fn with_config(mut self, config: RendererConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_logging(mut self, logging: AwsmRendererLogging) -> Self {
        self.logging = logging;
        self
    }

    pub async fn build(self) -> Result<AwsmRenderer> {
        self.config.validate()?;

        let gpu = self.gpu.build().await?;
        let bind_group = UnifiedBindGroup::new(&gpu)?;
        let pipeline =
            pipeline::create_unified_pipeline(&gpu, &bind_group.layout, &self.config).await?;

        let indirect_supported = gpu.has_feature(INDIRECT_FIRST_INSTANCE);
        if !indirect_supported {
            tracing::warn!("{INDIRECT_FIRST_INSTANCE} unavailable, all frames will draw directly");
        }

        let floors = &self.config.buffer_floors;

        Ok(AwsmRenderer {
            geometry: GeometryBuffers::new(floors),
            instances: Instances::new(floors.instance_bytes),
            indirect_buffer: GrowableBuffer::new(
                "Indirect Draws",
                BufferUsage::new().with_indirect(),
                draw::INDIRECT_COMMAND_STRIDE * 64,
            ),
            camera: CameraBuffer::new(),
            meshes: MeshRegistry::new(),
            depth_texture: DepthTexture::new(pipeline::DEPTH_FORMAT),
            gpu,
            config: self.config,
            logging: self.logging,
            pipeline,
            bind_group,
            indirect_supported,
            disposed: false,
        })
    }
}
