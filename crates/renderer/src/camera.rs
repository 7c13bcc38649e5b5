use awsm_unified_renderer_core::{buffers::BufferUsage, renderer::AwsmRendererWebGpu};
use glam::Mat4;
use thiserror::Error;

use crate::{buffer::GrowableBuffer, debug::AwsmRendererLogging};

pub type Result<T> = std::result::Result<T, AwsmCameraError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AwsmCameraError {
    #[error("[camera] byte offset {0} is not 4-byte aligned")]
    Misaligned(usize),

    #[error("[camera] block of {len} floats is too short for view/projection at float {start}")]
    OutOfRange { start: usize, len: usize },
}

/// View and projection, uploaded back to back as the shader's `ViewProjection` uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewProjection {
    pub view: Mat4,
    pub projection: Mat4,
}

impl Default for ViewProjection {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        }
    }
}

impl ViewProjection {
    pub const FLOATS: usize = 32;
    pub const BYTE_SIZE: usize = Self::FLOATS * 4;

    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self { view, projection }
    }

    /// Reads from a shared camera block laid out as `model | view | projection`
    /// (three column-major mat4s) starting at `byte_offset`. The model matrix is skipped
    pub fn from_shared_block(block: &[f32], byte_offset: usize) -> Result<Self> {
        if byte_offset % 4 != 0 {
            return Err(AwsmCameraError::Misaligned(byte_offset));
        }

        let start = byte_offset / 4 + 16;
        let floats = block
            .get(start..start + Self::FLOATS)
            .ok_or(AwsmCameraError::OutOfRange {
                start,
                len: block.len(),
            })?;

        Ok(Self {
            view: Mat4::from_cols_slice(&floats[..16]),
            projection: Mat4::from_cols_slice(&floats[16..]),
        })
    }

    pub fn to_cols_array(&self) -> [f32; Self::FLOATS] {
        let mut values = [0.0; Self::FLOATS];
        values[..16].copy_from_slice(&self.view.to_cols_array());
        values[16..].copy_from_slice(&self.projection.to_cols_array());
        values
    }
}

pub struct CameraBuffer {
    view_projection: ViewProjection,
    gpu_buffer: GrowableBuffer,
    gpu_dirty: bool,
}

impl Default for CameraBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraBuffer {
    pub fn new() -> Self {
        Self {
            view_projection: ViewProjection::default(),
            gpu_buffer: GrowableBuffer::new(
                "Camera",
                BufferUsage::new().with_uniform(),
                ViewProjection::BYTE_SIZE,
            ),
            gpu_dirty: true,
        }
    }

    // cheap, can be called many times a frame, the GPU only sees the last value
    pub fn update(&mut self, view_projection: ViewProjection) {
        if self.view_projection != view_projection {
            self.view_projection = view_projection;
            self.gpu_dirty = true;
        }
    }

    pub fn view_projection(&self) -> &ViewProjection {
        &self.view_projection
    }

    pub fn write_gpu(
        &mut self,
        gpu: &AwsmRendererWebGpu,
        logging: &AwsmRendererLogging,
    ) -> std::result::Result<(), awsm_unified_renderer_core::error::AwsmCoreError> {
        if !self.gpu_dirty && self.gpu_buffer.gpu_buffer().is_some() {
            return Ok(());
        }

        let _maybe_span_guard = if logging.render_timings {
            Some(tracing::span!(tracing::Level::INFO, "Camera GPU write").entered())
        } else {
            None
        };

        let values = self.view_projection.to_cols_array();
        self.gpu_buffer.write(gpu, bytemuck::cast_slice(&values))?;
        self.gpu_dirty = false;

        Ok(())
    }

    pub fn gpu_buffer(&self) -> &GrowableBuffer {
        &self.gpu_buffer
    }

    pub fn destroy(&mut self) {
        self.gpu_buffer.destroy();
        self.gpu_dirty = true;
    }
}
