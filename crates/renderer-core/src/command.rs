pub mod color;
pub mod render_pass;

use crate::{
    error::{AwsmCoreError, Result},
    renderer::AwsmRendererWebGpu,
};
use render_pass::{RenderPassDescriptor, RenderPassEncoder};

pub type LoadOp = web_sys::GpuLoadOp;
pub type StoreOp = web_sys::GpuStoreOp;

/// Records the passes of one frame. Consumed by [`CommandEncoder::submit`],
/// so an encoder is never reused after its buffer is queued
#[derive(Debug)]
pub struct CommandEncoder {
    inner: web_sys::GpuCommandEncoder,
}

impl CommandEncoder {
    pub fn new(inner: web_sys::GpuCommandEncoder) -> Self {
        Self { inner }
    }

    // https://developer.mozilla.org/en-US/docs/Web/API/GPUCommandEncoder/beginRenderPass
    pub fn begin_render_pass(
        &self,
        descriptor: RenderPassDescriptor<'_>,
    ) -> Result<RenderPassEncoder> {
        self.inner
            .begin_render_pass(&descriptor.into())
            .map(RenderPassEncoder::new)
            .map_err(AwsmCoreError::command_render_pass)
    }

    /// Every pass begun on this encoder must be ended first
    pub fn submit(self, gpu: &AwsmRendererWebGpu) {
        gpu.submit_commands(&self.inner.finish());
    }
}
