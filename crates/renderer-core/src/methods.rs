//! Convenience methods for WebGPU operations.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::{
    command::CommandEncoder,
    error::{AwsmCoreError, Result},
    renderer::AwsmRendererWebGpu,
    texture::TextureFormat,
};

impl AwsmRendererWebGpu {
    /// The configured canvas format, or the preferred one if the context
    /// has not been configured yet
    pub fn current_context_format(&self) -> TextureFormat {
        self.context
            .get_configuration()
            .map(|configuration| configuration.get_format())
            .unwrap_or_else(|| self.gpu.get_preferred_canvas_format())
    }

    pub fn current_context_texture(&self) -> Result<web_sys::GpuTexture> {
        // fine to call this often, see https://gpuweb.github.io/gpuweb/#dom-gpucanvascontext-getcurrenttexture
        // "Note: The same GPUTexture object will be returned by every call to getCurrentTexture()
        // until 'Expire the current texture' runs [...]"
        self.context
            .get_current_texture()
            .map_err(AwsmCoreError::current_context_texture)
    }

    pub fn current_context_texture_size(&self) -> Result<(u32, u32)> {
        let texture = self.current_context_texture()?;
        Ok((texture.width(), texture.height()))
    }

    pub fn current_context_texture_view(&self) -> Result<web_sys::GpuTextureView> {
        self.current_context_texture()?
            .create_view()
            .map_err(AwsmCoreError::current_context_texture_view)
    }

    /// Example usage:
    /// let module = gpu.compile_shader(&source, Some("Unified"));
    pub fn compile_shader(&self, code: &str, label: Option<&str>) -> web_sys::GpuShaderModule {
        let descriptor = web_sys::GpuShaderModuleDescriptor::new(code);
        if let Some(label) = label {
            descriptor.set_label(label);
        }
        self.device.create_shader_module(&descriptor)
    }

    /// Example usage:
    /// let descriptor:PipelineDescriptor = ...;
    /// gpu.create_render_pipeline(&descriptor.into()).await?;
    pub async fn create_render_pipeline(
        &self,
        descriptor: &web_sys::GpuRenderPipelineDescriptor,
    ) -> Result<web_sys::GpuRenderPipeline> {
        let pipeline: web_sys::GpuRenderPipeline =
            JsFuture::from(self.device.create_render_pipeline_async(descriptor))
                .await
                .map_err(AwsmCoreError::pipeline_creation)?
                .unchecked_into();

        Ok(pipeline)
    }

    pub fn create_pipeline_layout(
        &self,
        descriptor: &web_sys::GpuPipelineLayoutDescriptor,
    ) -> web_sys::GpuPipelineLayout {
        self.device.create_pipeline_layout(descriptor)
    }

    pub fn create_bind_group_layout(
        &self,
        descriptor: &web_sys::GpuBindGroupLayoutDescriptor,
    ) -> Result<web_sys::GpuBindGroupLayout> {
        self.device
            .create_bind_group_layout(descriptor)
            .map_err(AwsmCoreError::bind_group_layout)
    }

    pub fn create_bind_group(
        &self,
        descriptor: &web_sys::GpuBindGroupDescriptor,
    ) -> web_sys::GpuBindGroup {
        self.device.create_bind_group(descriptor)
    }

    pub fn create_texture(
        &self,
        descriptor: &web_sys::GpuTextureDescriptor,
    ) -> Result<web_sys::GpuTexture> {
        self.device
            .create_texture(descriptor)
            .map_err(AwsmCoreError::texture_creation)
    }

    /// Example usage:
    /// let descriptor:BufferDescriptor = ...;
    /// gpu.create_buffer(&descriptor.into())?;
    pub fn create_buffer(
        &self,
        descriptor: &web_sys::GpuBufferDescriptor,
    ) -> Result<web_sys::GpuBuffer> {
        self.device
            .create_buffer(descriptor)
            .map_err(AwsmCoreError::buffer_creation)
    }

    /// Example usage:
    /// let encoder = gpu.create_command_encoder(Some("Frame"));
    /// let render_pass = encoder.begin_render_pass(RenderPassDescriptor { .. })?;
    /// render_pass.set_pipeline(&pipeline);
    /// render_pass.draw(3);
    /// render_pass.end();
    /// encoder.submit(&gpu);
    pub fn create_command_encoder(&self, label: Option<&str>) -> CommandEncoder {
        let encoder = match label {
            None => self.device.create_command_encoder(),
            Some(label) => {
                let descriptor = web_sys::GpuCommandEncoderDescriptor::new();
                descriptor.set_label(label);
                self.device
                    .create_command_encoder_with_descriptor(&descriptor)
            }
        };

        CommandEncoder::new(encoder)
    }

    // fire-and-forget, the queue drains on its own
    pub fn submit_commands(&self, command_buffer: &web_sys::GpuCommandBuffer) {
        self.device
            .queue()
            .submit(&js_sys::Array::of1(command_buffer));
    }

    /// Writes bytes into a GPU buffer at `buffer_offset` (in bytes).
    /// The data length must be a multiple of 4
    pub fn write_buffer(
        &self,
        buffer: &web_sys::GpuBuffer,
        buffer_offset: Option<usize>,
        data: &[u8],
    ) -> Result<()> {
        // https://developer.mozilla.org/en-US/docs/Web/API/GPUQueue/writeBuffer
        self.device
            .queue()
            .write_buffer_with_f64_and_u8_slice(buffer, buffer_offset.unwrap_or(0) as f64, data)
            .map_err(AwsmCoreError::buffer_write)
    }

    /// Whether the device was created with `feature`, e.g. "indirect-first-instance"
    pub fn has_feature(&self, feature: &str) -> bool {
        self.device.features().has(feature)
    }
}
