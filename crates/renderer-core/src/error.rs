use std::sync::LazyLock;

use thiserror::Error;
use wasm_bindgen::prelude::*;

pub type Result<T> = std::result::Result<T, AwsmCoreError>;

#[derive(Error, Debug)]
pub enum AwsmCoreError {
    #[error("Failed to create GPU Adapter: {0}")]
    GpuAdapter(String),

    #[error("Failed to create GPU Device: {0}")]
    GpuDevice(String),

    #[error("Failed to create Canvas WebGPU Context: {0}")]
    CanvasContext(String),

    #[error("Failed to configure WebGPU Context: {0}")]
    ContextConfiguration(String),

    #[error("Failed to create WebGPU Pipeline from valid descriptor: {0}")]
    PipelineCreation(String),

    #[error("Failed to create WebGPU Bind Group Layout: {0}")]
    BindGroupLayout(String),

    #[error("Failed to set WebGPU Bind Group: {0}")]
    SetBindGroup(String),

    #[error("Failed to create WebGPU Texture: {0}")]
    TextureCreation(String),

    #[error("Failed to create WebGPU Texture View: {0}")]
    TextureView(String),

    #[error("Failed to create WebGPU RenderPass Command: {0}")]
    CommandRenderPass(String),

    #[error("Failed to get WebGPU current context texture: {0}")]
    CurrentContextTexture(String),

    #[error("Failed to get WebGPU current context texture view: {0}")]
    CurrentContextTextureView(String),

    #[error("WebGPU failed create buffer: {0}")]
    BufferCreation(String),

    #[error("WebGPU failed write buffer: {0}")]
    BufferWrite(String),
}

static ERROR_UNKNOWN: LazyLock<String> = LazyLock::new(|| "Unknown error".to_string());

fn js_message(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| ERROR_UNKNOWN.clone())
}

impl AwsmCoreError {
    pub fn gpu_adapter(err: JsValue) -> Self {
        Self::GpuAdapter(js_message(err))
    }

    pub fn gpu_device(err: JsValue) -> Self {
        Self::GpuDevice(js_message(err))
    }

    pub fn canvas_context(err: JsValue) -> Self {
        Self::CanvasContext(js_message(err))
    }

    pub fn context_configuration(err: JsValue) -> Self {
        Self::ContextConfiguration(js_message(err))
    }

    pub fn pipeline_creation(err: JsValue) -> Self {
        match err.dyn_into::<web_sys::GpuPipelineError>() {
            Ok(err) => {
                let reason = match err.reason() {
                    web_sys::GpuPipelineErrorReason::Validation => "Validation",
                    web_sys::GpuPipelineErrorReason::Internal => "Internal",
                    _ => "Unknown",
                };

                Self::PipelineCreation(format!(
                    "Pipeline creation [{}] error: {}",
                    reason,
                    err.message()
                ))
            }
            Err(err) => Self::PipelineCreation(js_message(err)),
        }
    }

    pub fn bind_group_layout(err: JsValue) -> Self {
        Self::BindGroupLayout(js_message(err))
    }

    pub fn set_bind_group(err: JsValue) -> Self {
        Self::SetBindGroup(js_message(err))
    }

    pub fn texture_creation(err: JsValue) -> Self {
        Self::TextureCreation(js_message(err))
    }

    pub fn texture_view(err: JsValue) -> Self {
        Self::TextureView(js_message(err))
    }

    pub fn command_render_pass(err: JsValue) -> Self {
        Self::CommandRenderPass(js_message(err))
    }

    pub fn current_context_texture(err: JsValue) -> Self {
        Self::CurrentContextTexture(js_message(err))
    }

    pub fn current_context_texture_view(err: JsValue) -> Self {
        Self::CurrentContextTextureView(js_message(err))
    }

    pub fn buffer_creation(err: JsValue) -> Self {
        Self::BufferCreation(js_message(err))
    }

    pub fn buffer_write(err: JsValue) -> Self {
        Self::BufferWrite(js_message(err))
    }
}
