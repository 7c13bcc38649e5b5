use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::error::{AwsmCoreError, Result};

// relatively cheap to clone
#[derive(Clone)]
pub struct AwsmRendererWebGpu {
    pub gpu: web_sys::Gpu,
    pub adapter: web_sys::GpuAdapter,
    pub device: web_sys::GpuDevice,
    pub context: web_sys::GpuCanvasContext,
}

/// Requests an adapter and device for a canvas, then configures the canvas
/// with the browser's preferred format
pub struct AwsmRendererWebGpuBuilder {
    gpu: web_sys::Gpu,
    canvas: web_sys::HtmlCanvasElement,
    optional_features: Vec<&'static str>,
}

impl AwsmRendererWebGpuBuilder {
    pub fn new(gpu: web_sys::Gpu, canvas: web_sys::HtmlCanvasElement) -> Self {
        Self {
            gpu,
            canvas,
            optional_features: Vec::new(),
        }
    }

    /// Features requested only if the adapter supports them,
    /// e.g. "indirect-first-instance"
    pub fn with_optional_feature(mut self, feature: &'static str) -> Self {
        self.optional_features.push(feature);
        self
    }

    /// The subset of optional features the adapter can provide
    fn required_features(&self, adapter: &web_sys::GpuAdapter) -> js_sys::Array {
        let supported = adapter.features();
        let required = js_sys::Array::new();
        for feature in &self.optional_features {
            if supported.has(feature) {
                required.push(&JsValue::from_str(feature));
            } else {
                tracing::warn!("adapter does not support optional feature {feature}");
            }
        }
        required
    }

    pub async fn build(self) -> Result<AwsmRendererWebGpu> {
        tracing::info!("Building WebGPU Context");

        let context: web_sys::GpuCanvasContext = match self.canvas.get_context("webgpu") {
            Ok(Some(ctx)) => Ok(ctx.unchecked_into()),
            Err(err) => Err(AwsmCoreError::canvas_context(err)),
            Ok(None) => Err(AwsmCoreError::CanvasContext("No context found".to_string())),
        }?;

        let adapter: web_sys::GpuAdapter = JsFuture::from(self.gpu.request_adapter())
            .await
            .map_err(AwsmCoreError::gpu_adapter)?
            .unchecked_into();

        if adapter.is_null() || adapter.is_undefined() {
            return Err(AwsmCoreError::GpuAdapter("is null".to_string()));
        }

        let descriptor = web_sys::GpuDeviceDescriptor::new();
        descriptor.set_required_features(&self.required_features(&adapter));

        let device: web_sys::GpuDevice =
            JsFuture::from(adapter.request_device_with_descriptor(&descriptor))
                .await
                .map_err(AwsmCoreError::gpu_device)?
                .unchecked_into();

        if device.is_null() || device.is_undefined() {
            return Err(AwsmCoreError::GpuDevice("is null".to_string()));
        }

        let configuration =
            web_sys::GpuCanvasConfiguration::new(&device, self.gpu.get_preferred_canvas_format());
        configuration.set_alpha_mode(web_sys::GpuCanvasAlphaMode::Opaque);

        context
            .configure(&configuration)
            .map_err(AwsmCoreError::context_configuration)?;

        Ok(AwsmRendererWebGpu {
            gpu: self.gpu,
            adapter,
            device,
            context,
        })
    }
}
