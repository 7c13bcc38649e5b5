use awsm_unified_renderer_core::{
    error::AwsmCoreError,
    renderer::AwsmRendererWebGpu,
    texture::{Extent3d, TextureDescriptor, TextureFormat, TextureUsage},
};

/// Depth attachment that tracks the canvas size
pub struct DepthTexture {
    pub format: TextureFormat,
    inner: Option<DepthTextureInner>,
}

struct DepthTextureInner {
    texture: web_sys::GpuTexture,
    view: web_sys::GpuTextureView,
    width: u32,
    height: u32,
}

impl DepthTexture {
    pub fn new(format: TextureFormat) -> Self {
        Self {
            format,
            inner: None,
        }
    }

    /// Recreates the texture when the canvas size changed since the last call
    pub fn view(&mut self, gpu: &AwsmRendererWebGpu) -> Result<web_sys::GpuTextureView, AwsmCoreError> {
        let (width, height) = gpu.current_context_texture_size()?;

        if let Some(inner) = self.inner.as_ref() {
            if (inner.width, inner.height) == (width, height) {
                // early exit, same size as before
                return Ok(inner.view.clone());
            }
        }

        self.destroy();

        let texture = gpu.create_texture(
            &TextureDescriptor::new(
                self.format,
                Extent3d::new(width, Some(height), Some(1)),
                TextureUsage::new().with_render_attachment(),
            )
            .with_label("Depth")
            .into(),
        )?;

        let view = texture
            .create_view()
            .map_err(AwsmCoreError::texture_view)?;

        tracing::debug!("depth texture created at {width}x{height}");

        self.inner = Some(DepthTextureInner {
            texture,
            view: view.clone(),
            width,
            height,
        });

        Ok(view)
    }

    pub fn destroy(&mut self) {
        if let Some(inner) = self.inner.take() {
            inner.texture.destroy();
        }
    }
}
