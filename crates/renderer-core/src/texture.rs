pub type TextureFormat = web_sys::GpuTextureFormat;

#[derive(Debug, Clone)]
pub struct TextureDescriptor<'a> {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createTexture#descriptor
    // https://rustwasm.github.io/wasm-bindgen/api/web_sys/struct.GpuTextureDescriptor.html
    pub format: TextureFormat,
    pub label: Option<&'a str>,
    pub size: Extent3d,
    pub usage: TextureUsage,
}

impl<'a> TextureDescriptor<'a> {
    pub fn new(format: TextureFormat, size: Extent3d, usage: TextureUsage) -> Self {
        Self {
            format,
            label: None,
            size,
            usage,
        }
    }

    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }
}

#[derive(Hash, Debug, Clone, Default, Copy, PartialEq, Eq)]
// https://docs.rs/web-sys/latest/web_sys/gpu_texture_usage/index.html
pub struct TextureUsage(u32);

impl TextureUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn with_render_attachment(mut self) -> Self {
        self.0 |= web_sys::gpu_texture_usage::RENDER_ATTACHMENT;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent3d {
    pub width: u32,
    pub height: Option<u32>,
    pub depth_or_array_layers: Option<u32>,
}

impl Extent3d {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createTexture#size
    pub fn new(width: u32, height: Option<u32>, depth_or_array_layers: Option<u32>) -> Self {
        Self {
            width,
            height,
            depth_or_array_layers,
        }
    }
}

// js conversions

impl From<Extent3d> for web_sys::GpuExtent3dDict {
    fn from(size: Extent3d) -> Self {
        let size_js = web_sys::GpuExtent3dDict::new(size.width);

        if let Some(height) = size.height {
            size_js.set_height(height);
        }

        if let Some(depth_or_array_layers) = size.depth_or_array_layers {
            size_js.set_depth_or_array_layers(depth_or_array_layers);
        }

        size_js
    }
}

impl From<TextureDescriptor<'_>> for web_sys::GpuTextureDescriptor {
    fn from(descriptor: TextureDescriptor) -> Self {
        let size_js = web_sys::GpuExtent3dDict::from(descriptor.size);
        let descriptor_js = web_sys::GpuTextureDescriptor::new(
            descriptor.format,
            &size_js,
            descriptor.usage.as_u32(),
        );

        if let Some(label) = descriptor.label {
            descriptor_js.set_label(label);
        }

        descriptor_js
    }
}
