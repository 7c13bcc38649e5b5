use crate::texture::TextureFormat;

// https://docs.rs/web-sys/latest/web_sys/enum.GpuCompareFunction.html
pub type CompareFunction = web_sys::GpuCompareFunction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthStencilState {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createRenderPipeline#depthstencil_object_structure
    // https://docs.rs/web-sys/latest/web_sys/struct.GpuDepthStencilState.html
    pub depth_compare: Option<CompareFunction>,
    pub depth_write_enabled: Option<bool>,
    pub format: TextureFormat,
}

impl DepthStencilState {
    pub fn new(format: TextureFormat) -> Self {
        Self {
            format,
            depth_compare: None,
            depth_write_enabled: None,
        }
    }

    pub fn with_depth_compare(mut self, depth_compare: CompareFunction) -> Self {
        self.depth_compare = Some(depth_compare);
        self
    }

    pub fn with_depth_write_enabled(mut self, depth_write_enabled: bool) -> Self {
        self.depth_write_enabled = Some(depth_write_enabled);
        self
    }
}

impl From<DepthStencilState> for web_sys::GpuDepthStencilState {
    fn from(state: DepthStencilState) -> web_sys::GpuDepthStencilState {
        let state_js = web_sys::GpuDepthStencilState::new(state.format);
        if let Some(depth_compare) = state.depth_compare {
            state_js.set_depth_compare(depth_compare);
        }
        if let Some(depth_write_enabled) = state.depth_write_enabled {
            state_js.set_depth_write_enabled(depth_write_enabled);
        }
        state_js
    }
}
