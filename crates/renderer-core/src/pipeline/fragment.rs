use crate::texture::TextureFormat;

#[derive(Debug, Clone)]
pub struct FragmentState<'a> {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createRenderPipeline#fragment_object_structure
    pub entry_point: Option<&'a str>,
    pub module: &'a web_sys::GpuShaderModule,
    pub targets: Vec<ColorTargetState>,
}

impl<'a> FragmentState<'a> {
    pub fn new(
        module: &'a web_sys::GpuShaderModule,
        entry_point: Option<&'a str>,
        targets: Vec<ColorTargetState>,
    ) -> Self {
        Self {
            entry_point,
            module,
            targets,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTargetState {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createRenderPipeline#targets
    pub format: TextureFormat,
    pub write_mask: Option<u32>,
}

impl ColorTargetState {
    pub fn new(format: TextureFormat) -> Self {
        Self {
            format,
            write_mask: None,
        }
    }
}

// js conversions

impl From<FragmentState<'_>> for web_sys::GpuFragmentState {
    fn from(state: FragmentState) -> web_sys::GpuFragmentState {
        let targets = js_sys::Array::new();
        for target in state.targets {
            targets.push(&web_sys::GpuColorTargetState::from(target));
        }

        let state_js = web_sys::GpuFragmentState::new(state.module, &targets);

        if let Some(entry_point) = state.entry_point {
            state_js.set_entry_point(entry_point);
        }

        state_js
    }
}

impl From<ColorTargetState> for web_sys::GpuColorTargetState {
    fn from(state: ColorTargetState) -> web_sys::GpuColorTargetState {
        let state_js = web_sys::GpuColorTargetState::new(state.format);

        if let Some(write_mask) = state.write_mask {
            state_js.set_write_mask(write_mask);
        }

        state_js
    }
}
