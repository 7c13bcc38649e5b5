#[derive(Debug, Clone)]
pub struct VertexState<'a> {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createRenderPipeline#vertex_object_structure
    pub entry_point: Option<&'a str>,
    pub module: &'a web_sys::GpuShaderModule,
    pub buffers: Vec<VertexBufferLayout>,
}

impl<'a> VertexState<'a> {
    pub fn new(module: &'a web_sys::GpuShaderModule, entry_point: Option<&'a str>) -> Self {
        Self {
            entry_point,
            module,
            buffers: Vec::new(),
        }
    }

    pub fn with_buffer(mut self, buffer: VertexBufferLayout) -> Self {
        self.buffers.push(buffer);
        self
    }
}

#[derive(Debug, Clone)]
pub struct VertexBufferLayout {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createRenderPipeline#buffers
    pub array_stride: u64,
    pub attributes: Vec<VertexAttribute>,
    pub step_mode: Option<VertexStepMode>,
}

#[derive(Debug, Clone, Copy)]
pub struct VertexAttribute {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createRenderPipeline#attributes
    pub format: VertexFormat,
    pub offset: u64,
    pub shader_location: u32,
}

impl VertexAttribute {
    pub fn new(format: VertexFormat, offset: u64, shader_location: u32) -> Self {
        Self {
            format,
            offset,
            shader_location,
        }
    }
}

// https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createRenderPipeline#stepmode
pub type VertexStepMode = web_sys::GpuVertexStepMode;

pub type VertexFormat = web_sys::GpuVertexFormat;

// js conversion

impl From<VertexState<'_>> for web_sys::GpuVertexState {
    fn from(state: VertexState) -> Self {
        let state_js = web_sys::GpuVertexState::new(state.module);

        if let Some(entry_point) = state.entry_point {
            state_js.set_entry_point(entry_point);
        }

        if !state.buffers.is_empty() {
            let buffers = js_sys::Array::new();
            for buffer in state.buffers {
                buffers.push(&web_sys::GpuVertexBufferLayout::from(buffer));
            }
            state_js.set_buffers(&buffers);
        }

        state_js
    }
}

impl From<VertexBufferLayout> for web_sys::GpuVertexBufferLayout {
    fn from(buffer_layout: VertexBufferLayout) -> web_sys::GpuVertexBufferLayout {
        let attributes = js_sys::Array::new();
        for attribute in buffer_layout.attributes {
            attributes.push(&web_sys::GpuVertexAttribute::new(
                attribute.format,
                attribute.offset as f64,
                attribute.shader_location,
            ));
        }

        let buffer_layout_js =
            web_sys::GpuVertexBufferLayout::new(buffer_layout.array_stride as f64, &attributes);

        if let Some(step_mode) = buffer_layout.step_mode {
            buffer_layout_js.set_step_mode(step_mode);
        }

        buffer_layout_js
    }
}
