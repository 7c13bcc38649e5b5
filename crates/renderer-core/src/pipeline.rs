pub mod depth_stencil;
pub mod fragment;
pub mod primitive;
pub mod vertex;

use depth_stencil::DepthStencilState;
use fragment::FragmentState;
use primitive::PrimitiveState;
use vertex::VertexState;

#[derive(Debug, Clone)]
pub struct PipelineDescriptor<'a> {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createRenderPipeline#descriptor
    // https://rustwasm.github.io/wasm-bindgen/api/web_sys/struct.GpuRenderPipelineDescriptor.html
    depth_stencil: Option<DepthStencilState>,
    fragment: Option<FragmentState<'a>>,
    label: Option<&'a str>,
    layout: &'a web_sys::GpuPipelineLayout,
    primitive: Option<PrimitiveState>,
    vertex: VertexState<'a>,
}

impl<'a> PipelineDescriptor<'a> {
    /// Pipelines always get an explicit layout, they share bind groups
    pub fn new(
        vertex: VertexState<'a>,
        layout: &'a web_sys::GpuPipelineLayout,
        label: Option<&'a str>,
    ) -> Self {
        Self {
            depth_stencil: None,
            fragment: None,
            label,
            layout,
            primitive: None,
            vertex,
        }
    }

    pub fn with_depth_stencil(mut self, depth_stencil: DepthStencilState) -> Self {
        self.depth_stencil = Some(depth_stencil);
        self
    }

    pub fn with_fragment(mut self, fragment: FragmentState<'a>) -> Self {
        self.fragment = Some(fragment);
        self
    }

    pub fn with_primitive(mut self, primitive: PrimitiveState) -> Self {
        self.primitive = Some(primitive);
        self
    }
}

impl From<PipelineDescriptor<'_>> for web_sys::GpuRenderPipelineDescriptor {
    fn from(pipeline: PipelineDescriptor) -> web_sys::GpuRenderPipelineDescriptor {
        let PipelineDescriptor {
            depth_stencil,
            fragment,
            label,
            layout,
            primitive,
            vertex,
        } = pipeline;

        let pipeline_js = web_sys::GpuRenderPipelineDescriptor::new(
            layout,
            &web_sys::GpuVertexState::from(vertex),
        );

        if let Some(depth_stencil) = depth_stencil {
            pipeline_js.set_depth_stencil(&web_sys::GpuDepthStencilState::from(depth_stencil));
        }

        if let Some(fragment) = fragment {
            pipeline_js.set_fragment(&web_sys::GpuFragmentState::from(fragment));
        }

        if let Some(primitive) = primitive {
            pipeline_js.set_primitive(&web_sys::GpuPrimitiveState::from(primitive));
        }

        if let Some(label) = label {
            pipeline_js.set_label(label);
        }

        pipeline_js
    }
}

#[derive(Debug, Clone)]
pub struct PipelineLayoutDescriptor<'a> {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createPipelineLayout
    pub label: Option<&'a str>,
    pub bind_group_layouts: &'a [web_sys::GpuBindGroupLayout],
}

impl<'a> PipelineLayoutDescriptor<'a> {
    pub fn new(label: Option<&'a str>, bind_group_layouts: &'a [web_sys::GpuBindGroupLayout]) -> Self {
        Self {
            label,
            bind_group_layouts,
        }
    }
}

impl From<PipelineLayoutDescriptor<'_>> for web_sys::GpuPipelineLayoutDescriptor {
    fn from(descriptor: PipelineLayoutDescriptor) -> Self {
        let layouts = descriptor
            .bind_group_layouts
            .iter()
            .collect::<js_sys::Array>();

        let descriptor_js = web_sys::GpuPipelineLayoutDescriptor::new(&layouts);
        if let Some(label) = descriptor.label {
            descriptor_js.set_label(label);
        }

        descriptor_js
    }
}
