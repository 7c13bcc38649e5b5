use awsm_unified_renderer_core::{
    pipeline::{
        depth_stencil::{CompareFunction, DepthStencilState},
        fragment::{ColorTargetState, FragmentState},
        primitive::{CullMode, PrimitiveState},
        vertex::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexState, VertexStepMode},
        PipelineDescriptor, PipelineLayoutDescriptor,
    },
    renderer::AwsmRendererWebGpu,
    texture::TextureFormat,
};

use crate::{config::RendererConfig, error::Result, shaders::ShaderTemplateUnified};

pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth24plus;

// positions only, tightly packed
fn vertex_buffer_layout() -> VertexBufferLayout {
    VertexBufferLayout {
        array_stride: 12,
        attributes: vec![VertexAttribute::new(VertexFormat::Float32x3, 0, 0)],
        step_mode: Some(VertexStepMode::Vertex),
    }
}

/// The single render pipeline used for every mesh
pub async fn create_unified_pipeline(
    gpu: &AwsmRendererWebGpu,
    bind_group_layout: &web_sys::GpuBindGroupLayout,
    config: &RendererConfig,
) -> Result<web_sys::GpuRenderPipeline> {
    let source = ShaderTemplateUnified::default().into_source()?;
    let shader_module = gpu.compile_shader(&source, Some("Unified"));

    let bind_group_layouts = [bind_group_layout.clone()];
    let layout = gpu.create_pipeline_layout(
        &PipelineLayoutDescriptor::new(Some("Unified"), &bind_group_layouts).into(),
    );

    let vertex = VertexState::new(&shader_module, Some("vert_main")).with_buffer(vertex_buffer_layout());

    let fragment = FragmentState::new(
        &shader_module,
        Some("frag_main"),
        vec![ColorTargetState::new(gpu.current_context_format())],
    );

    let primitive = PrimitiveState::triangle_list(CullMode::None);

    let mut descriptor = PipelineDescriptor::new(vertex, &layout, Some("Unified"))
        .with_fragment(fragment)
        .with_primitive(primitive);

    if config.depth_test {
        descriptor = descriptor.with_depth_stencil(
            DepthStencilState::new(DEPTH_FORMAT)
                .with_depth_compare(CompareFunction::Less)
                .with_depth_write_enabled(true),
        );
    }

    Ok(gpu.create_render_pipeline(&descriptor.into()).await?)
}
