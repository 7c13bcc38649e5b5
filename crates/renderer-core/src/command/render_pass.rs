use std::ops::Deref;

use crate::{error::AwsmCoreError, pipeline::primitive::IndexFormat};

use super::{color::Color, LoadOp, StoreOp};

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct RenderPassEncoder {
    inner: web_sys::GpuRenderPassEncoder,
}

impl RenderPassEncoder {
    pub fn new(inner: web_sys::GpuRenderPassEncoder) -> Self {
        Self { inner }
    }

    pub fn set_vertex_buffer(
        &self,
        slot: u32,
        buffer: &web_sys::GpuBuffer,
        offset: Option<u64>,
        size: Option<u64>,
    ) {
        match (offset, size) {
            (Some(offset), Some(size)) => self.inner.set_vertex_buffer_with_f64_and_f64(
                slot,
                Some(buffer),
                offset as f64,
                size as f64,
            ),
            (Some(offset), None) => {
                self.inner
                    .set_vertex_buffer_with_f64(slot, Some(buffer), offset as f64)
            }
            (None, Some(size)) => {
                self.inner
                    .set_vertex_buffer_with_f64_and_f64(slot, Some(buffer), 0.0, size as f64)
            }
            (None, None) => self.inner.set_vertex_buffer(slot, Some(buffer)),
        }
    }

    pub fn set_index_buffer(
        &self,
        buffer: &web_sys::GpuBuffer,
        format: IndexFormat,
        offset: Option<u64>,
        size: Option<u64>,
    ) {
        match (offset, size) {
            (Some(offset), Some(size)) => self.inner.set_index_buffer_with_f64_and_f64(
                buffer,
                format,
                offset as f64,
                size as f64,
            ),
            (Some(offset), None) => {
                self.inner
                    .set_index_buffer_with_f64(buffer, format, offset as f64)
            }
            (None, Some(size)) => {
                self.inner
                    .set_index_buffer_with_f64_and_f64(buffer, format, 0.0, size as f64)
            }
            (None, None) => self.inner.set_index_buffer(buffer, format),
        }
    }

    pub fn set_bind_group(
        &self,
        index: u32,
        bind_group: &web_sys::GpuBindGroup,
        dynamic_offsets: Option<&[u32]>,
    ) -> Result<()> {
        match dynamic_offsets {
            Some(offsets) => self
                .inner
                .set_bind_group_with_u32_slice_and_f64_and_dynamic_offsets_data_length(
                    index,
                    Some(bind_group),
                    offsets,
                    0 as f64,
                    offsets.len() as u32,
                )
                .map_err(AwsmCoreError::set_bind_group)?,
            None => self.inner.set_bind_group(index, Some(bind_group)),
        }

        Ok(())
    }

    pub fn draw_instanced(
        &self,
        vertex_count: u32,
        instance_count: u32,
        first_vertex: u32,
        first_instance: u32,
    ) {
        self.inner
            .draw_with_instance_count_and_first_vertex_and_first_instance(
                vertex_count,
                instance_count,
                first_vertex,
                first_instance,
            );
    }

    pub fn draw_indexed_instanced(
        &self,
        index_count: u32,
        instance_count: u32,
        first_index: u32,
        base_vertex: i32,
        first_instance: u32,
    ) {
        self.inner
            .draw_indexed_with_instance_count_and_first_index_and_base_vertex_and_first_instance(
                index_count,
                instance_count,
                first_index,
                base_vertex,
                first_instance,
            );
    }

    // https://developer.mozilla.org/en-US/docs/Web/API/GPURenderPassEncoder/drawIndirect
    pub fn draw_indirect(&self, indirect_buffer: &web_sys::GpuBuffer, indirect_offset: u64) {
        self.inner
            .draw_indirect_with_f64(indirect_buffer, indirect_offset as f64);
    }

    // https://developer.mozilla.org/en-US/docs/Web/API/GPURenderPassEncoder/drawIndexedIndirect
    pub fn draw_indexed_indirect(
        &self,
        indirect_buffer: &web_sys::GpuBuffer,
        indirect_offset: u64,
    ) {
        self.inner
            .draw_indexed_indirect_with_f64(indirect_buffer, indirect_offset as f64);
    }
}

impl Deref for RenderPassEncoder {
    type Target = web_sys::GpuRenderPassEncoder;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderPassDescriptor<'a> {
    pub color_attachments: Vec<ColorAttachment<'a>>,
    pub depth_stencil_attachment: Option<DepthStencilAttachment<'a>>,
    pub label: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct ColorAttachment<'a> {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUCommandEncoder/beginRenderPass#color_attachment_object_structure
    pub clear_color: Option<Color>,
    pub load_op: LoadOp,
    pub store_op: StoreOp,
    pub view: &'a web_sys::GpuTextureView,
}

impl<'a> ColorAttachment<'a> {
    pub fn new(view: &'a web_sys::GpuTextureView, load_op: LoadOp, store_op: StoreOp) -> Self {
        Self {
            view,
            load_op,
            store_op,
            clear_color: None,
        }
    }

    pub fn with_clear_color(mut self, clear_color: Color) -> Self {
        self.clear_color = Some(clear_color);
        self
    }
}

#[derive(Debug, Clone)]
pub struct DepthStencilAttachment<'a> {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUCommandEncoder/beginRenderPass#depthstencil_attachment_object_structure
    pub view: &'a web_sys::GpuTextureView,
    pub depth_clear_value: Option<f32>,
    pub depth_load_op: Option<LoadOp>,
    pub depth_store_op: Option<StoreOp>,
}

impl<'a> DepthStencilAttachment<'a> {
    pub fn new(view: &'a web_sys::GpuTextureView) -> Self {
        Self {
            view,
            depth_clear_value: None,
            depth_load_op: None,
            depth_store_op: None,
        }
    }

    pub fn with_depth_clear_value(mut self, clear_value: f32) -> Self {
        self.depth_clear_value = Some(clear_value);
        self
    }

    pub fn with_depth_load_op(mut self, load_op: LoadOp) -> Self {
        self.depth_load_op = Some(load_op);
        self
    }

    pub fn with_depth_store_op(mut self, store_op: StoreOp) -> Self {
        self.depth_store_op = Some(store_op);
        self
    }
}

// js conversions

impl From<RenderPassDescriptor<'_>> for web_sys::GpuRenderPassDescriptor {
    fn from(pass: RenderPassDescriptor) -> web_sys::GpuRenderPassDescriptor {
        let color_attachments = js_sys::Array::new();
        for attachment in pass.color_attachments {
            color_attachments.push(&web_sys::GpuRenderPassColorAttachment::from(attachment));
        }

        let pass_js = web_sys::GpuRenderPassDescriptor::new(&color_attachments);

        if let Some(label) = pass.label {
            pass_js.set_label(label);
        }

        if let Some(depth_stencil_attachment) = pass.depth_stencil_attachment {
            pass_js.set_depth_stencil_attachment(
                &web_sys::GpuRenderPassDepthStencilAttachment::from(depth_stencil_attachment),
            );
        }

        pass_js
    }
}

impl From<ColorAttachment<'_>> for web_sys::GpuRenderPassColorAttachment {
    fn from(attachment: ColorAttachment) -> web_sys::GpuRenderPassColorAttachment {
        let attachment_js = web_sys::GpuRenderPassColorAttachment::new(
            attachment.load_op,
            attachment.store_op,
            attachment.view,
        );

        if let Some(clear_color) = attachment.clear_color {
            attachment_js.set_clear_value(&clear_color.as_js_dict());
        }

        attachment_js
    }
}

impl From<DepthStencilAttachment<'_>> for web_sys::GpuRenderPassDepthStencilAttachment {
    fn from(attachment: DepthStencilAttachment) -> web_sys::GpuRenderPassDepthStencilAttachment {
        let attachment_js = web_sys::GpuRenderPassDepthStencilAttachment::new(attachment.view);

        if let Some(depth_clear_value) = attachment.depth_clear_value {
            attachment_js.set_depth_clear_value(depth_clear_value);
        }
        if let Some(depth_load_op) = attachment.depth_load_op {
            attachment_js.set_depth_load_op(depth_load_op);
        }
        if let Some(depth_store_op) = attachment.depth_store_op {
            attachment_js.set_depth_store_op(depth_store_op);
        }

        attachment_js
    }
}
