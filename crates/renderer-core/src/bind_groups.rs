use crate::buffers::BufferBinding;

#[derive(Debug, Clone, Default)]
pub struct BindGroupLayoutDescriptor<'a> {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createBindGroupLayout#descriptor
    pub label: Option<&'a str>,
    pub entries: Vec<BindGroupLayoutEntry>,
}

impl<'a> BindGroupLayoutDescriptor<'a> {
    pub fn new(label: Option<&'a str>) -> Self {
        Self {
            label,
            entries: Vec::new(),
        }
    }

    pub fn with_entries(mut self, entries: Vec<BindGroupLayoutEntry>) -> Self {
        self.entries = entries;
        self
    }
}

#[derive(Debug, Clone)]
pub struct BindGroupLayoutEntry {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createBindGroupLayout#entry_objects
    pub binding: u32,
    pub visibility_vertex: bool,
    pub visibility_fragment: bool,
    pub buffer: BufferBindingLayout,
}

impl BindGroupLayoutEntry {
    pub fn new(binding: u32, buffer: BufferBindingLayout) -> Self {
        Self {
            binding,
            visibility_vertex: false,
            visibility_fragment: false,
            buffer,
        }
    }

    pub fn with_visibility_vertex(mut self) -> Self {
        self.visibility_vertex = true;
        self
    }

    pub fn with_visibility_fragment(mut self) -> Self {
        self.visibility_fragment = true;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct BufferBindingLayout {
    // https://rustwasm.github.io/wasm-bindgen/api/web_sys/struct.GpuBufferBindingLayout.html
    pub has_dynamic_offset: Option<bool>,
    pub min_binding_size: Option<usize>,
    pub binding_type: Option<BufferBindingType>,
}

impl BufferBindingLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_binding_size(mut self, min_binding_size: usize) -> Self {
        self.min_binding_size = Some(min_binding_size);
        self
    }

    pub fn with_binding_type(mut self, binding_type: BufferBindingType) -> Self {
        self.binding_type = Some(binding_type);
        self
    }
}

// https://rustwasm.github.io/wasm-bindgen/api/web_sys/enum.GpuBufferBindingType.html
pub type BufferBindingType = web_sys::GpuBufferBindingType;

#[derive(Debug, Clone)]
pub struct BindGroupDescriptor<'a> {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createBindGroup#descriptor
    pub layout: &'a web_sys::GpuBindGroupLayout,
    pub label: Option<&'a str>,
    pub entries: Vec<BindGroupEntry<'a>>,
}

impl<'a> BindGroupDescriptor<'a> {
    pub fn new(
        layout: &'a web_sys::GpuBindGroupLayout,
        label: Option<&'a str>,
        entries: Vec<BindGroupEntry<'a>>,
    ) -> Self {
        Self {
            layout,
            label,
            entries,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BindGroupEntry<'a> {
    pub binding: u32,
    pub buffer: BufferBinding<'a>,
}

impl<'a> BindGroupEntry<'a> {
    pub fn new(binding: u32, buffer: BufferBinding<'a>) -> Self {
        Self { binding, buffer }
    }
}

// js conversions

impl From<BindGroupLayoutDescriptor<'_>> for web_sys::GpuBindGroupLayoutDescriptor {
    fn from(layout: BindGroupLayoutDescriptor) -> Self {
        let entries = js_sys::Array::new();
        for entry in layout.entries {
            entries.push(&web_sys::GpuBindGroupLayoutEntry::from(entry));
        }

        let layout_js = web_sys::GpuBindGroupLayoutDescriptor::new(&entries);

        if let Some(label) = layout.label {
            layout_js.set_label(label);
        }

        layout_js
    }
}

impl From<BindGroupLayoutEntry> for web_sys::GpuBindGroupLayoutEntry {
    fn from(entry: BindGroupLayoutEntry) -> Self {
        let mut visibility = 0;
        if entry.visibility_vertex {
            visibility |= web_sys::gpu_shader_stage::VERTEX;
        }
        if entry.visibility_fragment {
            visibility |= web_sys::gpu_shader_stage::FRAGMENT;
        }

        let entry_js = web_sys::GpuBindGroupLayoutEntry::new(entry.binding, visibility);
        entry_js.set_buffer(&web_sys::GpuBufferBindingLayout::from(entry.buffer));

        entry_js
    }
}

impl From<BufferBindingLayout> for web_sys::GpuBufferBindingLayout {
    fn from(layout: BufferBindingLayout) -> Self {
        let layout_js = web_sys::GpuBufferBindingLayout::new();

        if let Some(has_dynamic_offset) = layout.has_dynamic_offset {
            layout_js.set_has_dynamic_offset(has_dynamic_offset);
        }

        if let Some(min_binding_size) = layout.min_binding_size {
            layout_js.set_min_binding_size(min_binding_size as f64);
        }

        if let Some(binding_type) = layout.binding_type {
            layout_js.set_type(binding_type);
        }

        layout_js
    }
}

impl From<BindGroupDescriptor<'_>> for web_sys::GpuBindGroupDescriptor {
    fn from(bind_group: BindGroupDescriptor) -> Self {
        let entries = js_sys::Array::new();
        for entry in bind_group.entries {
            entries.push(&web_sys::GpuBindGroupEntry::from(entry));
        }

        let bind_group_js = web_sys::GpuBindGroupDescriptor::new(&entries, bind_group.layout);

        if let Some(label) = bind_group.label {
            bind_group_js.set_label(label);
        }

        bind_group_js
    }
}

impl From<BindGroupEntry<'_>> for web_sys::GpuBindGroupEntry {
    fn from(entry: BindGroupEntry) -> Self {
        web_sys::GpuBindGroupEntry::new(
            entry.binding,
            &web_sys::GpuBufferBinding::from(entry.buffer).into(),
        )
    }
}
