/// `writeBuffer` sizes and offsets must be multiples of this
pub const COPY_BUFFER_ALIGNMENT: usize = 4;

#[derive(Debug, Clone)]
pub struct BufferDescriptor<'a> {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createBuffer#descriptor
    // https://docs.rs/web-sys/latest/web_sys/struct.GpuBufferDescriptor.html
    pub label: Option<&'a str>,
    pub mapped_at_creation: Option<bool>,
    pub size: usize,
    pub usage: BufferUsage,
}

impl<'a> BufferDescriptor<'a> {
    pub fn new(label: Option<&'a str>, size: usize, usage: BufferUsage) -> Self {
        Self {
            label,
            size,
            usage,
            mapped_at_creation: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BufferBinding<'a> {
    // https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createBindGroup#gpubufferbinding_objects
    pub buffer: &'a web_sys::GpuBuffer,
    pub offset: Option<usize>,
    pub size: Option<usize>,
}

impl<'a> BufferBinding<'a> {
    pub fn new(buffer: &'a web_sys::GpuBuffer) -> Self {
        Self {
            buffer,
            offset: None,
            size: None,
        }
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }
}

#[derive(Hash, Debug, Clone, Default, Copy, PartialEq, Eq)]
// https://docs.rs/web-sys/latest/web_sys/gpu_buffer_usage/index.html
pub struct BufferUsage(u32);

impl From<BufferUsage> for u32 {
    fn from(usage: BufferUsage) -> Self {
        usage.0
    }
}

impl BufferUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, other: BufferUsage) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn with_copy_dst(mut self) -> Self {
        self.0 |= web_sys::gpu_buffer_usage::COPY_DST;
        self
    }

    pub fn with_index(mut self) -> Self {
        self.0 |= web_sys::gpu_buffer_usage::INDEX;
        self
    }

    pub fn with_indirect(mut self) -> Self {
        self.0 |= web_sys::gpu_buffer_usage::INDIRECT;
        self
    }

    pub fn with_storage(mut self) -> Self {
        self.0 |= web_sys::gpu_buffer_usage::STORAGE;
        self
    }

    pub fn with_uniform(mut self) -> Self {
        self.0 |= web_sys::gpu_buffer_usage::UNIFORM;
        self
    }

    pub fn with_vertex(mut self) -> Self {
        self.0 |= web_sys::gpu_buffer_usage::VERTEX;
        self
    }
}

/// Rounds `n` up to the next multiple of `align`
pub fn align_to(n: usize, align: usize) -> usize {
    match n % align {
        0 => n,
        rem => n + (align - rem),
    }
}

// js conversion

impl From<BufferDescriptor<'_>> for web_sys::GpuBufferDescriptor {
    fn from(descriptor: BufferDescriptor) -> Self {
        let descriptor_js =
            web_sys::GpuBufferDescriptor::new(descriptor.size as f64, descriptor.usage.into());

        if let Some(label) = descriptor.label {
            descriptor_js.set_label(label);
        }

        if let Some(mapped_at_creation) = descriptor.mapped_at_creation {
            descriptor_js.set_mapped_at_creation(mapped_at_creation);
        }

        descriptor_js
    }
}

impl From<BufferBinding<'_>> for web_sys::GpuBufferBinding {
    fn from(binding: BufferBinding) -> Self {
        let binding_js = web_sys::GpuBufferBinding::new(binding.buffer);

        if let Some(offset) = binding.offset {
            binding_js.set_offset(offset as f64);
        }

        if let Some(size) = binding.size {
            binding_js.set_size(size as f64);
        }

        binding_js
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_rounds_up_to_multiple() {
        assert_eq!(align_to(0, 4), 0);
        assert_eq!(align_to(1, 4), 4);
        assert_eq!(align_to(4, 4), 4);
        assert_eq!(align_to(130, 256), 256);
        assert_eq!(align_to(513, 256), 768);
    }

    #[test]
    fn usage_flags_accumulate() {
        let usage = BufferUsage::new().with_copy_dst().with_vertex();
        assert!(usage.contains(BufferUsage::new().with_vertex()));
        assert!(usage.contains(BufferUsage::new().with_copy_dst()));
        assert!(!usage.contains(BufferUsage::new().with_index()));

        let indirect = BufferUsage::new().with_indirect().with_copy_dst();
        assert_ne!(u32::from(indirect), u32::from(usage));
    }
}
