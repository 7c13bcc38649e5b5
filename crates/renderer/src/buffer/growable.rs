use awsm_unified_renderer_core::{
    buffers::{align_to, BufferDescriptor, BufferUsage, COPY_BUFFER_ALIGNMENT},
    error::AwsmCoreError,
    renderer::AwsmRendererWebGpu,
};

/// Capacity bookkeeping for a GPU buffer that only ever grows.
///
/// When a write needs more room than the current allocation, the new size is
/// the largest of: the required size, double the current size, and the floor.
/// Every reallocation bumps `generation`, so anything holding onto the old
/// `GpuBuffer` (i.e. bind groups) can tell it has been replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferCapacity {
    floor: usize,
    capacity: usize,
    generation: u64,
}

impl BufferCapacity {
    pub fn new(floor: usize) -> Self {
        Self {
            floor: align_to(floor.max(COPY_BUFFER_ALIGNMENT), COPY_BUFFER_ALIGNMENT),
            capacity: 0,
            generation: 0,
        }
    }

    /// The size to reallocate to, or `None` if `required` bytes already fit.
    /// A zero-sized request still needs an allocation, since bindings must be non-empty
    pub fn required_growth(&self, required: usize) -> Option<usize> {
        let required = align_to(
            required.max(COPY_BUFFER_ALIGNMENT),
            COPY_BUFFER_ALIGNMENT,
        );

        if self.capacity >= required {
            return None;
        }

        Some(
            required
                .max(self.floor)
                .max(self.capacity.saturating_mul(2)),
        )
    }

    pub fn grow_to(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.generation += 1;
    }

    pub fn release(&mut self) {
        self.capacity = 0;
        self.generation += 1;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn floor(&self) -> usize {
        self.floor
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A GPU buffer that is recreated (never shrunk) when written data outgrows it.
/// Writes always start at offset zero and overwrite the whole payload
#[derive(Debug)]
pub struct GrowableBuffer {
    label: &'static str,
    usage: BufferUsage,
    capacity: BufferCapacity,
    gpu_buffer: Option<web_sys::GpuBuffer>,
}

impl GrowableBuffer {
    pub fn new(label: &'static str, usage: BufferUsage, floor: usize) -> Self {
        Self {
            label,
            usage: usage.with_copy_dst(),
            capacity: BufferCapacity::new(floor),
            gpu_buffer: None,
        }
    }

    /// Returns true if the underlying `GpuBuffer` was (re)created
    pub fn ensure_capacity(
        &mut self,
        gpu: &AwsmRendererWebGpu,
        required: usize,
    ) -> Result<bool, AwsmCoreError> {
        let Some(size) = self.capacity.required_growth(required) else {
            return Ok(false);
        };

        let buffer =
            gpu.create_buffer(&BufferDescriptor::new(Some(self.label), size, self.usage).into())?;

        if let Some(old) = self.gpu_buffer.replace(buffer) {
            old.destroy();
        }

        tracing::debug!(
            "{} buffer resized: {} -> {} bytes",
            self.label,
            self.capacity.capacity(),
            size
        );

        self.capacity.grow_to(size);

        Ok(true)
    }

    /// Returns true if the buffer had to be recreated to fit `data`
    pub fn write(&mut self, gpu: &AwsmRendererWebGpu, data: &[u8]) -> Result<bool, AwsmCoreError> {
        let resized = self.ensure_capacity(gpu, data.len())?;

        if let Some(buffer) = &self.gpu_buffer {
            if !data.is_empty() {
                gpu.write_buffer(buffer, None, data)?;
            }
        }

        Ok(resized)
    }

    pub fn gpu_buffer(&self) -> Option<&web_sys::GpuBuffer> {
        self.gpu_buffer.as_ref()
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn capacity(&self) -> usize {
        self.capacity.capacity()
    }

    pub fn generation(&self) -> u64 {
        self.capacity.generation()
    }

    /// Returns false if there was nothing to release
    pub fn destroy(&mut self) -> bool {
        match self.gpu_buffer.take() {
            Some(buffer) => {
                buffer.destroy();
                self.capacity.release();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_allocation_uses_floor() {
        let capacity = BufferCapacity::new(1024);
        assert_eq!(capacity.required_growth(0), Some(1024));
        assert_eq!(capacity.required_growth(10), Some(1024));
        assert_eq!(capacity.required_growth(4000), Some(4000));
    }

    #[test]
    fn growth_doubles_and_never_shrinks() {
        let mut capacity = BufferCapacity::new(16);
        capacity.grow_to(100);
        assert_eq!(capacity.generation(), 1);

        assert_eq!(capacity.required_growth(100), None);
        assert_eq!(capacity.required_growth(8), None);
        assert_eq!(capacity.required_growth(101), Some(200));
        assert_eq!(capacity.required_growth(1000), Some(1000));

        capacity.grow_to(200);
        assert_eq!(capacity.capacity(), 200);
        assert_eq!(capacity.generation(), 2);
    }

    #[test]
    fn requests_are_aligned() {
        let capacity = BufferCapacity::new(3);
        assert_eq!(capacity.floor(), 4);
        assert_eq!(capacity.required_growth(5), Some(8));
    }

    #[test]
    fn release_forces_reallocation() {
        let mut capacity = BufferCapacity::new(64);
        capacity.grow_to(64);
        capacity.release();
        assert_eq!(capacity.capacity(), 0);
        assert_eq!(capacity.generation(), 2);
        assert_eq!(capacity.required_growth(4), Some(64));
    }

    #[test]
    fn destroy_without_allocation_is_noop() {
        let mut buffer = GrowableBuffer::new("Test", BufferUsage::new().with_storage(), 64);
        assert!(buffer.gpu_buffer().is_none());
        assert!(!buffer.destroy());
        assert!(!buffer.destroy());
        assert_eq!(buffer.generation(), 0);
    }
}
