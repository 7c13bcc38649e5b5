use awsm_unified_renderer_core::{
    bind_groups::{
        BindGroupDescriptor, BindGroupEntry, BindGroupLayoutDescriptor, BindGroupLayoutEntry,
        BufferBindingLayout, BufferBindingType,
    },
    buffers::BufferBinding,
    error::AwsmCoreError,
    renderer::AwsmRendererWebGpu,
};
use strum::{EnumCount, EnumIter, IntoEnumIterator};
use thiserror::Error;

use crate::buffer::GrowableBuffer;

pub type Result<T> = std::result::Result<T, AwsmBindGroupError>;

#[derive(Error, Debug)]
pub enum AwsmBindGroupError {
    #[error("[bind group] {0} buffer has not been created yet")]
    MissingBuffer(BoundBuffer),

    #[error("[bind group] {0:?}")]
    Core(#[from] AwsmCoreError),
}

/// Every buffer the unified shader reads, in binding order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, strum::Display)]
pub enum BoundBuffer {
    ViewProjection,
    InstanceTransforms,
    InstanceMetadata,
    Materials,
}

impl BoundBuffer {
    pub fn binding(self) -> u32 {
        self as u32
    }

    fn layout_entry(self) -> BindGroupLayoutEntry {
        let binding_type = match self {
            Self::ViewProjection => BufferBindingType::Uniform,
            _ => BufferBindingType::ReadOnlyStorage,
        };

        let entry = BindGroupLayoutEntry::new(
            self.binding(),
            BufferBindingLayout::new().with_binding_type(binding_type),
        );

        match self {
            Self::ViewProjection | Self::InstanceTransforms => entry.with_visibility_vertex(),
            Self::InstanceMetadata => entry.with_visibility_vertex().with_visibility_fragment(),
            Self::Materials => entry.with_visibility_fragment(),
        }
    }
}

pub type BufferGenerations = [u64; BoundBuffer::COUNT];

/// Remembers which buffer allocations a bind group was built against
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationTracker {
    recorded: Option<BufferGenerations>,
}

impl GenerationTracker {
    pub fn is_stale(&self, current: &BufferGenerations) -> bool {
        self.recorded.as_ref() != Some(current)
    }

    pub fn record(&mut self, current: BufferGenerations) {
        self.recorded = Some(current);
    }

    pub fn clear(&mut self) {
        self.recorded = None;
    }

    pub fn is_recorded(&self) -> bool {
        self.recorded.is_some()
    }
}

/// The one bind group (group 0) shared by every draw
pub struct UnifiedBindGroup {
    pub layout: web_sys::GpuBindGroupLayout,
    bind_group: Option<web_sys::GpuBindGroup>,
    generations: GenerationTracker,
}

impl UnifiedBindGroup {
    pub fn new(gpu: &AwsmRendererWebGpu) -> Result<Self> {
        let layout = gpu.create_bind_group_layout(
            &BindGroupLayoutDescriptor::new(Some("Unified"))
                .with_entries(BoundBuffer::iter().map(BoundBuffer::layout_entry).collect())
                .into(),
        )?;

        Ok(Self {
            layout,
            bind_group: None,
            generations: GenerationTracker::default(),
        })
    }

    /// `buffers` must be in `BoundBuffer` order
    pub fn recreate(
        &mut self,
        gpu: &AwsmRendererWebGpu,
        buffers: [&GrowableBuffer; BoundBuffer::COUNT],
    ) -> Result<()> {
        let mut entries = Vec::with_capacity(BoundBuffer::COUNT);
        let mut generations = [0; BoundBuffer::COUNT];

        for (index, (bound, buffer)) in BoundBuffer::iter().zip(buffers).enumerate() {
            let gpu_buffer = buffer
                .gpu_buffer()
                .ok_or(AwsmBindGroupError::MissingBuffer(bound))?;
            entries.push(BindGroupEntry::new(
                bound.binding(),
                BufferBinding::new(gpu_buffer),
            ));
            generations[index] = buffer.generation();
        }

        let bind_group = gpu.create_bind_group(
            &BindGroupDescriptor::new(&self.layout, Some("Unified"), entries).into(),
        );

        self.bind_group = Some(bind_group);
        self.generations.record(generations);

        tracing::debug!("unified bind group recreated");

        Ok(())
    }

    pub fn is_stale(&self, buffers: [&GrowableBuffer; BoundBuffer::COUNT]) -> bool {
        self.generations
            .is_stale(&buffers.map(|buffer| buffer.generation()))
    }

    pub fn bind_group(&self) -> Option<&web_sys::GpuBindGroup> {
        self.bind_group.as_ref()
    }

    pub fn clear(&mut self) {
        self.bind_group = None;
        self.generations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_follow_declaration_order() {
        let bindings: Vec<u32> = BoundBuffer::iter().map(BoundBuffer::binding).collect();
        assert_eq!(bindings, vec![0, 1, 2, 3]);
    }

    #[test]
    fn tracker_detects_any_reallocation() {
        let mut tracker = GenerationTracker::default();
        assert!(tracker.is_stale(&[1, 1, 1, 1]));

        tracker.record([1, 1, 1, 1]);
        assert!(!tracker.is_stale(&[1, 1, 1, 1]));
        assert!(tracker.is_stale(&[1, 2, 1, 1]));
        assert!(tracker.is_stale(&[1, 1, 1, 3]));

        tracker.clear();
        assert!(!tracker.is_recorded());
        assert!(tracker.is_stale(&[1, 1, 1, 1]));
    }
}
