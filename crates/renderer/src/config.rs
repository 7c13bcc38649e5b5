//! Renderer configuration.
//!
//! With the `serde` feature enabled, every field is optional when
//! deserializing and falls back to its default, so a config like
//! `{"indirectDrawThreshold": 64}` is valid on its own.

use thiserror::Error;

/// Instance count at which the renderer switches to indirect draws
pub const DEFAULT_INDIRECT_DRAW_THRESHOLD: u32 = 20;
pub const DEFAULT_MAX_DRAW_COMMANDS: u32 = 1000;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RendererConfig {
    pub indirect_draw_threshold: u32,
    pub max_draw_commands: u32,
    pub clear_color: [f64; 4],
    pub depth_test: bool,
    pub buffer_floors: BufferFloors,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            indirect_draw_threshold: DEFAULT_INDIRECT_DRAW_THRESHOLD,
            max_draw_commands: DEFAULT_MAX_DRAW_COMMANDS,
            clear_color: [0.07, 0.08, 0.11, 1.0],
            depth_test: true,
            buffer_floors: BufferFloors::default(),
        }
    }
}

impl RendererConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indirect_draw_threshold(mut self, threshold: u32) -> Self {
        self.indirect_draw_threshold = threshold;
        self
    }

    pub fn with_max_draw_commands(mut self, max_draw_commands: u32) -> Self {
        self.max_draw_commands = max_draw_commands;
        self
    }

    pub fn with_clear_color(mut self, clear_color: [f64; 4]) -> Self {
        self.clear_color = clear_color;
        self
    }

    pub fn with_depth_test(mut self, depth_test: bool) -> Self {
        self.depth_test = depth_test;
        self
    }

    pub fn with_buffer_floors(mut self, buffer_floors: BufferFloors) -> Self {
        self.buffer_floors = buffer_floors;
        self
    }

    pub fn validate(&self) -> Result<(), AwsmConfigError> {
        if self.indirect_draw_threshold == 0 {
            return Err(AwsmConfigError::ZeroIndirectDrawThreshold);
        }
        if self.max_draw_commands == 0 {
            return Err(AwsmConfigError::ZeroMaxDrawCommands);
        }
        self.buffer_floors.validate()
    }
}

/// Minimum byte size of each growable GPU buffer.
/// A buffer is never created smaller than its floor, which keeps early
/// registrations from triggering a reallocation each time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct BufferFloors {
    pub vertex_bytes: usize,
    pub index_bytes: usize,
    pub material_bytes: usize,
    pub instance_bytes: usize,
}

impl Default for BufferFloors {
    fn default() -> Self {
        Self {
            vertex_bytes: 1024 * 1024,
            index_bytes: 512 * 1024,
            material_bytes: 4 * 1024,
            instance_bytes: 64 * 1024,
        }
    }
}

impl BufferFloors {
    fn validate(&self) -> Result<(), AwsmConfigError> {
        for (name, value) in [
            ("vertex", self.vertex_bytes),
            ("index", self.index_bytes),
            ("material", self.material_bytes),
            ("instance", self.instance_bytes),
        ] {
            if value == 0 {
                return Err(AwsmConfigError::ZeroBufferFloor(name));
            }
        }
        Ok(())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AwsmConfigError {
    #[error("[config] indirect draw threshold must be at least 1")]
    ZeroIndirectDrawThreshold,

    #[error("[config] max draw commands must be at least 1")]
    ZeroMaxDrawCommands,

    #[error("[config] {0} buffer floor must be non-zero")]
    ZeroBufferFloor(&'static str),
}
