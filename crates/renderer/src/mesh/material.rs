use bytemuck::{Pod, Zeroable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(u32);

impl MaterialId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

/// Packed exactly as the shader's `Material` struct: 8 floats, 32 bytes
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MaterialData {
    pub color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub emissive: f32,
    _padding: f32,
}

impl MaterialData {
    pub const BYTE_SIZE: usize = 32;

    pub fn new(color: [f32; 4]) -> Self {
        Self {
            color,
            metallic: 0.0,
            roughness: 0.5,
            emissive: 0.0,
            _padding: 0.0,
        }
    }

    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic;
        self
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }
}

impl Default for MaterialData {
    fn default() -> Self {
        Self::new([1.0, 1.0, 1.0, 1.0])
    }
}
