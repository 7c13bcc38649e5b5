use askama::Template;
use thiserror::Error;

use crate::bind_groups::BoundBuffer;

pub type Result<T> = std::result::Result<T, AwsmShaderError>;

#[derive(Error, Debug)]
pub enum AwsmShaderError {
    #[error("[shader] Template error: {0:?}")]
    Template(#[from] askama::Error),
}

#[derive(Template, Debug)]
#[template(path = "unified.wgsl", whitespace = "minimize")]
pub struct ShaderTemplateUnified {
    pub binding_view_projection: u32,
    pub binding_transforms: u32,
    pub binding_metadata: u32,
    pub binding_materials: u32,
    pub ambient: f32,
}

impl Default for ShaderTemplateUnified {
    fn default() -> Self {
        Self {
            binding_view_projection: BoundBuffer::ViewProjection.binding(),
            binding_transforms: BoundBuffer::InstanceTransforms.binding(),
            binding_metadata: BoundBuffer::InstanceMetadata.binding(),
            binding_materials: BoundBuffer::Materials.binding(),
            ambient: 0.25,
        }
    }
}

impl ShaderTemplateUnified {
    pub fn into_source(self) -> Result<String> {
        Ok(self.render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_are_substituted() {
        let source = ShaderTemplateUnified::default().into_source().unwrap();

        assert!(source.contains("@group(0) @binding(0) var<uniform> camera"));
        assert!(source.contains("@group(0) @binding(1) var<storage, read> transforms"));
        assert!(source.contains("@group(0) @binding(2) var<storage, read> metadata"));
        assert!(source.contains("@group(0) @binding(3) var<storage, read> materials"));
        assert!(source.contains("fn vert_main"));
        assert!(source.contains("fn frag_main"));
        assert!(!source.contains("{{"));
    }
}
