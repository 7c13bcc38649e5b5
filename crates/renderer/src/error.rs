use awsm_unified_renderer_core::error::AwsmCoreError;
use thiserror::Error;

use crate::{
    bind_groups::AwsmBindGroupError, camera::AwsmCameraError, config::AwsmConfigError,
    geometry::AwsmGeometryError, instances::AwsmInstanceError, mesh::AwsmMeshError,
    scene::AwsmSceneError, shaders::AwsmShaderError, transform::AwsmTransformError,
};

#[derive(Error, Debug)]
pub enum AwsmError {
    #[error("{0}")]
    Core(#[from] AwsmCoreError),

    #[error("{0}")]
    Config(#[from] AwsmConfigError),

    #[error("{0}")]
    Mesh(#[from] AwsmMeshError),

    #[error("{0}")]
    Geometry(#[from] AwsmGeometryError),

    #[error("{0}")]
    Instance(#[from] AwsmInstanceError),

    #[error("{0}")]
    Transform(#[from] AwsmTransformError),

    #[error("{0}")]
    Scene(#[from] AwsmSceneError),

    #[error("{0}")]
    Camera(#[from] AwsmCameraError),

    #[error("{0}")]
    BindGroup(#[from] AwsmBindGroupError),

    #[error("{0}")]
    Shader(#[from] AwsmShaderError),

    #[error("[renderer] {0} has not been created yet")]
    NotInitialized(&'static str),

    #[error("[renderer] already disposed")]
    Disposed,
}

pub type Result<T> = std::result::Result<T, AwsmError>;
