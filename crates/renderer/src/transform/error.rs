use thiserror::Error;

use super::TransformKey;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AwsmTransformError {
    #[error("[transform] not found: {0:?}")]
    LocalNotFound(TransformKey),

    #[error("[transform] parent not found: {0:?}")]
    ParentNotFound(TransformKey),

    #[error("[transform] {child:?} cannot be parented to its own descendant {parent:?}")]
    Cycle {
        child: TransformKey,
        parent: TransformKey,
    },
}

pub type Result<T> = std::result::Result<T, AwsmTransformError>;
