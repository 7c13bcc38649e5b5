mod error;
mod transforms;

use glam::{Mat3, Mat4, Vec3};

pub use error::{AwsmTransformError, Result};
pub use transforms::{TransformKey, Transforms};

/// Local transform, relative to the parent (or to the world for roots).
/// Rotation is Euler angles in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::splat(scale))
    }

    pub fn to_matrix(&self) -> Mat4 {
        compose_matrix(self.position, self.rotation, self.scale)
    }
}

/// Resolved world-space values, cached per node until it is dirtied
#[derive(Debug, Clone, PartialEq)]
pub struct WorldTransform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub matrix: Mat4,
}

impl WorldTransform {
    pub fn from_root(local: &Transform) -> Self {
        Self {
            position: local.position,
            rotation: local.rotation,
            scale: local.scale,
            matrix: local.to_matrix(),
        }
    }

    /// Positions are offset by the parent and stretched by the parent's scale,
    /// rotations add up and scales multiply.
    /// The parent's rotation does not swing the child's position
    pub fn from_parent(parent: &WorldTransform, local: &Transform) -> Self {
        let position = parent.position + local.position * parent.scale;
        let rotation = parent.rotation + local.rotation;
        let scale = parent.scale * local.scale;

        Self {
            position,
            rotation,
            scale,
            matrix: compose_matrix(position, rotation, scale),
        }
    }
}

/// Column-major model matrix: rotation is Rz * Ry * Rx (degrees),
/// each rotation column is scaled per axis, translation sits in the last column
pub fn compose_matrix(position: Vec3, rotation_degrees: Vec3, scale: Vec3) -> Mat4 {
    let rotation = Mat3::from_rotation_z(rotation_degrees.z.to_radians())
        * Mat3::from_rotation_y(rotation_degrees.y.to_radians())
        * Mat3::from_rotation_x(rotation_degrees.x.to_radians());

    Mat4::from_cols(
        (rotation.x_axis * scale.x).extend(0.0),
        (rotation.y_axis * scale.y).extend(0.0),
        (rotation.z_axis * scale.z).extend(0.0),
        position.extend(1.0),
    )
}

#[cfg(test)]
mod tests;
