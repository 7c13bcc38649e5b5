//! Scene objects: a transform plus whatever makes it drawable or simulated.

use glam::Vec3;
use slotmap::{new_key_type, DenseSlotMap};
use thiserror::Error;

use crate::{
    instances::{InstanceRecord, Instances},
    mesh::{AwsmMeshError, MaterialId, MeshRegistry},
    physics::PhysicsHandle,
    transform::{AwsmTransformError, Transform, TransformKey, Transforms},
};

new_key_type! {
    pub struct ObjectKey;
}

pub type Result<T> = std::result::Result<T, AwsmSceneError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AwsmSceneError {
    #[error("[scene] object not found: {0:?}")]
    ObjectNotFound(ObjectKey),

    #[error("[scene] {0}")]
    Mesh(#[from] AwsmMeshError),

    #[error("[scene] {0}")]
    Transform(#[from] AwsmTransformError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Simulation drives the object
    Dynamic,
    /// The object drives the simulation
    Kinematic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionShape {
    Sphere { radius: f32 },
    Cube { half_extent: f32 },
}

impl CollisionShape {
    /// Single size value handed to the physics world when spawning
    pub fn extent(&self) -> f32 {
        match *self {
            Self::Sphere { radius } => radius,
            Self::Cube { half_extent } => half_extent,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub kind: BodyKind,
    pub shape: CollisionShape,
    pub initial_velocity: Vec3,
}

impl RigidBody {
    pub fn dynamic(shape: CollisionShape) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            shape,
            initial_velocity: Vec3::ZERO,
        }
    }

    pub fn kinematic(shape: CollisionShape) -> Self {
        Self {
            kind: BodyKind::Kinematic,
            shape,
            initial_velocity: Vec3::ZERO,
        }
    }

    pub fn with_initial_velocity(mut self, velocity: Vec3) -> Self {
        self.initial_velocity = velocity;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub object_id: u32,
    pub transform: TransformKey,
    pub mesh_id: Option<String>,
    pub material_id: MaterialId,
    pub rigid_body: Option<RigidBody>,
    pub physics_handle: PhysicsHandle,
}

impl SceneObject {
    pub fn is_renderable(&self) -> bool {
        self.mesh_id.is_some()
    }
}

/// Description of an object to add to a `Scene`
#[derive(Debug, Clone)]
pub struct NewObject {
    pub transform: Transform,
    pub parent: Option<ObjectKey>,
    pub mesh_id: Option<String>,
    pub material_id: MaterialId,
    pub rigid_body: Option<RigidBody>,
}

impl NewObject {
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            parent: None,
            mesh_id: None,
            material_id: MaterialId::new(0),
            rigid_body: None,
        }
    }

    pub fn with_parent(mut self, parent: ObjectKey) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_mesh(mut self, mesh_id: impl Into<String>) -> Self {
        self.mesh_id = Some(mesh_id.into());
        self
    }

    pub fn with_material(mut self, material_id: MaterialId) -> Self {
        self.material_id = material_id;
        self
    }

    pub fn with_rigid_body(mut self, rigid_body: RigidBody) -> Self {
        self.rigid_body = Some(rigid_body);
        self
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    pub transforms: Transforms,
    pub(crate) objects: DenseSlotMap<ObjectKey, SceneObject>,
    next_object_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: NewObject) -> Result<ObjectKey> {
        let parent = match object.parent {
            Some(parent) => Some(self.object(parent)?.transform),
            None => None,
        };

        let transform = self.transforms.insert(object.transform, parent)?;
        let object_id = self.next_object_id;
        self.next_object_id += 1;

        Ok(self.objects.insert(SceneObject {
            object_id,
            transform,
            mesh_id: object.mesh_id,
            material_id: object.material_id,
            rigid_body: object.rigid_body,
            physics_handle: PhysicsHandle::UNBOUND,
        }))
    }

    /// Drops the object and its transform (children become roots).
    /// Any physics entity is left alone, only the local handle is cleared
    pub fn remove_object(&mut self, key: ObjectKey) -> Result<SceneObject> {
        let mut object = self
            .objects
            .remove(key)
            .ok_or(AwsmSceneError::ObjectNotFound(key))?;

        self.transforms.remove(object.transform)?;
        object.physics_handle = PhysicsHandle::UNBOUND;

        Ok(object)
    }

    pub fn object(&self, key: ObjectKey) -> Result<&SceneObject> {
        self.objects
            .get(key)
            .ok_or(AwsmSceneError::ObjectNotFound(key))
    }

    pub fn object_mut(&mut self, key: ObjectKey) -> Result<&mut SceneObject> {
        self.objects
            .get_mut(key)
            .ok_or(AwsmSceneError::ObjectNotFound(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &SceneObject)> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn set_position(&mut self, key: ObjectKey, position: Vec3) -> Result<()> {
        let transform = self.object(key)?.transform;
        Ok(self.transforms.set_position(transform, position)?)
    }

    pub fn world_position(&mut self, key: ObjectKey) -> Result<Vec3> {
        let transform = self.object(key)?.transform;
        Ok(self.transforms.world_position(transform)?)
    }

    /// Rebuilds the instance list from every renderable object.
    ///
    /// Objects are grouped by mesh in registry order, so each mesh ends up
    /// as one contiguous batch. Within a mesh, objects keep the order they
    /// were added in, removals included.
    /// Returns the number of records pushed
    pub fn populate_instances(
        &mut self,
        registry: &MeshRegistry,
        instances: &mut Instances,
    ) -> Result<usize> {
        self.transforms.update_world();

        let mut renderables = Vec::new();
        for (key, object) in self.objects.iter() {
            if let Some(mesh_id) = &object.mesh_id {
                registry.material(object.material_id)?;
                renderables.push(((registry.mesh_index(mesh_id)?, object.object_id), key));
            }
        }
        // dense storage swap-removes, so arena order is not insertion order
        renderables.sort_by_key(|(order, _)| *order);

        instances.clear();
        for (_, key) in &renderables {
            let object = &self.objects[*key];
            let Some(mesh_id) = &object.mesh_id else {
                continue;
            };
            let world_transform = self.transforms.world_matrix(object.transform)?;
            instances.push(InstanceRecord {
                world_transform,
                material_id: object.material_id,
                mesh_id: mesh_id.clone(),
                object_id: object.object_id,
            });
        }

        Ok(renderables.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MaterialData;

    fn registry() -> MeshRegistry {
        let mut registry = MeshRegistry::new();
        registry
            .register_mesh("sphere", &[0.0; 9], &[0, 1, 2])
            .unwrap();
        registry.register_mesh("cube", &[0.0; 9], &[0, 1, 2]).unwrap();
        registry.register_material(MaterialData::default());
        registry
    }

    #[test]
    fn populate_groups_by_registry_order() {
        let registry = registry();
        let mut scene = Scene::new();

        for (index, mesh) in ["cube", "sphere", "cube", "sphere"].iter().enumerate() {
            scene
                .add_object(
                    NewObject::new(
                        Transform::IDENTITY.with_position(Vec3::X * index as f32),
                    )
                    .with_mesh(*mesh),
                )
                .unwrap();
        }
        // transform-only object, never drawn
        scene.add_object(NewObject::new(Transform::IDENTITY)).unwrap();

        let mut instances = Instances::new(1024);
        assert_eq!(scene.populate_instances(&registry, &mut instances).unwrap(), 4);

        let order: Vec<(&str, u32)> = instances
            .pending()
            .iter()
            .map(|record| (record.mesh_id.as_str(), record.object_id))
            .collect();
        assert_eq!(
            order,
            vec![("sphere", 1), ("sphere", 3), ("cube", 0), ("cube", 2)]
        );

        instances.prepare(&registry).unwrap();
        assert_eq!(instances.batches().len(), 2);
    }

    #[test]
    fn populate_keeps_insertion_order_after_removal() {
        let registry = registry();
        let mut scene = Scene::new();

        let keys: Vec<ObjectKey> = (0..4)
            .map(|_| {
                scene
                    .add_object(NewObject::new(Transform::IDENTITY).with_mesh("sphere"))
                    .unwrap()
            })
            .collect();
        scene.remove_object(keys[0]).unwrap();

        let mut instances = Instances::new(1024);
        assert_eq!(scene.populate_instances(&registry, &mut instances).unwrap(), 3);

        let object_ids: Vec<u32> = instances
            .pending()
            .iter()
            .map(|record| record.object_id)
            .collect();
        assert_eq!(object_ids, vec![1, 2, 3]);
    }

    #[test]
    fn populate_uses_world_transforms() {
        let registry = registry();
        let mut scene = Scene::new();
        let parent = scene
            .add_object(NewObject::new(
                Transform::IDENTITY.with_position(Vec3::new(0.0, 10.0, 0.0)),
            ))
            .unwrap();
        scene
            .add_object(
                NewObject::new(Transform::IDENTITY.with_position(Vec3::X))
                    .with_parent(parent)
                    .with_mesh("sphere"),
            )
            .unwrap();

        let mut instances = Instances::new(1024);
        scene.populate_instances(&registry, &mut instances).unwrap();

        assert_eq!(
            instances.pending()[0].world_transform.w_axis.truncate(),
            Vec3::new(1.0, 10.0, 0.0)
        );
    }

    #[test]
    fn unknown_mesh_or_material_is_an_error() {
        let registry = registry();
        let mut instances = Instances::new(1024);

        let mut scene = Scene::new();
        scene
            .add_object(NewObject::new(Transform::IDENTITY).with_mesh("torus"))
            .unwrap();
        assert_eq!(
            scene.populate_instances(&registry, &mut instances),
            Err(AwsmSceneError::Mesh(AwsmMeshError::MeshNotFound(
                "torus".to_string()
            )))
        );

        let mut scene = Scene::new();
        scene
            .add_object(
                NewObject::new(Transform::IDENTITY)
                    .with_mesh("cube")
                    .with_material(MaterialId::new(9)),
            )
            .unwrap();
        assert!(scene.populate_instances(&registry, &mut instances).is_err());
    }

    #[test]
    fn remove_object_clears_handle_and_transform() {
        let mut scene = Scene::new();
        let key = scene
            .add_object(NewObject::new(Transform::IDENTITY).with_mesh("cube"))
            .unwrap();
        scene.object_mut(key).unwrap().physics_handle = PhysicsHandle::new(4);

        let removed = scene.remove_object(key).unwrap();
        assert_eq!(removed.physics_handle, PhysicsHandle::UNBOUND);
        assert!(!scene.transforms.contains(removed.transform));
        assert!(scene.is_empty());
        assert_eq!(
            scene.remove_object(key),
            Err(AwsmSceneError::ObjectNotFound(key))
        );
    }

    #[test]
    fn object_ids_are_never_reused() {
        let mut scene = Scene::new();
        let first = scene.add_object(NewObject::new(Transform::IDENTITY)).unwrap();
        scene.remove_object(first).unwrap();
        let second = scene.add_object(NewObject::new(Transform::IDENTITY)).unwrap();

        assert_eq!(scene.object(second).unwrap().object_id, 1);
    }
}
