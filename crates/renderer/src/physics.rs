//! Keeping scene objects and an external physics world in step.

use glam::Vec3;

use crate::scene::{BodyKind, Result, Scene};

/// Opaque entity id handed out by a `PhysicsWorld`.
/// Negative values mean "no entity"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicsHandle(i32);

impl PhysicsHandle {
    pub const UNBOUND: Self = Self(-1);

    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> i32 {
        self.0
    }

    pub fn is_bound(self) -> bool {
        self.0 >= 0
    }
}

impl Default for PhysicsHandle {
    fn default() -> Self {
        Self::UNBOUND
    }
}

/// The simulation the renderer talks to. Positions are world space
pub trait PhysicsWorld {
    /// Returns an unbound handle if the entity could not be created
    fn spawn(&mut self, position: Vec3, extent: f32) -> PhysicsHandle;
    fn set_velocity(&mut self, handle: PhysicsHandle, velocity: Vec3);
    fn get_position(&self, handle: PhysicsHandle) -> Vec3;
    fn set_position(&mut self, handle: PhysicsHandle, position: Vec3);
    fn entity_count(&self) -> usize;
    fn despawn_all(&mut self);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub pulled: usize,
    pub pushed: usize,
}

/// Bridges `Scene` objects that carry a `RigidBody` with a `PhysicsWorld`
#[derive(Debug, Default)]
pub struct PhysicsSync {
    last_stats: SyncStats,
}

impl PhysicsSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns an entity for every renderable rigid body that is not bound yet.
    /// Returns how many were spawned
    pub fn start(&mut self, scene: &mut Scene, world: &mut impl PhysicsWorld) -> Result<usize> {
        let mut spawned = 0;

        for object in scene.objects.values_mut() {
            let Some(body) = &object.rigid_body else {
                continue;
            };
            if !object.is_renderable() || object.physics_handle.is_bound() {
                continue;
            }

            let position = scene.transforms.world_position(object.transform)?;
            let handle = world.spawn(position, body.shape.extent());

            if !handle.is_bound() {
                tracing::warn!(
                    "physics world refused to spawn object {} at {position}",
                    object.object_id
                );
                continue;
            }

            if body.initial_velocity != Vec3::ZERO {
                world.set_velocity(handle, body.initial_velocity);
            }

            object.physics_handle = handle;
            spawned += 1;
        }

        tracing::debug!("spawned {spawned} physics entities");

        Ok(spawned)
    }

    /// Dynamic bodies take their position from the simulation (written into the
    /// local position). Kinematic bodies push their world position to it.
    /// Unbound objects are skipped
    pub fn sync(&mut self, scene: &mut Scene, world: &mut impl PhysicsWorld) -> Result<SyncStats> {
        let mut stats = SyncStats::default();

        for object in scene.objects.values() {
            let Some(body) = &object.rigid_body else {
                continue;
            };
            if !object.physics_handle.is_bound() {
                continue;
            }

            match body.kind {
                BodyKind::Dynamic => {
                    let position = world.get_position(object.physics_handle);
                    scene.transforms.set_position(object.transform, position)?;
                    stats.pulled += 1;
                }
                BodyKind::Kinematic => {
                    let position = scene.transforms.world_position(object.transform)?;
                    world.set_position(object.physics_handle, position);
                    stats.pushed += 1;
                }
            }
        }

        self.last_stats = stats;

        Ok(stats)
    }

    /// Despawns everything and unbinds every object
    pub fn reset(&mut self, scene: &mut Scene, world: &mut impl PhysicsWorld) {
        world.despawn_all();

        for object in scene.objects.values_mut() {
            object.physics_handle = PhysicsHandle::UNBOUND;
        }

        self.last_stats = SyncStats::default();
    }

    pub fn last_stats(&self) -> SyncStats {
        self.last_stats
    }
}

#[cfg(test)]
mod tests;
