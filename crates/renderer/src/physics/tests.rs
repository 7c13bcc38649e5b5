use std::collections::HashMap;

use glam::Vec3;

use super::*;
use crate::{
    scene::{CollisionShape, NewObject, RigidBody},
    transform::Transform,
};

#[derive(Default)]
struct FakeWorld {
    next: i32,
    refuse_spawns: bool,
    positions: HashMap<i32, Vec3>,
    velocities: HashMap<i32, Vec3>,
    extents: HashMap<i32, f32>,
}

impl FakeWorld {
    fn step(&mut self, dt: f32) {
        for (handle, velocity) in &self.velocities {
            if let Some(position) = self.positions.get_mut(handle) {
                *position += *velocity * dt;
            }
        }
    }
}

impl PhysicsWorld for FakeWorld {
    fn spawn(&mut self, position: Vec3, extent: f32) -> PhysicsHandle {
        if self.refuse_spawns {
            return PhysicsHandle::new(-1);
        }
        let handle = self.next;
        self.next += 1;
        self.positions.insert(handle, position);
        self.extents.insert(handle, extent);
        PhysicsHandle::new(handle)
    }

    fn set_velocity(&mut self, handle: PhysicsHandle, velocity: Vec3) {
        self.velocities.insert(handle.raw(), velocity);
    }

    fn get_position(&self, handle: PhysicsHandle) -> Vec3 {
        self.positions
            .get(&handle.raw())
            .copied()
            .unwrap_or(Vec3::ZERO)
    }

    fn set_position(&mut self, handle: PhysicsHandle, position: Vec3) {
        self.positions.insert(handle.raw(), position);
    }

    fn entity_count(&self) -> usize {
        self.positions.len()
    }

    fn despawn_all(&mut self) {
        self.positions.clear();
        self.velocities.clear();
        self.extents.clear();
    }
}

fn ball(position: Vec3) -> NewObject {
    NewObject::new(Transform::IDENTITY.with_position(position))
        .with_mesh("sphere")
        .with_rigid_body(
            RigidBody::dynamic(CollisionShape::Sphere { radius: 0.5 })
                .with_initial_velocity(Vec3::new(0.0, -1.0, 0.0)),
        )
}

#[test]
fn start_spawns_renderable_bodies_at_world_position() {
    let mut scene = Scene::new();
    let mut world = FakeWorld::default();

    let parent = scene
        .add_object(NewObject::new(
            Transform::IDENTITY.with_position(Vec3::new(0.0, 5.0, 0.0)),
        ))
        .unwrap();
    let ball_key = scene
        .add_object(ball(Vec3::X).with_parent(parent))
        .unwrap();
    let crate_key = scene
        .add_object(
            NewObject::new(Transform::IDENTITY)
                .with_mesh("cube")
                .with_rigid_body(RigidBody::kinematic(CollisionShape::Cube {
                    half_extent: 2.0,
                })),
        )
        .unwrap();
    // not renderable, so never spawned
    scene
        .add_object(
            NewObject::new(Transform::IDENTITY)
                .with_rigid_body(RigidBody::dynamic(CollisionShape::Sphere { radius: 1.0 })),
        )
        .unwrap();

    let mut sync = PhysicsSync::new();
    assert_eq!(sync.start(&mut scene, &mut world).unwrap(), 2);
    assert_eq!(world.entity_count(), 2);

    let ball_handle = scene.object(ball_key).unwrap().physics_handle;
    let crate_handle = scene.object(crate_key).unwrap().physics_handle;
    assert!(ball_handle.is_bound());
    assert_eq!(world.get_position(ball_handle), Vec3::new(1.0, 5.0, 0.0));
    assert_eq!(world.extents[&ball_handle.raw()], 0.5);
    assert_eq!(world.extents[&crate_handle.raw()], 2.0);
    assert_eq!(
        world.velocities.get(&ball_handle.raw()),
        Some(&Vec3::new(0.0, -1.0, 0.0))
    );
    // zero velocity is not pushed
    assert!(!world.velocities.contains_key(&crate_handle.raw()));

    // already bound objects are skipped
    assert_eq!(sync.start(&mut scene, &mut world).unwrap(), 0);
}

#[test]
fn dynamic_bodies_follow_the_simulation() {
    let mut scene = Scene::new();
    let mut world = FakeWorld::default();
    let key = scene.add_object(ball(Vec3::new(0.0, 10.0, 0.0))).unwrap();

    let mut sync = PhysicsSync::new();
    sync.start(&mut scene, &mut world).unwrap();

    world.step(2.0);
    let stats = sync.sync(&mut scene, &mut world).unwrap();
    assert_eq!(stats, SyncStats { pulled: 1, pushed: 0 });

    let transform = scene.object(key).unwrap().transform;
    assert_eq!(
        scene.transforms.get_local(transform).unwrap().position,
        Vec3::new(0.0, 8.0, 0.0)
    );
    assert!(scene.transforms.is_dirty(transform));
}

#[test]
fn kinematic_bodies_drive_the_simulation() {
    let mut scene = Scene::new();
    let mut world = FakeWorld::default();
    let key = scene
        .add_object(
            NewObject::new(Transform::IDENTITY)
                .with_mesh("cube")
                .with_rigid_body(RigidBody::kinematic(CollisionShape::Cube {
                    half_extent: 1.0,
                })),
        )
        .unwrap();

    let mut sync = PhysicsSync::new();
    sync.start(&mut scene, &mut world).unwrap();

    scene.set_position(key, Vec3::new(3.0, 0.0, -2.0)).unwrap();
    let stats = sync.sync(&mut scene, &mut world).unwrap();
    assert_eq!(stats.pushed, 1);
    assert_eq!(sync.last_stats(), stats);

    let handle = scene.object(key).unwrap().physics_handle;
    assert_eq!(world.get_position(handle), Vec3::new(3.0, 0.0, -2.0));
}

#[test]
fn refused_spawns_stay_unbound_and_are_skipped() {
    let mut scene = Scene::new();
    let mut world = FakeWorld {
        refuse_spawns: true,
        ..Default::default()
    };
    let key = scene.add_object(ball(Vec3::ZERO)).unwrap();

    let mut sync = PhysicsSync::new();
    assert_eq!(sync.start(&mut scene, &mut world).unwrap(), 0);
    assert_eq!(
        scene.object(key).unwrap().physics_handle,
        PhysicsHandle::UNBOUND
    );

    let stats = sync.sync(&mut scene, &mut world).unwrap();
    assert_eq!(stats, SyncStats::default());
}

#[test]
fn reset_despawns_and_unbinds() {
    let mut scene = Scene::new();
    let mut world = FakeWorld::default();
    let a = scene.add_object(ball(Vec3::ZERO)).unwrap();
    let b = scene.add_object(ball(Vec3::Y)).unwrap();

    let mut sync = PhysicsSync::new();
    sync.start(&mut scene, &mut world).unwrap();
    sync.reset(&mut scene, &mut world);

    assert_eq!(world.entity_count(), 0);
    assert!(!scene.object(a).unwrap().physics_handle.is_bound());
    assert!(!scene.object(b).unwrap().physics_handle.is_bound());

    // and they can be spawned again
    assert_eq!(sync.start(&mut scene, &mut world).unwrap(), 2);
}
