//! Just enough simulation to watch the sync bridge work: gravity,
//! a bouncy floor, and walls.

use awsm_unified_renderer::physics::{PhysicsHandle, PhysicsWorld};
use glam::Vec3;

#[derive(Debug, Clone)]
struct Body {
    position: Vec3,
    velocity: Vec3,
    radius: f32,
}

#[derive(Debug)]
pub struct ToyWorld {
    bodies: Vec<Option<Body>>,
    pub gravity: Vec3,
    pub floor: f32,
    pub walls: f32,
    pub restitution: f32,
}

impl Default for ToyWorld {
    fn default() -> Self {
        Self {
            bodies: Vec::new(),
            gravity: Vec3::new(0.0, -9.8, 0.0),
            floor: 0.0,
            walls: 15.0,
            restitution: 0.8,
        }
    }
}

impl ToyWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&mut self, dt: f32) {
        for body in self.bodies.iter_mut().flatten() {
            body.velocity += self.gravity * dt;
            body.position += body.velocity * dt;

            if body.position.y - body.radius < self.floor {
                body.position.y = self.floor + body.radius;
                body.velocity.y = -body.velocity.y * self.restitution;
            }

            for axis in [0, 2] {
                let limit = self.walls - body.radius;
                if body.position[axis].abs() > limit {
                    body.position[axis] = limit.copysign(body.position[axis]);
                    body.velocity[axis] = -body.velocity[axis] * self.restitution;
                }
            }
        }
    }

    fn body(&self, handle: PhysicsHandle) -> Option<&Body> {
        let index = usize::try_from(handle.raw()).ok()?;
        self.bodies.get(index)?.as_ref()
    }

    fn body_mut(&mut self, handle: PhysicsHandle) -> Option<&mut Body> {
        let index = usize::try_from(handle.raw()).ok()?;
        self.bodies.get_mut(index)?.as_mut()
    }
}

impl PhysicsWorld for ToyWorld {
    fn spawn(&mut self, position: Vec3, extent: f32) -> PhysicsHandle {
        let Ok(raw) = i32::try_from(self.bodies.len()) else {
            return PhysicsHandle::UNBOUND;
        };
        self.bodies.push(Some(Body {
            position,
            velocity: Vec3::ZERO,
            radius: extent,
        }));
        PhysicsHandle::new(raw)
    }

    fn set_velocity(&mut self, handle: PhysicsHandle, velocity: Vec3) {
        if let Some(body) = self.body_mut(handle) {
            body.velocity = velocity;
        }
    }

    fn get_position(&self, handle: PhysicsHandle) -> Vec3 {
        self.body(handle)
            .map(|body| body.position)
            .unwrap_or(Vec3::ZERO)
    }

    fn set_position(&mut self, handle: PhysicsHandle, position: Vec3) {
        if let Some(body) = self.body_mut(handle) {
            body.position = position;
            body.velocity = Vec3::ZERO;
        }
    }

    fn entity_count(&self) -> usize {
        self.bodies.iter().flatten().count()
    }

    fn despawn_all(&mut self) {
        self.bodies.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_fall_and_bounce() {
        let mut world = ToyWorld::new();
        let handle = world.spawn(Vec3::new(0.0, 5.0, 0.0), 0.5);

        world.step(0.1);
        assert!(world.get_position(handle).y < 5.0);

        for _ in 0..200 {
            world.step(0.016);
            assert!(world.get_position(handle).y >= 0.5);
        }
    }

    #[test]
    fn walls_contain_bodies() {
        let mut world = ToyWorld::new();
        let handle = world.spawn(Vec3::new(0.0, 1.0, 0.0), 1.0);
        world.set_velocity(handle, Vec3::new(100.0, 0.0, -100.0));

        for _ in 0..50 {
            world.step(0.016);
            let position = world.get_position(handle);
            assert!(position.x.abs() <= 14.0);
            assert!(position.z.abs() <= 14.0);
        }
    }

    #[test]
    fn unknown_handles_are_ignored() {
        let mut world = ToyWorld::new();
        world.set_position(PhysicsHandle::UNBOUND, Vec3::ONE);
        world.set_velocity(PhysicsHandle::new(3), Vec3::ONE);
        assert_eq!(world.get_position(PhysicsHandle::new(3)), Vec3::ZERO);

        world.spawn(Vec3::ZERO, 1.0);
        world.spawn(Vec3::ZERO, 1.0);
        assert_eq!(world.entity_count(), 2);
        world.despawn_all();
        assert_eq!(world.entity_count(), 0);
    }
}
