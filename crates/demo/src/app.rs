use std::{cell::RefCell, f32::consts::TAU, rc::Rc};

use anyhow::Result;
use awsm_unified_renderer::{
    mesh::{MaterialData, MaterialId},
    physics::PhysicsSync,
    render::FrameStats,
    scene::{CollisionShape, NewObject, ObjectKey, RigidBody, Scene},
    transform::Transform,
    AwsmRenderer,
};
use glam::{Mat4, Vec3};
use gloo_render::AnimationFrame;
use web_sys::HtmlCanvasElement;

use crate::{config::CONFIG, meshes, physics::ToyWorld};

const BALL_RADIUS: f32 = 0.5;
const CRATE_HALF_EXTENT: f32 = 0.75;
const CAROUSEL_RADIUS: f32 = 6.0;
// seconds, so a hitch doesn't launch everything through the floor
const MAX_STEP: f32 = 0.05;

pub struct App {
    renderer: AwsmRenderer,
    canvas: HtmlCanvasElement,
    scene: Scene,
    world: ToyWorld,
    sync: PhysicsSync,
    carousel: ObjectKey,
    crates: Vec<ObjectKey>,
    last_timestamp: Option<f64>,
    frame_count: u64,
    animation_frame: Option<AnimationFrame>,
}

impl App {
    pub fn new(mut renderer: AwsmRenderer, canvas: HtmlCanvasElement) -> Result<Self> {
        let sphere = meshes::sphere(BALL_RADIUS, 16, 12);
        let cube = meshes::cube(CRATE_HALF_EXTENT);
        let grid = meshes::grid(CONFIG.grid_size, CONFIG.grid_divisions, 0.04);
        renderer.register_mesh("sphere", &sphere.vertices, &sphere.indices)?;
        renderer.register_mesh("cube", &cube.vertices, &cube.indices)?;
        renderer.register_mesh("grid", &grid.vertices, &grid.indices)?;

        let grid_material = renderer.register_material(MaterialData::new([0.6, 0.6, 0.65, 1.0]));
        let crate_material = renderer.register_material(
            MaterialData::new([0.72, 0.52, 0.3, 1.0]).with_roughness(0.9),
        );
        let ball_materials: Vec<MaterialId> = [
            [0.9, 0.25, 0.2, 1.0],
            [0.2, 0.6, 0.9, 1.0],
            [0.95, 0.8, 0.2, 1.0],
            [0.3, 0.85, 0.4, 1.0],
        ]
        .into_iter()
        .map(|color| renderer.register_material(MaterialData::new(color)))
        .collect();

        let mut scene = Scene::new();

        scene.add_object(
            NewObject::new(Transform::IDENTITY)
                .with_mesh("grid")
                .with_material(grid_material),
        )?;

        for index in 0..CONFIG.ball_count {
            let (position, velocity) = ball_start(index);
            let material = ball_materials[index % ball_materials.len()];
            scene.add_object(
                NewObject::new(Transform::IDENTITY.with_position(position))
                    .with_mesh("sphere")
                    .with_material(material)
                    .with_rigid_body(
                        RigidBody::dynamic(CollisionShape::Sphere {
                            radius: BALL_RADIUS,
                        })
                        .with_initial_velocity(velocity),
                    ),
            )?;
        }

        // crates ride on an invisible parent that bobs and spins
        let carousel = scene.add_object(NewObject::new(
            Transform::IDENTITY.with_position(Vec3::new(0.0, 2.0, 0.0)),
        ))?;

        let mut crates = Vec::with_capacity(CONFIG.crate_count);
        for index in 0..CONFIG.crate_count {
            let key = scene.add_object(
                NewObject::new(
                    Transform::IDENTITY.with_position(carousel_slot(index, 0.0)),
                )
                .with_parent(carousel)
                .with_mesh("cube")
                .with_material(crate_material)
                .with_rigid_body(RigidBody::kinematic(CollisionShape::Cube {
                    half_extent: CRATE_HALF_EXTENT,
                })),
            )?;
            crates.push(key);
        }

        let mut world = ToyWorld::new();
        world.walls = CONFIG.grid_size / 2.0;

        let mut sync = PhysicsSync::new();
        let spawned = sync.start(&mut scene, &mut world)?;
        tracing::info!(
            "scene ready: {} objects, {spawned} physics bodies",
            scene.len()
        );

        Ok(Self {
            renderer,
            canvas,
            scene,
            world,
            sync,
            carousel,
            crates,
            last_timestamp: None,
            frame_count: 0,
            animation_frame: None,
        })
    }

    fn tick(&mut self, timestamp: f64) -> Result<FrameStats> {
        let dt = self
            .last_timestamp
            .map(|last| ((timestamp - last) / 1000.0) as f32)
            .unwrap_or(0.0)
            .min(MAX_STEP);
        self.last_timestamp = Some(timestamp);

        self.world.step(dt);
        self.animate_carousel(timestamp, dt)?;
        self.update_camera(timestamp);

        let stats = self
            .renderer
            .update_frame(&mut self.scene, &mut self.world, &mut self.sync)?;

        self.frame_count += 1;
        if self.frame_count % 300 == 0 {
            tracing::debug!("frame {}: {stats:?}", self.frame_count);
        }

        Ok(stats)
    }

    fn animate_carousel(&mut self, timestamp: f64, dt: f32) -> Result<()> {
        let seconds = (timestamp / 1000.0) as f32;

        let carousel = self.scene.object(self.carousel)?.transform;
        self.scene
            .transforms
            .set_position(carousel, Vec3::new(0.0, 2.0 + seconds.sin(), 0.0))?;
        self.scene
            .transforms
            .rotate(carousel, Vec3::new(0.0, 45.0 * dt, 0.0))?;

        for (index, key) in self.crates.iter().enumerate() {
            self.scene
                .set_position(*key, carousel_slot(index, seconds * 0.5))?;
        }

        Ok(())
    }

    fn update_camera(&mut self, timestamp: f64) {
        let width = self.canvas.client_width().max(1) as u32;
        let height = self.canvas.client_height().max(1) as u32;
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }

        let angle = timestamp as f32 * CONFIG.camera_orbit_speed * TAU;
        let distance = CONFIG.camera_distance;
        let eye = Vec3::new(
            angle.cos() * distance,
            distance * 0.5,
            angle.sin() * distance,
        );

        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        let projection = Mat4::perspective_rh(
            45f32.to_radians(),
            width as f32 / height as f32,
            0.1,
            distance * 4.0,
        );

        self.renderer.set_view_projection(view, projection);
    }
}

/// Starts (or continues) the requestAnimationFrame loop
pub fn start(app: Rc<RefCell<App>>) {
    let animation_frame = gloo_render::request_animation_frame({
        let app = app.clone();
        move |timestamp| {
            if let Err(err) = app.borrow_mut().tick(timestamp) {
                tracing::error!("frame failed: {err:?}");
            }
            start(app);
        }
    });

    app.borrow_mut().animation_frame = Some(animation_frame);
}

// deterministic scatter: golden-angle spiral, stacked in layers
fn ball_start(index: usize) -> (Vec3, Vec3) {
    let golden_angle = TAU * (1.0 - 1.0 / 1.618_034);
    let angle = index as f32 * golden_angle;
    let radius = 1.5 + (index % 10) as f32 * 0.8;
    let height = 4.0 + (index / 10) as f32 * 2.0;

    let position = Vec3::new(angle.cos() * radius, height, angle.sin() * radius);
    let velocity = Vec3::new(-angle.sin(), 0.0, angle.cos()) * 2.0;

    (position, velocity)
}

fn carousel_slot(index: usize, phase: f32) -> Vec3 {
    let angle = phase + index as f32 / CONFIG.crate_count.max(1) as f32 * TAU;
    Vec3::new(angle.cos(), 0.0, angle.sin()) * CAROUSEL_RADIUS
}
