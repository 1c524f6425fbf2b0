use clip_viz::{cube_mesh, draw_frame, draw_status, reclip, OrbitCamera, PlaneControl, ViewerSink};
use macroquad::prelude::*;
use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};
use plane_clip::{ClipSettings, Scene};

const NUM_CUBES: usize = 10;
const WORLD_SIZE: f32 = 8.0;
const MIN_CUBE_SIZE: f32 = 0.6;
const MAX_CUBE_SIZE: f32 = 2.0;

/// Simple seeded random number generator (LCG).
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_f32(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.state >> 40) as f32) / ((1u64 << 24) as f32)
    }

    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

/// Random cubes, each kept in local space and placed by its own transform.
fn random_cube_scene(seed: u64) -> Scene {
    let mut rng = Rng::new(seed);
    let mut scene = Scene::new();

    for i in 0..NUM_CUBES {
        let translation = Translation3::new(
            (rng.next_f32() - 0.5) * WORLD_SIZE,
            (rng.next_f32() - 0.5) * WORLD_SIZE,
            (rng.next_f32() - 0.5) * WORLD_SIZE,
        );
        let size = rng.range(MIN_CUBE_SIZE, MAX_CUBE_SIZE);

        let axis = Vector3::new(
            rng.next_f32() - 0.5,
            rng.next_f32() - 0.5,
            rng.next_f32() - 0.5,
        );
        let axis = if axis.norm() > 0.01 {
            Unit::new_normalize(axis)
        } else {
            Vector3::x_axis()
        };
        let angle = rng.next_f32() * std::f32::consts::TAU;
        let rotation = UnitQuaternion::from_axis_angle(&axis, angle);

        let placement = Isometry3::from_parts(translation, rotation);
        scene.push(cube_mesh(&format!("Cube.{i:03}"), size, &placement));
    }

    scene
}

#[macroquad::main("Plane Clip Rotated Cubes")]
async fn main() {
    println!("Generating {} random rotated cubes...", NUM_CUBES);
    let scene = random_cube_scene(42);
    // Parallel splitting only takes effect with the `parallel` feature.
    let settings = ClipSettings::default().with_epsilon(1e-6).with_parallel(true);
    let mut control = PlaneControl::default();
    let mut sink = ViewerSink::default();
    let mut camera = OrbitCamera::new(14.0, 0.0, 0.3);

    let mut outcome = reclip(&scene, &control, &settings, &mut sink);
    match &outcome {
        Ok(report) => {
            for mesh in &report.meshes {
                println!(
                    "{}: {} faces -> {} triangles",
                    mesh.name, mesh.source_faces, mesh.result_faces
                );
            }
        }
        Err(message) => println!("clip failed: {message}"),
    }

    loop {
        camera.update();
        if control.update() {
            outcome = reclip(&scene, &control, &settings, &mut sink);
        }

        draw_frame(&camera, &sink, &outcome);
        draw_status(
            &format!("Rotated cubes - result #{}", sink.revision()),
            &outcome,
        );

        next_frame().await
    }
}
