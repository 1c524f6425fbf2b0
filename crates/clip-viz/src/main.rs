use clip_viz::{cube_mesh, draw_frame, draw_status, reclip, OrbitCamera, PlaneControl, ViewerSink};
use macroquad::prelude::*;
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion};
use plane_clip::{ClipSettings, Polygon, Scene, SourceMesh};

/// Two cubes, one rotated, and a floor quad.
fn demo_scene() -> Scene {
    let tilted = Isometry3::from_parts(
        Translation3::new(-1.0, 0.0, 0.0),
        UnitQuaternion::from_euler_angles(0.3, 0.4, 0.25),
    );
    let upright = Isometry3::translation(1.0, 0.0, 0.0);

    let floor = Polygon::new(vec![
        Point3::new(-2.5, -1.0, -2.5),
        Point3::new(-2.5, -1.0, 2.5),
        Point3::new(2.5, -1.0, 2.5),
        Point3::new(2.5, -1.0, -2.5),
    ]);

    Scene::new()
        .with_mesh(cube_mesh("Tilted", 0.8, &tilted))
        .with_mesh(cube_mesh("Upright", 0.8, &upright))
        .with_mesh(SourceMesh::new("Floor", vec![floor]))
}

#[macroquad::main("Plane Clip")]
async fn main() {
    let scene = demo_scene();
    let settings = ClipSettings::default();
    let mut control = PlaneControl::default();
    let mut sink = ViewerSink::default();
    let mut camera = OrbitCamera::new(8.0, 0.6, 0.4);

    let mut outcome = reclip(&scene, &control, &settings, &mut sink);

    loop {
        camera.update();
        if control.update() {
            outcome = reclip(&scene, &control, &settings, &mut sink);
        }

        draw_frame(&camera, &sink, &outcome);
        draw_status("Plane Clip - two cubes and a floor", &outcome);

        next_frame().await
    }
}
