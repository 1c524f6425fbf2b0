//! Shared visualization utilities for the plane clipping demos.

use macroquad::models::{draw_mesh, Mesh as GpuMesh, Vertex};
use macroquad::prelude::*;
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use plane_clip::{
    clip_scene, ClipReport, ClipSettings, FanTriangulator, Mesh, MeshSink, Plane3D,
    PlaneReference, PlaneSide, Polygon, Scene, SourceMesh, Triangle,
};

/// macroquad meshes index with `u16`, so large meshes are drawn in chunks.
const TRIANGLES_PER_DRAW: usize = 16_000;

/// Half the edge length of the drawn cutting plane.
const PLANE_EXTENT: f32 = 6.0;

fn to_vec3(p: &Point3<f32>) -> Vec3 {
    vec3(p.x, p.y, p.z)
}

/// Color of a clipped triangle, by the side of the plane its centroid is on.
pub fn side_color(triangle: &Triangle, plane: &Plane3D) -> Color {
    match plane.classify_point(triangle.centroid(), 1e-5) {
        PlaneSide::Positive => Color::from_rgba(230, 140, 60, 255),
        PlaneSide::Negative => Color::from_rgba(70, 140, 230, 255),
        PlaneSide::OnPlane => Color::from_rgba(200, 200, 200, 255),
    }
}

/// Draws every triangle of a clipped mesh, colored by side.
pub fn draw_clipped_mesh(mesh: &Mesh, plane: &Plane3D) {
    let triangles: Vec<Triangle> = mesh.triangles().collect();

    for chunk in triangles.chunks(TRIANGLES_PER_DRAW) {
        let mut vertices = Vec::with_capacity(chunk.len() * 3);
        for triangle in chunk {
            let color = side_color(triangle, plane);
            vertices.extend(
                triangle
                    .vertices()
                    .iter()
                    .map(|p| Vertex::new2(to_vec3(p), vec2(0.0, 0.0), color)),
            );
        }
        let indices: Vec<u16> = (0..vertices.len() as u16).collect();

        draw_mesh(&GpuMesh {
            vertices,
            indices,
            texture: None,
        });
    }
}

/// Draws the edges of every triangle, making the cut visible.
pub fn draw_wireframe(mesh: &Mesh, color: Color) {
    for triangle in mesh.triangles() {
        let [a, b, c] = triangle.vertices().map(|p| to_vec3(&p));
        draw_line_3d(a, b, color);
        draw_line_3d(b, c, color);
        draw_line_3d(c, a, color);
    }
}

/// Draws a translucent square of the cutting plane, centered on the point
/// of the plane closest to the world origin.
pub fn draw_plane(plane: &Plane3D) {
    let normal = plane.normal();
    // Any vector not parallel to the normal gives a tangent basis.
    let helper = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = normal.cross(&helper).normalize() * PLANE_EXTENT;
    let v = normal.cross(&u);
    let center = plane.project_point(Point3::origin());

    let color = Color::from_rgba(255, 255, 255, 40);
    let corners = [center - u - v, center + u - v, center + u + v, center - u + v];
    let vertices = corners
        .iter()
        .map(|p| Vertex::new2(to_vec3(p), vec2(0.0, 0.0), color))
        .collect();

    draw_mesh(&GpuMesh {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3, 0, 2, 1, 0, 3, 2],
        texture: None,
    });
}

/// The six quads of an axis-aligned cube centered at the origin.
pub fn cube_faces(size: f32) -> Vec<Polygon> {
    let half = size / 2.0;

    // 8 corners of the cube
    let corners = [
        Point3::new(-half, -half, -half), // 0: left-bottom-back
        Point3::new(half, -half, -half),  // 1: right-bottom-back
        Point3::new(half, half, -half),   // 2: right-top-back
        Point3::new(-half, half, -half),  // 3: left-top-back
        Point3::new(-half, -half, half),  // 4: left-bottom-front
        Point3::new(half, -half, half),   // 5: right-bottom-front
        Point3::new(half, half, half),    // 6: right-top-front
        Point3::new(-half, half, half),   // 7: left-top-front
    ];

    // 6 faces with counter-clockwise winding (viewed from outside)
    let faces: [[usize; 4]; 6] = [
        [4, 5, 6, 7], // front (+Z)
        [1, 0, 3, 2], // back (-Z)
        [0, 4, 7, 3], // left (-X)
        [5, 1, 2, 6], // right (+X)
        [7, 6, 2, 3], // top (+Y)
        [0, 1, 5, 4], // bottom (-Y)
    ];

    faces
        .iter()
        .map(|face| Polygon::new(face.iter().map(|&i| corners[i]).collect()))
        .collect()
}

/// A cube mesh placed in the world by `placement`.
///
/// The cube keeps its local coordinates; the clipper applies the placement.
pub fn cube_mesh(name: &str, size: f32, placement: &Isometry3<f32>) -> SourceMesh {
    SourceMesh::new(name, cube_faces(size)).with_isometry(placement)
}

/// Interactive control of the cutting plane.
///
/// The plane is represented as a reference quad that is turned about the Y
/// axis and pushed along its normal, the same way a host would hand over a
/// plane object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneControl {
    /// Rotation of the plane normal about the Y axis, in radians.
    pub yaw: f32,
    /// Tilt of the plane normal towards the Y axis, in radians.
    pub tilt: f32,
    /// Distance of the plane from the world origin along its normal.
    pub offset: f32,
}

impl Default for PlaneControl {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            tilt: 0.0,
            offset: 0.33,
        }
    }
}

impl PlaneControl {
    /// Applies keyboard input. Returns true if the plane moved.
    ///
    /// `[`/`]` push the plane, `Q`/`E` turn it, `W`/`S` tilt it.
    pub fn update(&mut self) -> bool {
        let before = *self;
        if is_key_down(KeyCode::LeftBracket) {
            self.offset -= 0.05;
        }
        if is_key_down(KeyCode::RightBracket) {
            self.offset += 0.05;
        }
        if is_key_down(KeyCode::Q) {
            self.yaw += 0.02;
        }
        if is_key_down(KeyCode::E) {
            self.yaw -= 0.02;
        }
        if is_key_down(KeyCode::W) {
            self.tilt += 0.02;
        }
        if is_key_down(KeyCode::S) {
            self.tilt -= 0.02;
        }
        self.tilt = self.tilt.clamp(-1.5, 1.5);
        *self != before
    }

    /// The reference geometry for the current plane.
    pub fn reference(&self) -> PlaneReference {
        // A unit quad in the YZ plane, facing +X.
        let polygon = Polygon::new(vec![
            Point3::new(0.0, -1.0, -1.0),
            Point3::new(0.0, 1.0, -1.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(0.0, -1.0, 1.0),
        ]);
        let rotation = UnitQuaternion::from_euler_angles(0.0, self.yaw, self.tilt);
        let normal = rotation * Vector3::x();
        PlaneReference {
            polygon,
            transform: Isometry3::from_parts(Translation3::from(normal * self.offset), rotation),
        }
    }
}

/// Host-side sink that keeps the latest clip result for drawing.
#[derive(Debug, Default)]
pub struct ViewerSink {
    mesh: Mesh,
    revision: u64,
}

impl ViewerSink {
    /// The most recently delivered mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// How many results have been delivered.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl MeshSink for ViewerSink {
    fn accept(&mut self, mesh: Mesh) -> plane_clip::Result<()> {
        self.mesh = mesh;
        self.revision += 1;
        Ok(())
    }
}

/// Clips `scene` against the plane of `control` into `sink`.
///
/// Returns the report, or the error text to show on screen.
pub fn reclip(
    scene: &Scene,
    control: &PlaneControl,
    settings: &ClipSettings,
    sink: &mut ViewerSink,
) -> Result<ClipReport, String> {
    let scene = scene.clone().with_plane_reference(control.reference());
    clip_scene(&scene, sink, settings, &FanTriangulator).map_err(|err| err.to_string())
}

/// Simple orbit camera for 3D scene navigation.
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target: Vec3,
}

impl OrbitCamera {
    /// Creates a new orbit camera looking at the origin.
    pub fn new(distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            distance,
            yaw,
            pitch,
            target: vec3(0.0, 0.0, 0.0),
        }
    }

    /// Updates camera state from mouse drag and scroll.
    pub fn update(&mut self) {
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * 2.0;
            self.pitch -= delta.y * 2.0;
        }
        self.pitch = self.pitch.clamp(-1.5, 1.5);

        self.distance = (self.distance - mouse_wheel().1 * 0.5).clamp(2.0, 100.0);
    }

    /// Converts to macroquad's Camera3D for rendering.
    pub fn to_camera3d(&self) -> Camera3D {
        let offset = vec3(
            self.distance * self.pitch.cos() * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            self.distance * self.pitch.cos() * self.yaw.cos(),
        );
        Camera3D {
            position: self.target + offset,
            up: vec3(0.0, 1.0, 0.0),
            target: self.target,
            ..Default::default()
        }
    }
}

/// Draws the status lines shared by the demos.
pub fn draw_status(title: &str, outcome: &Result<ClipReport, String>) {
    draw_text(title, 10.0, 25.0, 20.0, WHITE);

    match outcome {
        Ok(report) => {
            let n = report.plane.normal();
            draw_text(
                &format!(
                    "plane n = ({:.2}, {:.2}, {:.2})  d = {:.2}",
                    n.x,
                    n.y,
                    n.z,
                    report.plane.offset()
                ),
                10.0,
                45.0,
                18.0,
                GRAY,
            );
            let source: usize = report.meshes.iter().map(|m| m.source_faces).sum();
            draw_text(
                &format!(
                    "{} meshes | source faces: {} | result faces: {}",
                    report.meshes.len(),
                    source,
                    report.face_count
                ),
                10.0,
                65.0,
                18.0,
                GRAY,
            );
        }
        Err(message) => {
            draw_text(message, 10.0, 45.0, 18.0, RED);
        }
    }

    draw_text(
        "[ ] move plane | Q/E turn | W/S tilt | drag to orbit, scroll to zoom",
        10.0,
        90.0,
        16.0,
        DARKGRAY,
    );
    draw_text(&format!("FPS: {}", get_fps()), 10.0, 110.0, 16.0, DARKGRAY);
}

/// Renders one frame of a clipped scene.
pub fn draw_frame(camera: &OrbitCamera, sink: &ViewerSink, outcome: &Result<ClipReport, String>) {
    clear_background(Color::from_rgba(15, 15, 25, 255));
    set_camera(&camera.to_camera3d());

    if let Ok(report) = outcome {
        draw_clipped_mesh(sink.mesh(), &report.plane);
        draw_wireframe(sink.mesh(), Color::from_rgba(20, 20, 20, 255));
        draw_plane(&report.plane);
    }

    draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(3.0, 0.0, 0.0), RED);
    draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(0.0, 3.0, 0.0), GREEN);
    draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 3.0), BLUE);

    set_default_camera();
}
