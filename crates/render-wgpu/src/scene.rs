use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Interleaved vertex: position, color, texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub uv: [f32; 2],
}

/// Which exercise to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scene {
    /// One triangle with per-vertex colors.
    Triangle,
    /// A quad blending two textures.
    Quad,
    /// Ten textured cubes viewed through the first-person camera.
    #[default]
    Cubes,
}

/// World positions of the cubes in [`Scene::Cubes`].
pub const CUBE_POSITIONS: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

/// Position and uv for the 36 cube vertices (two triangles per face).
#[rustfmt::skip]
const CUBE_VERTICES: [[f32; 5]; 36] = [
    [-0.5, -0.5, -0.5, 0.0, 0.0], [ 0.5, -0.5, -0.5, 1.0, 0.0], [ 0.5,  0.5, -0.5, 1.0, 1.0],
    [ 0.5,  0.5, -0.5, 1.0, 1.0], [-0.5,  0.5, -0.5, 0.0, 1.0], [-0.5, -0.5, -0.5, 0.0, 0.0],

    [-0.5, -0.5,  0.5, 0.0, 0.0], [ 0.5, -0.5,  0.5, 1.0, 0.0], [ 0.5,  0.5,  0.5, 1.0, 1.0],
    [ 0.5,  0.5,  0.5, 1.0, 1.0], [-0.5,  0.5,  0.5, 0.0, 1.0], [-0.5, -0.5,  0.5, 0.0, 0.0],

    [-0.5,  0.5,  0.5, 1.0, 0.0], [-0.5,  0.5, -0.5, 1.0, 1.0], [-0.5, -0.5, -0.5, 0.0, 1.0],
    [-0.5, -0.5, -0.5, 0.0, 1.0], [-0.5, -0.5,  0.5, 0.0, 0.0], [-0.5,  0.5,  0.5, 1.0, 0.0],

    [ 0.5,  0.5,  0.5, 1.0, 0.0], [ 0.5,  0.5, -0.5, 1.0, 1.0], [ 0.5, -0.5, -0.5, 0.0, 1.0],
    [ 0.5, -0.5, -0.5, 0.0, 1.0], [ 0.5, -0.5,  0.5, 0.0, 0.0], [ 0.5,  0.5,  0.5, 1.0, 0.0],

    [-0.5, -0.5, -0.5, 0.0, 1.0], [ 0.5, -0.5, -0.5, 1.0, 1.0], [ 0.5, -0.5,  0.5, 1.0, 0.0],
    [ 0.5, -0.5,  0.5, 1.0, 0.0], [-0.5, -0.5,  0.5, 0.0, 0.0], [-0.5, -0.5, -0.5, 0.0, 1.0],

    [-0.5,  0.5, -0.5, 0.0, 1.0], [ 0.5,  0.5, -0.5, 1.0, 1.0], [ 0.5,  0.5,  0.5, 1.0, 0.0],
    [ 0.5,  0.5,  0.5, 1.0, 0.0], [-0.5,  0.5,  0.5, 0.0, 0.0], [-0.5,  0.5, -0.5, 0.0, 1.0],
];

/// Vertex and index data for one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Scene {
    pub fn name(self) -> &'static str {
        match self {
            Self::Triangle => "triangle",
            Self::Quad => "quad",
            Self::Cubes => "cubes",
        }
    }

    /// Whether the fragment stage samples the two textures.
    pub fn is_textured(self) -> bool {
        !matches!(self, Self::Triangle)
    }

    /// Whether the scene is drawn through the camera. Flat scenes are drawn
    /// directly in clip space.
    pub fn uses_camera(self) -> bool {
        matches!(self, Self::Cubes)
    }

    pub fn mesh(self) -> Mesh {
        match self {
            Self::Triangle => triangle_mesh(),
            Self::Quad => quad_mesh(),
            Self::Cubes => cube_mesh(),
        }
    }

    /// One model matrix per drawn instance.
    pub fn instance_models(self) -> Vec<Mat4> {
        match self {
            Self::Triangle | Self::Quad => vec![Mat4::IDENTITY],
            Self::Cubes => CUBE_POSITIONS
                .iter()
                .enumerate()
                .map(|(i, p)| cube_model(i, *p))
                .collect(),
        }
    }
}

/// Cube `index` is tilted by 20° per index about a fixed skew axis.
fn cube_model(index: usize, position: Vec3) -> Mat4 {
    let axis = Vec3::new(1.0, 0.3, 0.5).normalize();
    let angle = (20.0 * index as f32).to_radians();
    Mat4::from_translation(position) * Mat4::from_axis_angle(axis, angle)
}

fn triangle_mesh() -> Mesh {
    #[rustfmt::skip]
    let vertices = vec![
        Vertex { position: [-0.5, -0.5, 0.0], color: [1.0, 0.0, 0.0], uv: [0.0, 0.0] },
        Vertex { position: [ 0.5, -0.5, 0.0], color: [0.0, 1.0, 0.0], uv: [1.0, 0.0] },
        Vertex { position: [ 0.0,  0.5, 0.0], color: [0.0, 0.0, 1.0], uv: [0.5, 1.0] },
    ];
    Mesh {
        vertices,
        indices: vec![0, 1, 2],
    }
}

fn quad_mesh() -> Mesh {
    #[rustfmt::skip]
    let vertices = vec![
        Vertex { position: [-0.5,  0.5, 0.0], color: [1.0, 0.0, 0.0], uv: [0.0, 1.0] }, // top left
        Vertex { position: [ 0.5,  0.5, 0.0], color: [0.0, 1.0, 0.0], uv: [1.0, 1.0] }, // top right
        Vertex { position: [-0.5, -0.5, 0.0], color: [0.0, 0.0, 1.0], uv: [0.0, 0.0] }, // bottom left
        Vertex { position: [ 0.5, -0.5, 0.0], color: [1.0, 1.0, 0.0], uv: [1.0, 0.0] }, // bottom right
    ];
    Mesh {
        vertices,
        indices: vec![0, 1, 2, 1, 2, 3],
    }
}

fn cube_mesh() -> Mesh {
    let vertices: Vec<Vertex> = CUBE_VERTICES
        .iter()
        .map(|v| Vertex {
            position: [v[0], v[1], v[2]],
            color: [1.0, 1.0, 1.0],
            uv: [v[3], v[4]],
        })
        .collect();
    let indices = (0..vertices.len() as u16).collect();
    Mesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 8 * std::mem::size_of::<f32>());
    }

    #[test]
    fn triangle_is_untextured_and_flat() {
        let scene = Scene::Triangle;
        assert!(!scene.is_textured());
        assert!(!scene.uses_camera());
        assert_eq!(scene.mesh().vertices.len(), 3);
        assert_eq!(scene.instance_models(), vec![Mat4::IDENTITY]);
    }

    #[test]
    fn quad_is_two_triangles() {
        let mesh = Scene::Quad.mesh();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert!(mesh.indices.iter().all(|i| (*i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn cube_mesh_is_a_unit_cube() {
        let mesh = Scene::Cubes.mesh();
        assert_eq!(mesh.vertices.len(), 36);
        assert_eq!(mesh.indices.len(), 36);
        for v in &mesh.vertices {
            assert!(v.position.iter().all(|c| c.abs() == 0.5));
            assert!(v.uv.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn cubes_have_one_model_per_position() {
        let models = Scene::Cubes.instance_models();
        assert_eq!(models.len(), CUBE_POSITIONS.len());
        // first cube is unrotated at the origin
        assert_eq!(models[0], Mat4::IDENTITY);
        for (model, pos) in models.iter().zip(CUBE_POSITIONS) {
            assert!((model.transform_point3(Vec3::ZERO) - pos).length() < 1e-5);
        }
    }

    #[test]
    fn scene_names() {
        assert_eq!(Scene::default(), Scene::Cubes);
        assert_eq!(Scene::Quad.name(), "quad");
    }
}
