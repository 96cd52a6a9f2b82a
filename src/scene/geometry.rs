use glam::{Vec2, Vec3};

use crate::math::AABB;

/// Renderable shape of a surface, in the owning node's local space.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Indexed triangle list.
    Mesh(MeshGeometry),
    /// Flat rectangle in the local XY plane, centred on the origin, facing +Z.
    Plane { width: f32, height: f32 },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshGeometry {
    pub positions: Vec<Vec3>,
    /// Triangle list indices; empty means `positions` is already a triangle list.
    pub indices: Vec<u32>,
}

impl MeshGeometry {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// Axis-aligned box centred on the origin.
    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;
        let positions = vec![
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1, 0, 3, 2, // back
            4, 5, 6, 4, 6, 7, // front
            0, 4, 7, 0, 7, 3, // left
            1, 2, 6, 1, 6, 5, // right
            3, 7, 6, 3, 6, 2, // top
            0, 1, 5, 0, 5, 4, // bottom
        ];
        Self { positions, indices }
    }

    pub fn triangles(&self) -> Vec<[Vec3; 3]> {
        if self.indices.is_empty() {
            return self
                .positions
                .chunks_exact(3)
                .map(|tri| [tri[0], tri[1], tri[2]])
                .collect();
        }
        let fetch = |i: u32| self.positions.get(i as usize).copied();
        self.indices
            .chunks_exact(3)
            .filter_map(|tri| Some([fetch(tri[0])?, fetch(tri[1])?, fetch(tri[2])?]))
            .collect()
    }
}

impl Geometry {
    pub fn plane(size: Vec2) -> Self {
        Geometry::Plane {
            width: size.x,
            height: size.y,
        }
    }

    pub fn local_bounds(&self) -> AABB {
        match self {
            Geometry::Mesh(mesh) => AABB::from_points(mesh.positions.iter().copied()),
            Geometry::Plane { width, height } => AABB::new(
                Vec3::new(-width * 0.5, -height * 0.5, 0.0),
                Vec3::new(width * 0.5, height * 0.5, 0.0),
            ),
        }
    }

    pub fn triangles(&self) -> Vec<[Vec3; 3]> {
        match self {
            Geometry::Mesh(mesh) => mesh.triangles(),
            Geometry::Plane { width, height } => {
                let (hw, hh) = (width * 0.5, height * 0.5);
                let a = Vec3::new(-hw, -hh, 0.0);
                let b = Vec3::new(hw, -hh, 0.0);
                let c = Vec3::new(hw, hh, 0.0);
                let d = Vec3::new(-hw, hh, 0.0);
                vec![[a, b, c], [a, c, d]]
            }
        }
    }

    pub fn is_plane(&self) -> bool {
        matches!(self, Geometry::Plane { .. })
    }
}
