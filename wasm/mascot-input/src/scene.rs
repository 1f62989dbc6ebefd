//! Scene graph used for pointer hit-testing.
//!
//! The renderer mirrors its hierarchy here: every node carries a local
//! transform, optional geometry and children. Hit-testing walks the whole
//! tree and has no notion of visibility, so an invisible collision volume
//! still counts as part of the mascot.

use std::cell::OnceCell;

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Ray};

/// What the hit-tester needs from a scene.
pub trait SceneView {
    /// False until the mascot model has been added. Hit-testing is skipped
    /// entirely before that.
    fn is_ready(&self) -> bool;

    fn camera(&self) -> &Camera;

    /// All intersections of `ray` with the scene, nearest first.
    fn intersect(&self, ray: &Ray) -> Vec<Intersection>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    pub distance: f32,
    pub point: Vec3,
    pub node: String,
}

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        Some(points.iter().fold(Self { min: first, max: first }, |acc, p| Self {
            min: acc.min.min(*p),
            max: acc.max.max(*p),
        }))
    }

    /// Entry distance along `ray`, or the exit distance when the origin is
    /// inside the box.
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let inverse = ray.direction.recip();
        let t1 = (self.min - ray.origin) * inverse;
        let t2 = (self.max - ray.origin) * inverse;
        let t_near = t1.min(t2).max_element();
        let t_far = t1.max(t2).min_element();
        if t_far < 0.0 || t_near > t_far {
            return None;
        }
        Some(if t_near >= 0.0 { t_near } else { t_far })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshGeometry {
    pub positions: Vec<Vec3>,
    /// Triangle list. When empty, `positions` is read three at a time.
    #[serde(default)]
    pub indices: Vec<u32>,
    #[serde(skip)]
    bounds: OnceCell<Option<Aabb>>,
}

impl PartialEq for MeshGeometry {
    fn eq(&self, other: &Self) -> bool {
        self.positions == other.positions && self.indices == other.indices
    }
}

impl MeshGeometry {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices,
            bounds: OnceCell::new(),
        }
    }

    fn triangle(&self, index: usize) -> Option<[Vec3; 3]> {
        let vertex = |i: usize| -> Option<Vec3> {
            let position = if self.indices.is_empty() {
                i
            } else {
                *self.indices.get(i)? as usize
            };
            self.positions.get(position).copied()
        };
        Some([vertex(index * 3)?, vertex(index * 3 + 1)?, vertex(index * 3 + 2)?])
    }

    fn triangle_count(&self) -> usize {
        if self.indices.is_empty() {
            self.positions.len() / 3
        } else {
            self.indices.len() / 3
        }
    }

    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let bounds = self.bounds.get_or_init(|| Aabb::from_points(&self.positions));
        bounds.as_ref()?.intersect(ray)?;

        (0..self.triangle_count())
            .filter_map(|i| self.triangle(i))
            .filter_map(|[a, b, c]| intersect_triangle(ray, a, b, c))
            .min_by(f32::total_cmp)
    }
}

/// Double-sided Möller–Trumbore.
fn intersect_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Geometry {
    /// Box centered on the node origin.
    Box { size: Vec3 },
    Sphere { radius: f32 },
    Mesh(MeshGeometry),
}

impl Geometry {
    /// Distance along a ray given in the node's local space.
    fn intersect_local(&self, ray: &Ray) -> Option<f32> {
        match self {
            Geometry::Box { size } => {
                let half = size.abs() * 0.5;
                Aabb { min: -half, max: half }.intersect(ray)
            },
            Geometry::Sphere { radius } => {
                let b = ray.origin.dot(ray.direction);
                let c = ray.origin.length_squared() - radius * radius;
                let discriminant = b * b - c;
                if discriminant < 0.0 {
                    return None;
                }
                let root = discriminant.sqrt();
                [-b - root, -b + root].into_iter().find(|t| *t >= 0.0)
            },
            Geometry::Mesh(mesh) => mesh.intersect(ray),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneNode {
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub geometry: Option<Geometry>,
    pub children: Vec<SceneNode>,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            geometry: None,
            children: Vec::new(),
        }
    }
}

impl SceneNode {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    fn collect_hits(&self, parent: Mat4, ray: &Ray, hits: &mut Vec<Intersection>) {
        let world = parent * self.local_matrix();

        if let Some(geometry) = &self.geometry {
            let to_local = world.inverse();
            if to_local.is_finite() {
                let local_ray = Ray::new(
                    to_local.transform_point3(ray.origin),
                    to_local.transform_vector3(ray.direction),
                );
                if let Some(t) = geometry.intersect_local(&local_ray) {
                    let point = world.transform_point3(local_ray.at(t));
                    hits.push(Intersection {
                        distance: (point - ray.origin).length(),
                        point,
                        node: self.name.clone(),
                    });
                }
            }
        }

        for child in &self.children {
            child.collect_hits(world, ray, hits);
        }
    }
}

/// In-memory scene: a camera plus the top-level nodes.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    camera: Camera,
    nodes: Vec<SceneNode>,
    model_loaded: bool,
}

impl SceneGraph {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            ..Self::default()
        }
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Add a node that is not the mascot model, such as a collision volume.
    pub fn add_node(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    /// Add the mascot model. Hit-testing starts once this has happened.
    pub fn add_model(&mut self, node: SceneNode) {
        self.nodes.push(node);
        self.model_loaded = true;
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }
}

impl SceneView for SceneGraph {
    fn is_ready(&self) -> bool {
        self.model_loaded
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn intersect(&self, ray: &Ray) -> Vec<Intersection> {
        let mut hits = Vec::new();
        for node in &self.nodes {
            node.collect_hits(Mat4::IDENTITY, ray, &mut hits);
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

#[cfg(test)]
mod tests;
