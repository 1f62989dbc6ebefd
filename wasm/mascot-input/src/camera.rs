//! Perspective camera and picking rays.

use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A ray in world space. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Perspective camera. Looks down its local -Z axis with +Y up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 17.0, 10.0),
            rotation: Quat::IDENTITY,
            fov_y: 45.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Camera at `position` turned to face `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let view = Mat4::look_at_rh(position, target, Vec3::Y);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        Self {
            position,
            rotation,
            ..Self::default()
        }
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }

    /// Ray from the camera through a point given in NDC.
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let inverse = (self.projection_matrix() * self.view_matrix()).inverse();
        let point = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, point - self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn center_ray_follows_view_direction() {
        let camera = Camera {
            position: Vec3::ZERO,
            ..Camera::default()
        };
        let ray = camera.ray_through(Vec2::ZERO);
        assert!(approx(ray.direction, Vec3::NEG_Z));
        assert!(approx(ray.origin, Vec3::ZERO));
    }

    #[test]
    fn looking_at_points_the_center_ray_at_target() {
        let camera = Camera::looking_at(Vec3::new(0.0, 17.0, 10.0), Vec3::new(0.0, 10.0, 0.0));
        let ray = camera.ray_through(Vec2::ZERO);
        let expected = (Vec3::new(0.0, 10.0, 0.0) - Vec3::new(0.0, 17.0, 10.0)).normalize();
        assert!(approx(ray.direction, expected));
    }

    #[test]
    fn corner_ray_spreads_by_field_of_view() {
        let camera = Camera {
            position: Vec3::ZERO,
            fov_y: 90.0,
            ..Camera::default()
        };
        let ray = camera.ray_through(Vec2::new(0.0, 1.0));
        // Top edge of a 90 degree frustum sits 45 degrees above the axis.
        assert!(approx(ray.direction, Vec3::new(0.0, 1.0, -1.0).normalize()));
    }

    #[test]
    fn aspect_ignores_collapsed_size() {
        let mut camera = Camera::default();
        camera.set_aspect(700.0, 350.0);
        assert_eq!(camera.aspect, 2.0);
        camera.set_aspect(0.0, 350.0);
        assert_eq!(camera.aspect, 2.0);
    }
}
