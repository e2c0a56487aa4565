//! Camera descriptions consumed by the ray-caster and the renderers.
//!
//! Both cameras are right-handed look-at cameras using the 0..1 clip depth
//! range produced by glam's `*_rh` projections.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR};
use crate::math::Ray;
use glam::{Mat4, Vec2, Vec3};
use std::cell::RefCell;
use std::rc::Rc;

/// What the drag controller and ray-caster need from a camera.
pub trait Camera {
    fn view_matrix(&self) -> Mat4;
    fn projection_matrix(&self) -> Mat4;
    fn world_position(&self) -> Vec3;
    /// Unit vector the camera looks along.
    fn world_direction(&self) -> Vec3;
    /// World-space ray through a point in normalized device coordinates.
    fn ray_from_ndc(&self, ndc: Vec2) -> Ray;

    fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Inverse of the view matrix.
    fn world_matrix(&self) -> Mat4 {
        self.view_matrix().inverse()
    }
}

#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl PerspectiveCamera {
    pub fn new(fovy_degrees: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self {
            aspect,
            fovy_radians: fovy_degrees.to_radians(),
            znear,
            zfar,
            ..Default::default()
        }
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }
}

impl Camera for PerspectiveCamera {
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    fn world_position(&self) -> Vec3 {
        self.eye
    }

    fn world_direction(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let p = inv.project_point3(ndc.extend(0.5));
        Ray::new(self.eye, p - self.eye)
    }
}

/// Axis-aligned view volume camera; all rays share the view direction.
#[derive(Clone, Debug)]
pub struct OrthographicCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl OrthographicCamera {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32, znear: f32, zfar: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            left,
            right,
            bottom,
            top,
            znear,
            zfar,
        }
    }
}

impl Camera for OrthographicCamera {
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.znear,
            self.zfar,
        )
    }

    fn world_position(&self) -> Vec3 {
        self.eye
    }

    fn world_direction(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let origin = inv.project_point3(ndc.extend(0.0));
        Ray::new(origin, self.world_direction())
    }
}

// Lets a harness keep one camera shared between its render loop and the
// controls. Borrows last only for the duration of each call.
impl<C: Camera> Camera for Rc<RefCell<C>> {
    fn view_matrix(&self) -> Mat4 {
        self.borrow().view_matrix()
    }

    fn projection_matrix(&self) -> Mat4 {
        self.borrow().projection_matrix()
    }

    fn world_position(&self) -> Vec3 {
        self.borrow().world_position()
    }

    fn world_direction(&self) -> Vec3 {
        self.borrow().world_direction()
    }

    fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        self.borrow().ray_from_ndc(ndc)
    }

    fn view_projection(&self) -> Mat4 {
        self.borrow().view_projection()
    }
}
