//! Planar mirror support.
//!
//! A [`Reflector`] is a mesh whose local +Z axis is the mirror normal. Each
//! frame [`Reflector::update`] derives a virtual camera mirrored across that
//! plane; the renderer draws the scene from it into a texture sized by
//! [`ReflectorOptions`]. [`ReflectorRtt`] renders the reflection the same way
//! but never draws the mirror mesh itself, leaving the texture for other
//! materials to sample.

use crate::camera::Camera;
use crate::constants::{rgb_from_hex, REFLECTOR_CLIP_BIAS, REFLECTOR_COLOR, REFLECTOR_TEXTURE_SIZE};
use crate::math::{reflect, Plane};
use crate::scene::{Geometry, Object3D, ObjectId, Scene};
use glam::{Mat4, Vec3, Vec4};
use std::ops::{Deref, DerefMut};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReflectorOptions {
    pub color: Vec3,
    pub texture_width: u32,
    pub texture_height: u32,
    /// Pushes the clip plane along the mirror normal to hide seams.
    pub clip_bias: f32,
}

impl Default for ReflectorOptions {
    fn default() -> Self {
        Self {
            color: rgb_from_hex(REFLECTOR_COLOR),
            texture_width: REFLECTOR_TEXTURE_SIZE,
            texture_height: REFLECTOR_TEXTURE_SIZE,
            clip_bias: REFLECTOR_CLIP_BIAS,
        }
    }
}

/// Mirrored camera for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReflectionView {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub view: Mat4,
    /// Projection with its near plane replaced by the mirror plane.
    pub projection: Mat4,
    /// Maps reflector-local positions to reflection texture UV (xy / w).
    pub texture_matrix: Mat4,
}

impl ReflectionView {
    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

#[derive(Clone, Debug)]
pub struct Reflector {
    object: ObjectId,
    options: ReflectorOptions,
    last_view: Option<ReflectionView>,
}

impl Reflector {
    pub fn new(scene: &mut Scene, geometry: Geometry, options: ReflectorOptions) -> Self {
        let object = scene.add(Object3D::mesh("reflector", geometry).with_color(options.color));
        Self {
            object,
            options,
            last_view: None,
        }
    }

    #[inline]
    pub fn object(&self) -> ObjectId {
        self.object
    }

    #[inline]
    pub fn options(&self) -> &ReflectorOptions {
        &self.options
    }

    pub fn texture_size(&self) -> (u32, u32) {
        (
            self.options.texture_width.max(1),
            self.options.texture_height.max(1),
        )
    }

    /// View computed by the last successful [`update`](Self::update).
    pub fn last_view(&self) -> Option<&ReflectionView> {
        self.last_view.as_ref()
    }

    /// Mirror `camera` across the reflector plane. Returns `None` (and keeps
    /// no view) when the camera sits behind the mirror.
    pub fn update<C: Camera + ?Sized>(&mut self, scene: &Scene, camera: &C) -> Option<ReflectionView> {
        let world = scene.world_matrix(self.object);
        let mirror_pos = world.w_axis.truncate();
        let normal = (scene.world_rotation(self.object) * Vec3::Z).normalize_or_zero();

        let camera_pos = camera.world_position();
        let to_mirror = mirror_pos - camera_pos;
        if to_mirror.dot(normal) > 0.0 {
            self.last_view = None;
            return None;
        }

        let eye = mirror_pos - reflect(to_mirror, normal);
        let look_at = camera_pos + camera.world_direction();
        let target = mirror_pos - reflect(mirror_pos - look_at, normal);
        let camera_up = camera.world_matrix().y_axis.truncate().normalize_or_zero();
        let up = reflect(camera_up, normal);

        let view = Mat4::look_at_rh(eye, target, up);
        let base_projection = camera.projection_matrix();

        let texture_matrix = uv_bias() * base_projection * view * world;

        let mut mirror_plane = Plane::from_normal_and_coplanar_point(normal, mirror_pos);
        mirror_plane.constant -= self.options.clip_bias;
        let clip_plane = mirror_plane.transformed(&view).as_vec4();
        let projection = oblique_near_plane(base_projection, clip_plane);

        let reflection = ReflectionView {
            eye,
            target,
            up,
            view,
            projection,
            texture_matrix,
        };
        self.last_view = Some(reflection);
        Some(reflection)
    }
}

/// Reflector that renders only to its texture; the mirror mesh is given an
/// empty draw range so it never shows up itself.
#[derive(Clone, Debug)]
pub struct ReflectorRtt(Reflector);

impl ReflectorRtt {
    pub fn new(scene: &mut Scene, geometry: Geometry, options: ReflectorOptions) -> Self {
        let reflector = Reflector::new(scene, geometry, options);
        if let Some(g) = scene
            .get_mut(reflector.object())
            .and_then(|o| o.geometry.as_mut())
        {
            g.set_draw_range(0, Some(0));
        }
        Self(reflector)
    }

    pub fn into_inner(self) -> Reflector {
        self.0
    }
}

impl From<ReflectorRtt> for Reflector {
    fn from(rtt: ReflectorRtt) -> Self {
        rtt.0
    }
}

impl Deref for ReflectorRtt {
    type Target = Reflector;

    fn deref(&self) -> &Reflector {
        &self.0
    }
}

impl DerefMut for ReflectorRtt {
    fn deref_mut(&mut self) -> &mut Reflector {
        &mut self.0
    }
}

// Clip space xy in [-1, 1] to texture UV with v pointing down.
fn uv_bias() -> Mat4 {
    Mat4::from_translation(Vec3::new(0.5, 0.5, 0.0)) * Mat4::from_scale(Vec3::new(0.5, -0.5, 1.0))
}

/// Replace the near plane of a 0..1 depth projection with `clip_plane`
/// (view space, camera on its negative side) while keeping the far plane
/// passing through the frustum corner nearest the plane.
pub fn oblique_near_plane(projection: Mat4, clip_plane: Vec4) -> Mat4 {
    let corner = Vec4::new(clip_plane.x.signum(), clip_plane.y.signum(), 1.0, 1.0);
    let q = projection.inverse() * corner;
    let denom = clip_plane.dot(q);
    if denom.abs() <= f32::EPSILON {
        return projection;
    }
    let scaled = clip_plane * (projection.row(3).dot(q) / denom);

    let mut m = projection;
    m.x_axis.z = scaled.x;
    m.y_axis.z = scaled.y;
    m.z_axis.z = scaled.z;
    m.w_axis.z = scaled.w;
    m
}
