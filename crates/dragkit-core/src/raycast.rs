use crate::camera::Camera;
use crate::constants::{RAYCAST_FAR, RAYCAST_NEAR};
use crate::math::Ray;
use crate::scene::{ObjectId, Scene, Shape};
use glam::{Vec2, Vec3};

/// A single ray hit, with `distance` measured along the world-space ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub distance: f32,
    pub point: Vec3,
    pub object: ObjectId,
}

#[derive(Clone, Debug)]
pub struct Raycaster {
    pub ray: Ray,
    pub near: f32,
    pub far: f32,
}

impl Default for Raycaster {
    fn default() -> Self {
        Self {
            ray: Ray::default(),
            near: RAYCAST_NEAR,
            far: RAYCAST_FAR,
        }
    }
}

impl Raycaster {
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            ..Default::default()
        }
    }

    #[inline]
    pub fn set_from_camera<C: Camera + ?Sized>(&mut self, ndc: Vec2, camera: &C) {
        self.ray = camera.ray_from_ndc(ndc);
    }

    /// Test one object (and optionally its subtree), appending hits to `out`
    /// sorted nearest first.
    pub fn intersect_object(
        &self,
        scene: &Scene,
        object: ObjectId,
        recursive: bool,
        out: &mut Vec<Intersection>,
    ) {
        self.collect(scene, object, recursive, out);
        sort_by_distance(out);
    }

    /// Test every object in `objects`, appending hits to `out` sorted nearest
    /// first. An object reachable twice is reported twice.
    pub fn intersect_objects(
        &self,
        scene: &Scene,
        objects: &[ObjectId],
        recursive: bool,
        out: &mut Vec<Intersection>,
    ) {
        for id in objects {
            self.collect(scene, *id, recursive, out);
        }
        sort_by_distance(out);
    }

    fn collect(&self, scene: &Scene, id: ObjectId, recursive: bool, out: &mut Vec<Intersection>) {
        let Some(object) = scene.get(id) else {
            return;
        };
        if !object.visible {
            return;
        }
        if let Some(geometry) = &object.geometry {
            if let Some(hit) = self.intersect_shape(scene, id, &geometry.shape) {
                out.push(hit);
            }
        }
        if recursive {
            for child in object.children() {
                self.collect(scene, *child, true, out);
            }
        }
    }

    fn intersect_shape(&self, scene: &Scene, id: ObjectId, shape: &Shape) -> Option<Intersection> {
        let world = scene.world_matrix(id);
        let local_ray = self.ray.transformed(&world.inverse());

        let t_local = match *shape {
            Shape::Sphere { radius } => local_ray.intersect_sphere(Vec3::ZERO, radius),
            Shape::Cuboid { half_extents } => {
                local_ray.intersect_aabb(-half_extents, half_extents)
            }
            Shape::Quad { width, height } => {
                let dz = local_ray.direction.z;
                if dz.abs() <= f32::EPSILON {
                    None
                } else {
                    let t = -local_ray.origin.z / dz;
                    let p = local_ray.at(t);
                    (t >= 0.0 && p.x.abs() <= width * 0.5 && p.y.abs() <= height * 0.5)
                        .then_some(t)
                }
            }
        }?;

        // Back to world space so distances compare across differently scaled objects
        let point = world.transform_point3(local_ray.at(t_local));
        let distance = self.ray.origin.distance(point);
        (distance >= self.near && distance <= self.far).then_some(Intersection {
            distance,
            point,
            object: id,
        })
    }
}

#[inline]
fn sort_by_distance(hits: &mut [Intersection]) {
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}
