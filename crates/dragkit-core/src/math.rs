use glam::{Mat3, Mat4, Vec3, Vec4};

/// Half-line with a unit-length direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        }
    }
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to `plane`, or `None` when the plane is behind
    /// the origin. A ray parallel to the plane only hits when its origin lies
    /// on the plane.
    pub fn distance_to_plane(&self, plane: &Plane) -> Option<f32> {
        let denom = plane.normal.dot(self.direction);
        if denom == 0.0 {
            return (plane.distance_to_point(self.origin) == 0.0).then_some(0.0);
        }
        let t = -(self.origin.dot(plane.normal) + plane.constant) / denom;
        (t >= 0.0).then_some(t)
    }

    #[inline]
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Vec3> {
        self.distance_to_plane(plane).map(|t| self.at(t))
    }

    /// Nearest non-negative hit distance against a sphere. Rays starting
    /// inside the sphere report the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.dot(oc) - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let t0 = -b - root;
        let t1 = -b + root;
        if t0 >= 0.0 {
            Some(t0)
        } else if t1 >= 0.0 {
            Some(t1)
        } else {
            None
        }
    }

    /// Slab test against an axis-aligned box.
    pub fn intersect_aabb(&self, min: Vec3, max: Vec3) -> Option<f32> {
        let inv_dir = self.direction.recip();

        let t1 = (min - self.origin) * inv_dir;
        let t2 = (max - self.origin) * inv_dir;

        let tmin = t1.min(t2).max_element();
        let tmax = t1.max(t2).min_element();

        // Entirely behind the origin
        if tmax < 0.0 || tmin > tmax {
            return None;
        }

        Some(if tmin < 0.0 { tmax } else { tmin })
    }

    /// Transform by an affine matrix. The direction is renormalized, so
    /// distances measured on the result are in the transformed space.
    pub fn transformed(&self, m: &Mat4) -> Self {
        Self::new(m.transform_point3(self.origin), m.transform_vector3(self.direction))
    }
}

/// Plane stored as `normal · p + constant = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vec3::X,
            constant: 0.0,
        }
    }
}

impl Plane {
    pub fn new(normal: Vec3, constant: f32) -> Self {
        Self { normal, constant }
    }

    pub fn from_normal_and_coplanar_point(normal: Vec3, point: Vec3) -> Self {
        Self {
            normal,
            constant: -point.dot(normal),
        }
    }

    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    #[inline]
    pub fn coplanar_point(&self) -> Vec3 {
        self.normal * -self.constant
    }

    pub fn project_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.distance_to_point(point)
    }

    pub fn transformed(&self, m: &Mat4) -> Self {
        let normal_matrix = Mat3::from_mat4(*m).inverse().transpose();
        let normal = (normal_matrix * self.normal).normalize_or_zero();
        let point = m.transform_point3(self.coplanar_point());
        Self::from_normal_and_coplanar_point(normal, point)
    }

    #[inline]
    pub fn as_vec4(&self) -> Vec4 {
        self.normal.extend(self.constant)
    }
}

/// Mirror `v` across the plane through the origin with unit normal `normal`.
#[inline]
pub fn reflect(v: Vec3, normal: Vec3) -> Vec3 {
    v - 2.0 * v.dot(normal) * normal
}
