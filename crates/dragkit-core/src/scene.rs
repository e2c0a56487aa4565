//! Minimal arena scene graph.
//!
//! Objects live in a flat `Vec` and refer to each other through [`ObjectId`]
//! handles. Node 0 is the scene root, so an object added to the scene has a
//! parent just like any nested child. World transforms are derived from the
//! parent chain on demand and are therefore never stale.

use glam::{Mat4, Quat, Vec3};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl ObjectId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("unknown object {0:?}")]
    UnknownObject(ObjectId),
    #[error("the scene root cannot be re-parented")]
    RootReparent,
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: ObjectId, child: ObjectId },
}

/// Collision-relevant shape in object-local space, centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
    /// Flat rectangle in the local XY plane facing +Z.
    Quad { width: f32, height: f32 },
}

/// Sub-range of a geometry submitted for drawing. `count: None` draws
/// everything from `start`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawRange {
    pub start: u32,
    pub count: Option<u32>,
}

impl DrawRange {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == Some(0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub shape: Shape,
    pub draw_range: DrawRange,
}

impl Geometry {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            draw_range: DrawRange::default(),
        }
    }

    pub fn sphere(radius: f32) -> Self {
        Self::new(Shape::Sphere { radius })
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::new(Shape::Cuboid {
            half_extents: Vec3::new(width, height, depth) * 0.5,
        })
    }

    pub fn quad(width: f32, height: f32) -> Self {
        Self::new(Shape::Quad { width, height })
    }

    pub fn set_draw_range(&mut self, start: u32, count: Option<u32>) {
        self.draw_range = DrawRange { start, count };
    }

    /// Radius of a sphere enclosing the shape.
    pub fn bounding_radius(&self) -> f32 {
        match self.shape {
            Shape::Sphere { radius } => radius,
            Shape::Cuboid { half_extents } => half_extents.length(),
            Shape::Quad { width, height } => 0.5 * (width * width + height * height).sqrt(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Object3D {
    pub name: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub geometry: Option<Geometry>,
    pub color: Vec3,
    pub emissive: Vec3,
    pub visible: bool,
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
}

impl Default for Object3D {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            geometry: None,
            color: Vec3::ONE,
            emissive: Vec3::ZERO,
            visible: true,
            parent: None,
            children: Vec::new(),
        }
    }
}

impl Object3D {
    /// Empty transform node, useful as a group parent.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn mesh(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            geometry: Some(geometry),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    #[inline]
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

pub struct Scene {
    objects: Vec<Object3D>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub const ROOT: ObjectId = ObjectId(0);

    pub fn new() -> Self {
        Self {
            objects: vec![Object3D::group("scene")],
        }
    }

    /// Add `object` as a direct child of the scene root.
    pub fn add(&mut self, object: Object3D) -> ObjectId {
        let id = self.add_detached(object);
        self.link(Self::ROOT, id);
        id
    }

    /// Add `object` without attaching it anywhere. It takes part in ray casts
    /// when listed explicitly but has no parent transform.
    pub fn add_detached(&mut self, mut object: Object3D) -> ObjectId {
        object.parent = None;
        object.children.clear();
        let id = ObjectId(self.objects.len());
        self.objects.push(object);
        id
    }

    /// Move `child` (and its subtree) under `parent`.
    pub fn add_child(&mut self, parent: ObjectId, child: ObjectId) -> Result<(), SceneError> {
        self.check(parent)?;
        self.check(child)?;
        if child == Self::ROOT {
            return Err(SceneError::RootReparent);
        }
        if self.ancestors(parent).any(|a| a == child) || parent == child {
            return Err(SceneError::Cycle { parent, child });
        }
        self.unlink(child);
        self.link(parent, child);
        Ok(())
    }

    /// Detach `id` from its parent. The object stays in the arena.
    pub fn remove_from_parent(&mut self, id: ObjectId) -> Result<(), SceneError> {
        self.check(id)?;
        if id == Self::ROOT {
            return Err(SceneError::RootReparent);
        }
        self.unlink(id);
        Ok(())
    }

    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id.0)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object3D> {
        self.objects.get_mut(id.0)
    }

    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        id.0 < self.objects.len()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.len() <= 1
    }

    #[inline]
    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.get(id).and_then(|o| o.parent)
    }

    pub fn position(&self, id: ObjectId) -> Option<Vec3> {
        self.get(id).map(|o| o.position)
    }

    pub fn set_position(&mut self, id: ObjectId, position: Vec3) {
        if let Some(o) = self.get_mut(id) {
            o.position = position;
        }
    }

    /// Local-to-world matrix. Unknown ids yield identity.
    pub fn world_matrix(&self, id: ObjectId) -> Mat4 {
        let mut m = Mat4::IDENTITY;
        let mut cur = Some(id);
        while let Some(c) = cur {
            match self.get(c) {
                Some(o) => {
                    m = o.local_matrix() * m;
                    cur = o.parent;
                }
                None => break,
            }
        }
        m
    }

    #[inline]
    pub fn world_position(&self, id: ObjectId) -> Vec3 {
        self.world_matrix(id).w_axis.truncate()
    }

    pub fn world_rotation(&self, id: ObjectId) -> Quat {
        let (_, rotation, _) = self.world_matrix(id).to_scale_rotation_translation();
        rotation
    }

    /// Iterate `id` and all of its descendants depth-first.
    pub fn descendants(&self, id: ObjectId) -> Descendants<'_> {
        let stack = if self.contains(id) { vec![id] } else { Vec::new() };
        Descendants { scene: self, stack }
    }

    /// Iterate the ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: ObjectId) -> impl Iterator<Item = ObjectId> + '_ {
        std::iter::successors(self.parent(id), move |p| self.parent(*p))
    }

    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .position(|o| o.name == name)
            .map(ObjectId)
    }

    /// Objects reachable from the root in depth-first order, root excluded.
    pub fn attached(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.descendants(Self::ROOT).filter(|id| *id != Self::ROOT)
    }

    fn check(&self, id: ObjectId) -> Result<(), SceneError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(SceneError::UnknownObject(id))
        }
    }

    fn link(&mut self, parent: ObjectId, child: ObjectId) {
        self.objects[child.0].parent = Some(parent);
        self.objects[parent.0].children.push(child);
    }

    fn unlink(&mut self, child: ObjectId) {
        if let Some(p) = self.objects[child.0].parent.take() {
            self.objects[p.0].children.retain(|c| *c != child);
        }
    }
}

pub struct Descendants<'a> {
    scene: &'a Scene,
    stack: Vec<ObjectId>,
}

impl Iterator for Descendants<'_> {
    type Item = ObjectId;

    fn next(&mut self) -> Option<ObjectId> {
        let id = self.stack.pop()?;
        if let Some(o) = self.scene.get(id) {
            self.stack.extend(o.children.iter().rev().copied());
        }
        Some(id)
    }
}
