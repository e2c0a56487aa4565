use crate::constants::{MARKER_BASE_SCALE, MAX_MARKERS};
use crate::scene::{ObjectId, Scene};
use glam::{Vec3, Vec4};

/// One camera-facing marker the renderer should draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub object: ObjectId,
    pub center: Vec3,
    pub size: f32,
    pub color: Vec4,
}

/// Collect drawable objects attached to the scene, farthest from `eye`
/// first. Hidden subtrees, objects without geometry, empty draw ranges and
/// `skip` are left out. At most [`MAX_MARKERS`] items are returned.
pub fn draw_list(scene: &Scene, eye: Vec3, skip: Option<ObjectId>) -> Vec<DrawItem> {
    let mut items = Vec::new();
    let mut stack = vec![Scene::ROOT];

    while let Some(id) = stack.pop() {
        let Some(object) = scene.get(id) else {
            continue;
        };
        if !object.visible {
            continue;
        }
        stack.extend(object.children().iter().rev().copied());

        if Some(id) == skip {
            continue;
        }
        let Some(geometry) = object.geometry else {
            continue;
        };
        if geometry.draw_range.is_empty() {
            continue;
        }

        let (scale, _, center) = scene.world_matrix(id).to_scale_rotation_translation();
        let color = (object.color + object.emissive).min(Vec3::ONE);
        items.push(DrawItem {
            object: id,
            center,
            size: geometry.bounding_radius() * scale.abs().max_element() * MARKER_BASE_SCALE,
            color: color.extend(1.0),
        });
    }

    items.sort_by(|a, b| {
        b.center
            .distance_squared(eye)
            .total_cmp(&a.center.distance_squared(eye))
    });
    items.truncate(MAX_MARKERS);
    items
}
