// Host-side tests for the arena scene graph.

use dragkit_core::{Geometry, Object3D, Scene, SceneError};
use glam::{Quat, Vec3};

#[test]
fn added_objects_hang_off_the_root() {
    let mut scene = Scene::new();
    assert!(scene.is_empty());
    let a = scene.add(Object3D::group("a"));

    assert_eq!(scene.parent(a), Some(Scene::ROOT));
    assert_eq!(scene.get(Scene::ROOT).unwrap().children(), &[a]);
    assert_eq!(scene.find_by_name("a"), Some(a));
    assert!(!scene.is_empty());
}

#[test]
fn world_matrix_composes_parent_chain() {
    let mut scene = Scene::new();
    let parent = scene.add(
        Object3D::group("parent")
            .with_position(Vec3::new(0.0, 2.0, 0.0))
            .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
    );
    let child = scene.add(Object3D::group("child").with_position(Vec3::new(1.0, 0.0, 0.0)));
    scene.add_child(parent, child).unwrap();

    // Child's +X offset is rotated onto +Y by the parent
    let p = scene.world_position(child);
    assert!((p - Vec3::new(0.0, 3.0, 0.0)).length() < 1e-5);
    assert_eq!(scene.ancestors(child).collect::<Vec<_>>(), vec![parent, Scene::ROOT]);
}

#[test]
fn reparenting_rejects_cycles_and_root() {
    let mut scene = Scene::new();
    let a = scene.add(Object3D::group("a"));
    let b = scene.add(Object3D::group("b"));
    scene.add_child(a, b).unwrap();

    assert_eq!(
        scene.add_child(b, a),
        Err(SceneError::Cycle { parent: b, child: a })
    );
    assert_eq!(
        scene.add_child(a, a),
        Err(SceneError::Cycle { parent: a, child: a })
    );
    assert_eq!(scene.add_child(a, Scene::ROOT), Err(SceneError::RootReparent));
}

#[test]
fn reparenting_moves_between_children_lists() {
    let mut scene = Scene::new();
    let a = scene.add(Object3D::group("a"));
    let b = scene.add(Object3D::group("b"));
    scene.add_child(a, b).unwrap();

    assert_eq!(scene.get(Scene::ROOT).unwrap().children(), &[a]);
    assert_eq!(scene.get(a).unwrap().children(), &[b]);

    scene.remove_from_parent(b).unwrap();
    assert_eq!(scene.parent(b), None);
    assert!(scene.get(a).unwrap().children().is_empty());
}

#[test]
fn detached_objects_have_no_parent() {
    let mut scene = Scene::new();
    let d = scene.add_detached(Object3D::mesh("d", Geometry::sphere(1.0)));
    assert_eq!(scene.parent(d), None);
    assert!(scene.attached().all(|id| id != d));
}

#[test]
fn descendants_are_depth_first() {
    let mut scene = Scene::new();
    let a = scene.add(Object3D::group("a"));
    let a1 = scene.add(Object3D::group("a1"));
    let b = scene.add(Object3D::group("b"));
    scene.add_child(a, a1).unwrap();

    let order: Vec<_> = scene.attached().collect();
    assert_eq!(order, vec![a, a1, b]);
}

#[test]
fn draw_range_and_bounds() {
    let mut g = Geometry::cuboid(2.0, 2.0, 2.0);
    assert!(!g.draw_range.is_empty());
    g.set_draw_range(0, Some(0));
    assert!(g.draw_range.is_empty());
    assert!((g.bounding_radius() - 3.0_f32.sqrt()).abs() < 1e-6);
}

#[test]
fn draw_list_skips_hidden_and_empty_ranges() {
    use dragkit_core::{draw_list, ReflectorOptions, ReflectorRtt};

    let mut scene = Scene::new();
    let near = scene.add(Object3D::mesh("near", Geometry::sphere(1.0)).with_position(Vec3::new(0.0, 0.0, 2.0)));
    let far = scene.add(
        Object3D::mesh("far", Geometry::sphere(1.0))
            .with_position(Vec3::new(0.0, 0.0, -2.0))
            .with_scale(Vec3::splat(2.0)),
    );
    let hidden_group = scene.add(Object3D::group("hidden"));
    let inside = scene.add(Object3D::mesh("inside", Geometry::sphere(1.0)));
    scene.add_child(hidden_group, inside).unwrap();
    scene.get_mut(hidden_group).unwrap().visible = false;
    let _detached = scene.add_detached(Object3D::mesh("detached", Geometry::sphere(1.0)));
    let rtt = ReflectorRtt::new(&mut scene, Geometry::quad(2.0, 2.0), ReflectorOptions::default());

    let eye = Vec3::new(0.0, 0.0, 10.0);
    let items = draw_list(&scene, eye, None);
    let ids: Vec<_> = items.iter().map(|i| i.object).collect();

    // Farthest first; the render-to-texture mirror never draws itself
    assert_eq!(ids, vec![far, near]);
    assert!(!ids.contains(&rtt.object()));
    assert!((items[0].size - 2.0).abs() < 1e-5);

    let without_near = draw_list(&scene, eye, Some(near));
    assert_eq!(without_near.len(), 1);
}
