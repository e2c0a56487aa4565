// Host-side tests for scene ray casting.

use dragkit_core::{
    client_to_ndc, Camera, ClientRect, Geometry, Object3D, OrthographicCamera, PerspectiveCamera,
    Ray, Raycaster, Scene,
};
use glam::{Quat, Vec2, Vec3};

fn down_the_z_axis() -> Raycaster {
    Raycaster::new(Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z))
}

#[test]
fn hits_are_sorted_by_distance() {
    let mut scene = Scene::new();
    let far = scene.add(Object3D::mesh("far", Geometry::sphere(0.5)).with_position(Vec3::new(0.0, 0.0, -3.0)));
    let near = scene.add(Object3D::mesh("near", Geometry::sphere(0.5)));

    let mut hits = Vec::new();
    down_the_z_axis().intersect_objects(&scene, &[far, near], false, &mut hits);

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].object, near);
    assert_eq!(hits[1].object, far);
    assert!((hits[0].distance - 9.5).abs() < 1e-4);
    assert!((hits[0].point - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-4);
}

#[test]
fn recursion_reaches_children() {
    let mut scene = Scene::new();
    let group = scene.add(Object3D::group("group"));
    let child = scene.add(Object3D::mesh("child", Geometry::cuboid(1.0, 1.0, 1.0)));
    scene.add_child(group, child).unwrap();

    let rc = down_the_z_axis();
    let mut hits = Vec::new();
    rc.intersect_objects(&scene, &[group], false, &mut hits);
    assert!(hits.is_empty());

    rc.intersect_objects(&scene, &[group], true, &mut hits);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].object, child);
}

#[test]
fn invisible_objects_are_skipped() {
    let mut scene = Scene::new();
    let a = scene.add(Object3D::mesh("a", Geometry::sphere(1.0)));
    scene.get_mut(a).unwrap().visible = false;

    let mut hits = Vec::new();
    down_the_z_axis().intersect_object(&scene, a, true, &mut hits);
    assert!(hits.is_empty());
}

#[test]
fn transforms_are_honored() {
    let mut scene = Scene::new();
    // Thin slab rotated a quarter turn so it lies across the ray
    let slab = scene.add(
        Object3D::mesh("slab", Geometry::cuboid(4.0, 0.2, 0.2))
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
    );
    let scaled = scene.add(
        Object3D::mesh("scaled", Geometry::sphere(0.5))
            .with_position(Vec3::new(3.0, 0.0, 0.0))
            .with_scale(Vec3::splat(4.0)),
    );

    let mut hits = Vec::new();
    down_the_z_axis().intersect_object(&scene, slab, false, &mut hits);
    assert_eq!(hits.len(), 1);
    assert!((hits[0].distance - 8.0).abs() < 1e-4);

    // Radius 2 after scaling reaches x = 1
    hits.clear();
    let side = Raycaster::new(Ray::new(Vec3::new(1.5, 0.0, 10.0), Vec3::NEG_Z));
    side.intersect_object(&scene, scaled, false, &mut hits);
    assert_eq!(hits.len(), 1);
}

#[test]
fn quads_hit_inside_bounds_only() {
    let mut scene = Scene::new();
    let quad = scene.add(Object3D::mesh("quad", Geometry::quad(2.0, 2.0)));

    let mut hits = Vec::new();
    down_the_z_axis().intersect_object(&scene, quad, false, &mut hits);
    assert_eq!(hits.len(), 1);

    hits.clear();
    let outside = Raycaster::new(Ray::new(Vec3::new(1.5, 0.0, 10.0), Vec3::NEG_Z));
    outside.intersect_object(&scene, quad, false, &mut hits);
    assert!(hits.is_empty());
}

#[test]
fn far_limit_discards_hits() {
    let mut scene = Scene::new();
    let a = scene.add(Object3D::mesh("a", Geometry::sphere(0.5)));
    let mut rc = down_the_z_axis();
    rc.far = 5.0;

    let mut hits = Vec::new();
    rc.intersect_object(&scene, a, false, &mut hits);
    assert!(hits.is_empty());
}

#[test]
fn perspective_centre_ray_follows_view_direction() {
    let camera = PerspectiveCamera {
        eye: Vec3::new(1.0, 2.0, 3.0),
        target: Vec3::new(1.0, 2.0, -7.0),
        ..Default::default()
    };
    let mut rc = Raycaster::default();
    rc.set_from_camera(Vec2::ZERO, &camera);

    assert_eq!(rc.ray.origin, camera.eye);
    assert!((rc.ray.direction - camera.world_direction()).length() < 1e-5);
}

#[test]
fn orthographic_rays_are_parallel() {
    let camera = OrthographicCamera::new(-2.0, 2.0, 2.0, -2.0, 0.1, 100.0);
    let a = camera.ray_from_ndc(Vec2::new(-0.5, 0.5));
    let b = camera.ray_from_ndc(Vec2::new(0.5, -0.5));

    assert!((a.direction - b.direction).length() < 1e-6);
    assert!((a.origin.x - -1.0).abs() < 1e-4);
    assert!((a.origin.y - 1.0).abs() < 1e-4);
}

#[test]
fn client_to_ndc_maps_corners() {
    let rect = ClientRect::new(10.0, 20.0, 200.0, 100.0);
    assert_eq!(client_to_ndc(Vec2::new(10.0, 20.0), &rect), Vec2::new(-1.0, 1.0));
    assert_eq!(client_to_ndc(Vec2::new(210.0, 120.0), &rect), Vec2::new(1.0, -1.0));
    assert_eq!(client_to_ndc(Vec2::new(110.0, 70.0), &rect), Vec2::ZERO);

    let empty = ClientRect::default();
    assert_eq!(client_to_ndc(Vec2::new(5.0, 5.0), &empty), Vec2::ZERO);
}
