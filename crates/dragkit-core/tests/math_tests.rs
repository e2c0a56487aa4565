// Host-side tests for ray and plane math.

use dragkit_core::{reflect, Plane, Ray};
use glam::{Mat4, Quat, Vec3};

#[test]
fn ray_hits_plane_in_front() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
    let plane = Plane::from_normal_and_coplanar_point(Vec3::Z, Vec3::new(0.0, 0.0, 1.0));

    let hit = ray.intersect_plane(&plane).unwrap();
    assert!((hit - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-6);
    assert_eq!(ray.distance_to_plane(&plane), Some(4.0));
}

#[test]
fn ray_misses_plane_behind() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
    let plane = Plane::from_normal_and_coplanar_point(Vec3::Z, Vec3::ZERO);
    assert!(ray.intersect_plane(&plane).is_none());
}

#[test]
fn parallel_ray_only_hits_when_on_plane() {
    let plane = Plane::from_normal_and_coplanar_point(Vec3::Y, Vec3::ZERO);

    let above = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
    assert!(above.intersect_plane(&plane).is_none());

    let on = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::X);
    assert_eq!(on.intersect_plane(&plane), Some(Vec3::new(2.0, 0.0, 0.0)));
}

#[test]
fn ray_sphere_front_and_inside() {
    let ray = Ray::new(Vec3::ZERO, Vec3::Z);
    let t = ray.intersect_sphere(Vec3::new(0.0, 0.0, 5.0), 2.0).unwrap();
    assert!((t - 3.0).abs() < 1e-5);

    // Starting inside reports the exit point
    let inside = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::X);
    let t = inside.intersect_sphere(Vec3::new(0.0, 0.0, 5.0), 3.0).unwrap();
    assert!((t - 3.0).abs() < 1e-5);

    let miss = Ray::new(Vec3::ZERO, Vec3::X);
    assert!(miss.intersect_sphere(Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
}

#[test]
fn ray_aabb_slabs() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
    let t = ray.intersect_aabb(Vec3::splat(-1.0), Vec3::splat(1.0)).unwrap();
    assert!((t - 4.0).abs() < 1e-5);

    let beside = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z);
    assert!(beside.intersect_aabb(Vec3::splat(-1.0), Vec3::splat(1.0)).is_none());

    let away = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
    assert!(away.intersect_aabb(Vec3::splat(-1.0), Vec3::splat(1.0)).is_none());
}

#[test]
fn plane_transform_moves_and_rotates() {
    let plane = Plane::from_normal_and_coplanar_point(Vec3::Z, Vec3::ZERO);
    let m = Mat4::from_rotation_translation(
        Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        Vec3::new(2.0, 0.0, 0.0),
    );
    let moved = plane.transformed(&m);

    assert!((moved.normal - Vec3::X).length() < 1e-5);
    assert!(moved.distance_to_point(Vec3::new(2.0, 7.0, -3.0)).abs() < 1e-5);
}

#[test]
fn project_and_reflect() {
    let plane = Plane::from_normal_and_coplanar_point(Vec3::Y, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(plane.project_point(Vec3::new(3.0, 4.0, 5.0)), Vec3::new(3.0, 1.0, 5.0));
    assert_eq!(reflect(Vec3::new(1.0, -1.0, 0.0), Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
}
