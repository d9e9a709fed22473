use cloth_core::math::*;
use glam::{Mat4, Quat, Vec3};

#[test]
fn test_direction_and_length() {
    let (dir, len) = direction_and_length(Vec3::new(3.0, 4.0, 0.0)).unwrap();
    assert!((len - 5.0).abs() < 1e-6);
    assert!((dir - Vec3::new(0.6, 0.8, 0.0)).length() < 1e-6);
}

#[test]
fn test_direction_of_tiny_vector_is_none() {
    assert!(direction_and_length(Vec3::ZERO).is_none());
    assert!(direction_and_length(Vec3::splat(EPSILON * 0.1)).is_none());
}

#[test]
fn test_normal_matrix_rigid_is_rotation() {
    let rotation = Quat::from_rotation_y(0.7);
    let transform = Mat4::from_rotation_translation(rotation, Vec3::new(1.0, 2.0, 3.0));
    let n = normal_matrix(&transform) * Vec3::X;
    assert!((n - rotation * Vec3::X).length() < 1e-5, "got {}", n);
}

#[test]
fn test_normal_matrix_keeps_normals_perpendicular_under_scale() {
    let transform = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
    // surface tangent and normal of the plane x = y in local space
    let tangent = Vec3::new(1.0, 1.0, 0.0);
    let normal = Vec3::new(1.0, -1.0, 0.0).normalize();

    let world_tangent = transform.transform_vector3(tangent);
    let world_normal = normal_matrix(&transform) * normal;
    assert!(
        world_tangent.dot(world_normal).abs() < 1e-5,
        "normal not perpendicular after scaling: {}",
        world_tangent.dot(world_normal)
    );
    // naive transform would break it
    assert!(world_tangent.dot(transform.transform_vector3(normal)).abs() > 0.1);
}

#[test]
fn test_face_normal_of_flat_triangle() {
    let n = face_normal(Vec3::ZERO, Vec3::Z, Vec3::X);
    assert!((n.length() - 1.0).abs() < 1e-6);
    assert!(n.y.abs() > 0.999, "flat triangle normal {}", n);
}

#[test]
fn test_face_normal_of_degenerate_triangle() {
    assert_eq!(face_normal(Vec3::ZERO, Vec3::X, Vec3::X * 2.0), Vec3::ZERO);
}
