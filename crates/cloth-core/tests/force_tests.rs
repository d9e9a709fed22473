use cloth_core::forces::compute_forces;
use cloth_core::particle::ParticleSet;
use cloth_core::spring::{Spring, SpringKind};
use glam::Vec3;

fn pair(a: Vec3, b: Vec3) -> ParticleSet {
    ParticleSet::from_positions(vec![a, b], 1.0)
}

#[test]
fn test_gravity_only() {
    let particles = ParticleSet::from_positions(vec![Vec3::ZERO, Vec3::X], 3.0);
    let gravity = Vec3::new(0.0, -9.8, 0.0);
    let forces = compute_forces(&particles, &[], gravity, 0.01);
    // gravity enters as a force; dividing by mass happens in the integrator
    assert_eq!(forces, vec![gravity, gravity]);
}

#[test]
fn test_spring_at_rest_length_exerts_nothing() {
    let particles = pair(Vec3::ZERO, Vec3::X);
    let springs = [Spring::new(0, 1, 1.0, 50.0, 0.2, SpringKind::Structural)];
    let forces = compute_forces(&particles, &springs, Vec3::ZERO, 0.01);
    for f in &forces {
        assert!(f.length() < 1e-6, "rest spring produced force {}", f);
    }
}

#[test]
fn test_stretched_spring_pulls_endpoints_together() {
    let particles = pair(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
    let springs = [Spring::new(0, 1, 1.0, 10.0, 0.0, SpringKind::Structural)];
    let forces = compute_forces(&particles, &springs, Vec3::ZERO, 0.01);

    // |F| = k * (len - rest) = 10
    assert!((forces[0] - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5, "a: {}", forces[0]);
    assert!((forces[1] - Vec3::new(-10.0, 0.0, 0.0)).length() < 1e-5, "b: {}", forces[1]);
}

#[test]
fn test_compressed_spring_pushes_endpoints_apart() {
    let particles = pair(Vec3::ZERO, Vec3::new(0.0, 0.5, 0.0));
    let springs = [Spring::new(0, 1, 1.0, 4.0, 0.0, SpringKind::Bend)];
    let forces = compute_forces(&particles, &springs, Vec3::ZERO, 0.01);
    assert!(forces[0].y < 0.0 && forces[1].y > 0.0);
    assert!((forces[0].y + 2.0).abs() < 1e-5);
}

#[test]
fn test_spring_forces_are_equal_and_opposite() {
    let particles = pair(Vec3::new(0.1, -0.3, 0.7), Vec3::new(1.2, 0.4, -0.5));
    let springs = [Spring::new(0, 1, 0.8, 25.0, 0.0, SpringKind::Shear)];
    let forces = compute_forces(&particles, &springs, Vec3::ZERO, 0.01);
    assert!((forces[0] + forces[1]).length() < 1e-5);
}

#[test]
fn test_damping_opposes_separation() {
    let mut particles = pair(Vec3::ZERO, Vec3::X);
    // b moved +0.1 along the spring during the last 0.1 s
    particles.previous[1] = Vec3::new(0.9, 0.0, 0.0);
    let springs = [Spring::new(0, 1, 1.0, 0.0, 0.5, SpringKind::Structural)];
    let forces = compute_forces(&particles, &springs, Vec3::ZERO, 0.1);

    assert!((forces[0] - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-4, "a: {}", forces[0]);
    assert!((forces[1] - Vec3::new(-0.5, 0.0, 0.0)).length() < 1e-4, "b: {}", forces[1]);
}

#[test]
fn test_damping_ignores_tangential_motion() {
    let mut particles = pair(Vec3::ZERO, Vec3::X);
    particles.previous[1] = Vec3::new(1.0, -0.1, 0.0);
    let springs = [Spring::new(0, 1, 1.0, 0.0, 0.5, SpringKind::Structural)];
    let forces = compute_forces(&particles, &springs, Vec3::ZERO, 0.1);
    assert!(forces[1].length() < 1e-5, "tangential motion damped: {}", forces[1]);
}

#[test]
fn test_coincident_endpoints_are_skipped() {
    let particles = pair(Vec3::ONE, Vec3::ONE);
    let springs = [Spring::new(0, 1, 1.0, 50.0, 0.2, SpringKind::Structural)];
    let forces = compute_forces(&particles, &springs, Vec3::new(0.0, -9.8, 0.0), 0.01);
    for f in &forces {
        assert!(f.is_finite());
        assert_eq!(*f, Vec3::new(0.0, -9.8, 0.0));
    }
}

#[test]
fn test_anchored_particles_receive_no_gravity() {
    let mut particles = pair(Vec3::ZERO, Vec3::X);
    particles.anchored[0] = true;
    let forces = compute_forces(&particles, &[], Vec3::new(0.0, -9.8, 0.0), 0.01);
    assert_eq!(forces[0], Vec3::ZERO);
    assert_eq!(forces[1].y, -9.8);
}
