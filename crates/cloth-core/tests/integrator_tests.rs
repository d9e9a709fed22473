use cloth_core::config::FrictionPolicy;
use cloth_core::integrator::{clamp_positions, verlet_integrate};
use cloth_core::particle::ParticleSet;
use glam::Vec3;

const GRAVITY: Vec3 = Vec3::new(0.0, -9.8, 0.0);

#[test]
fn test_free_fall_from_rest() {
    let mut particles = ParticleSet::from_positions(vec![Vec3::ZERO], 1.0);
    verlet_integrate(&mut particles, &[GRAVITY], 0.1, FrictionPolicy::ClearEachTick);

    // x' = x + a dt^2 from rest
    assert!((particles.position[0].y + 0.098).abs() < 1e-6, "y = {}", particles.position[0].y);
    assert_eq!(particles.previous[0], Vec3::ZERO);
}

#[test]
fn test_velocity_carries_between_steps() {
    let mut particles = ParticleSet::from_positions(vec![Vec3::ZERO], 1.0);
    verlet_integrate(&mut particles, &[GRAVITY], 0.1, FrictionPolicy::ClearEachTick);
    verlet_integrate(&mut particles, &[GRAVITY], 0.1, FrictionPolicy::ClearEachTick);

    // 2 * (-0.098) - 0 - 0.098
    assert!((particles.position[0].y + 0.294).abs() < 1e-5, "y = {}", particles.position[0].y);
    assert!((particles.previous[0].y + 0.098).abs() < 1e-6);
}

#[test]
fn test_heavier_particles_fall_slower() {
    let mut particles = ParticleSet::from_positions(vec![Vec3::ZERO], 2.0);
    verlet_integrate(&mut particles, &[GRAVITY], 0.1, FrictionPolicy::ClearEachTick);
    assert!((particles.position[0].y + 0.049).abs() < 1e-6, "y = {}", particles.position[0].y);
}

#[test]
fn test_anchored_particles_do_not_move() {
    let mut particles = ParticleSet::from_positions(vec![Vec3::ONE, Vec3::ONE], 1.0);
    particles.anchored[0] = true;
    particles.previous[0] = Vec3::new(0.5, 1.0, 1.0);
    verlet_integrate(&mut particles, &[GRAVITY, GRAVITY], 0.1, FrictionPolicy::ClearEachTick);

    assert_eq!(particles.position[0], Vec3::ONE);
    assert_eq!(particles.previous[0], Vec3::new(0.5, 1.0, 1.0), "anchored previous must not shift");
    assert!(particles.position[1].y < 1.0);
}

#[test]
fn test_external_force_consumed_and_cleared() {
    let mut particles = ParticleSet::from_positions(vec![Vec3::ZERO], 1.0);
    particles.external_force[0] = Vec3::new(1.0, 0.0, 0.0);
    verlet_integrate(&mut particles, &[Vec3::ZERO], 0.1, FrictionPolicy::ClearEachTick);

    assert!((particles.position[0].x - 0.01).abs() < 1e-6, "x = {}", particles.position[0].x);
    assert_eq!(particles.external_force[0], Vec3::ZERO);
}

#[test]
fn test_external_force_kept_when_accumulating() {
    let mut particles = ParticleSet::from_positions(vec![Vec3::ZERO], 1.0);
    particles.external_force[0] = Vec3::new(1.0, 0.0, 0.0);
    verlet_integrate(&mut particles, &[Vec3::ZERO], 0.1, FrictionPolicy::Accumulate);

    assert_eq!(particles.external_force[0], Vec3::new(1.0, 0.0, 0.0));
}

#[test]
fn test_clamp_pulls_back_escaped_particle() {
    let mut particles = ParticleSet::from_positions(vec![Vec3::new(100.0, 0.0, 0.0), Vec3::X], 1.0);
    let clamped = clamp_positions(&mut particles, 10.0);

    assert_eq!(clamped, 1);
    assert!((particles.position[0] - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
    assert_eq!(particles.previous[0], particles.position[0], "clamped particle must stop");
    assert_eq!(particles.position[1], Vec3::X);
}

#[test]
fn test_clamp_recovers_non_finite_position() {
    let mut particles = ParticleSet::from_positions(vec![Vec3::ONE], 1.0);
    particles.position[0] = Vec3::new(f32::NAN, 0.0, 0.0);
    let clamped = clamp_positions(&mut particles, 10.0);

    assert_eq!(clamped, 1);
    assert_eq!(particles.position[0], Vec3::ONE);
}
