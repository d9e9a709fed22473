//! Per-tick force accumulation: gravity, Hookean springs and spring damping.

pub mod gravity;
pub mod spring;

use glam::Vec3;

use crate::particle::ParticleSet;
use crate::spring::Spring;

/// Fill `forces` with the net internal force on every particle.
///
/// `forces` is overwritten; it must have one slot per particle. The friction
/// scratch in `particles.external_force` is not included here, the integrator
/// adds it.
pub fn accumulate_forces(
    particles: &ParticleSet,
    springs: &[Spring],
    gravity: Vec3,
    dt: f32,
    forces: &mut [Vec3],
) {
    debug_assert_eq!(forces.len(), particles.count);
    forces.iter_mut().for_each(|f| *f = Vec3::ZERO);

    gravity::apply_gravity(&particles.anchored, gravity, forces);
    spring::apply_spring_forces(&particles.position, springs, forces);
    spring::apply_damping_forces(&particles.position, &particles.previous, springs, dt, forces);
}

/// Allocating variant of [`accumulate_forces`].
pub fn compute_forces(
    particles: &ParticleSet,
    springs: &[Spring],
    gravity: Vec3,
    dt: f32,
) -> Vec<Vec3> {
    let mut forces = vec![Vec3::ZERO; particles.count];
    accumulate_forces(particles, springs, gravity, dt, &mut forces);
    forces
}
