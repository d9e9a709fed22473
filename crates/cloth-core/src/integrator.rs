use glam::Vec3;

use crate::config::FrictionPolicy;
use crate::particle::ParticleSet;

/// Position-Verlet step: `x' = 2x - x_prev + (F + F_ext) / m * dt^2`.
///
/// Anchored particles are skipped entirely, `previous` included. Under
/// [`FrictionPolicy::ClearEachTick`] the external force is zeroed once consumed.
pub fn verlet_integrate(
    particles: &mut ParticleSet,
    forces: &[Vec3],
    dt: f32,
    policy: FrictionPolicy,
) {
    let dt_sq = dt * dt;

    for i in 0..particles.count {
        if particles.anchored[i] {
            continue;
        }

        let acceleration = (forces[i] + particles.external_force[i]) / particles.mass[i];
        let position = particles.position[i];
        let next = 2.0 * position - particles.previous[i] + acceleration * dt_sq;

        particles.previous[i] = position;
        particles.position[i] = next;
    }

    if policy == FrictionPolicy::ClearEachTick {
        particles.external_force.iter_mut().for_each(|f| *f = Vec3::ZERO);
    }
}

/// Pull particles that escaped `limit` back onto that sphere and stop them.
///
/// Returns how many particles were clamped.
pub fn clamp_positions(particles: &mut ParticleSet, limit: f32) -> usize {
    let mut clamped = 0;
    for i in 0..particles.count {
        if particles.anchored[i] {
            continue;
        }
        let p = particles.position[i];
        let len = p.length();
        if len > limit || !len.is_finite() {
            let source = if p.is_finite() {
                p
            } else if particles.previous[i].is_finite() {
                particles.previous[i]
            } else {
                Vec3::ZERO
            };
            let safe = source.clamp_length_max(limit);
            particles.position[i] = safe;
            particles.previous[i] = safe;
            clamped += 1;
        }
    }
    clamped
}
