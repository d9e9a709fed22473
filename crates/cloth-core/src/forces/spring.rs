use glam::Vec3;

use crate::math::direction_and_length;
use crate::spring::Spring;

/// Smallest timestep for which a finite-difference velocity is trusted.
const MIN_DAMPING_DT: f32 = 1e-9;

/// Hooke's law: `F_a = -k (|a - b| - rest) * dir(a - b)`, `F_b = -F_a`.
///
/// Springs shorter than [`crate::math::EPSILON`] have no direction and are skipped.
pub fn apply_spring_forces(positions: &[Vec3], springs: &[Spring], forces: &mut [Vec3]) {
    for s in springs {
        let a = s.a as usize;
        let b = s.b as usize;
        let Some((direction, length)) = direction_and_length(positions[a] - positions[b]) else {
            continue;
        };

        let force = -s.stiffness * (length - s.rest_length) * direction;
        forces[a] += force;
        forces[b] -= force;
    }
}

/// Damp the relative endpoint velocity along each spring.
///
/// Velocities are finite differences `(position - previous) / dt`.
pub fn apply_damping_forces(
    positions: &[Vec3],
    previous: &[Vec3],
    springs: &[Spring],
    dt: f32,
    forces: &mut [Vec3],
) {
    if dt < MIN_DAMPING_DT {
        return;
    }
    let inv_dt = 1.0 / dt;

    for s in springs {
        let a = s.a as usize;
        let b = s.b as usize;
        let delta = positions[a] - positions[b];
        let Some((direction, length)) = direction_and_length(delta) else {
            continue;
        };

        let vel_a = (positions[a] - previous[a]) * inv_dt;
        let vel_b = (positions[b] - previous[b]) * inv_dt;

        let force = -s.damping * (vel_a - vel_b).dot(delta) / length * direction;
        forces[a] += force;
        forces[b] -= force;
    }
}
