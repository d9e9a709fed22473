use crate::particle::ParticleSet;
use crate::spring::Spring;

/// Below this separation the spring direction is undefined and the spring is skipped.
const MIN_DISTANCE: f32 = 1e-6;

/// Project every spring back into the band `rest * (1 ± max_stretch_ratio)`.
///
/// Only the excess beyond the band is removed. The correction is split evenly
/// between free endpoints, given entirely to the free one when the other is
/// anchored, and skipped when both are anchored. Springs are processed in order
/// (Gauss-Seidel), so a single pass under-corrects coupled springs; the driver
/// runs several.
///
/// Returns the number of springs that were corrected.
pub fn solve_stretch_limits(
    springs: &[Spring],
    particles: &mut ParticleSet,
    max_stretch_ratio: f32,
) -> usize {
    let mut corrected = 0;

    for s in springs {
        let a = s.a as usize;
        let b = s.b as usize;

        let delta = particles.position[b] - particles.position[a];
        let distance = delta.length();
        if distance < MIN_DISTANCE {
            continue;
        }
        // Unit vector from a to b
        let direction = delta / distance;

        let stretch = distance - s.rest_length;
        let max_stretch = s.rest_length * max_stretch_ratio;
        if stretch.abs() <= max_stretch {
            continue;
        }
        let correction = stretch - max_stretch.copysign(stretch);

        match (particles.anchored[a], particles.anchored[b]) {
            (false, false) => {
                particles.position[a] += 0.5 * correction * direction;
                particles.position[b] -= 0.5 * correction * direction;
            }
            (false, true) => particles.position[a] += correction * direction,
            (true, false) => particles.position[b] -= correction * direction,
            (true, true) => continue,
        }
        corrected += 1;
    }

    corrected
}
