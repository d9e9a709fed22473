use glam::Vec3;
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::collider::ColliderFrame;
use crate::friction::{friction_force, FrictionParams};
use crate::particle::ParticleSet;

/// Parameters of the cloth-vs-rigid pass.
#[derive(Clone, Copy, Debug)]
pub struct RigidCollisionParams {
    /// Distance kept between the surface and a corrected particle.
    pub margin: f32,
    pub friction: FrictionParams,
    /// Corrected positions closer than this to a collider landmark get anchored.
    pub anchor_tolerance: f32,
}

/// Mutable view of one particle during the rigid pass.
struct ParticleContact<'a> {
    position: &'a mut Vec3,
    previous: Vec3,
    external_force: &'a mut Vec3,
    anchored: &'a mut bool,
}

/// Resolve one particle against every collider in order.
///
/// Returns the number of colliders it was pushed out of.
fn collide_particle(
    p: ParticleContact<'_>,
    frames: &[ColliderFrame],
    params: &RigidCollisionParams,
    inv_dt: f32,
) -> usize {
    let mut contacts = 0;
    for frame in frames {
        if *p.anchored {
            break;
        }

        let local = frame.local_from_world.transform_point3(*p.position);
        let Some(contact) = frame.shape.push_out(local, params.margin) else {
            continue;
        };
        contacts += 1;

        let corrected = frame.world_from_local.transform_point3(contact.position);
        *p.position = corrected;

        let velocity = (corrected - p.previous) * inv_dt;
        let normal = (frame.normal_to_world * contact.normal).normalize_or_zero();
        *p.external_force += friction_force(velocity, normal, params.friction);

        if let Some(landmark) = frame.landmark {
            if corrected.distance(landmark) < params.anchor_tolerance {
                *p.anchored = true;
                trace!(?corrected, ?landmark, "particle anchored to collider landmark");
            }
        }
    }
    contacts
}

/// Push unanchored particles out of every rigid collider and record contact friction.
///
/// The friction force lands in `external_force` and acts on the next integration.
/// Each particle only touches its own state, so under the `parallel` feature the
/// pass runs across threads with identical results.
///
/// Returns the total number of particle-collider contacts.
pub fn solve_rigid_collisions(
    particles: &mut ParticleSet,
    frames: &[ColliderFrame],
    params: &RigidCollisionParams,
    dt: f32,
) -> usize {
    if frames.is_empty() {
        return 0;
    }
    let inv_dt = 1.0 / dt;

    let ParticleSet {
        position,
        previous,
        external_force,
        anchored,
        ..
    } = particles;

    type Slot<'a> = (((&'a mut Vec3, &'a Vec3), &'a mut Vec3), &'a mut bool);
    let resolve = |(((position, &previous), external_force), anchored): Slot<'_>| {
        if *anchored {
            return 0;
        }
        let p = ParticleContact {
            position,
            previous,
            external_force,
            anchored,
        };
        collide_particle(p, frames, params, inv_dt)
    };

    #[cfg(feature = "parallel")]
    let contacts = position
        .par_iter_mut()
        .zip(previous.par_iter())
        .zip(external_force.par_iter_mut())
        .zip(anchored.par_iter_mut())
        .map(resolve)
        .sum();

    #[cfg(not(feature = "parallel"))]
    let contacts = position
        .iter_mut()
        .zip(previous.iter())
        .zip(external_force.iter_mut())
        .zip(anchored.iter_mut())
        .map(resolve)
        .sum();

    contacts
}
