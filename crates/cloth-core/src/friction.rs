use glam::Vec3;

/// Coulomb-style friction coefficients for cloth-on-collider contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrictionParams {
    pub mu_static: f32,
    pub mu_kinetic: f32,
    /// Tangential speed below which the contact counts as sticking.
    pub static_threshold: f32,
}

/// Friction force opposing the tangential part of `velocity` at a contact with unit `normal`.
///
/// Sticking contacts (tangential speed under the threshold) get static friction: the
/// force that cancels the tangential velocity, capped at `mu_static * |v . n|`.
/// Sliding contacts get kinetic friction `-mu_kinetic * v_t`.
pub fn friction_force(velocity: Vec3, normal: Vec3, params: FrictionParams) -> Vec3 {
    let normal_speed = velocity.dot(normal);
    let tangential = velocity - normal_speed * normal;
    let tangential_speed = tangential.length();

    if tangential_speed < params.static_threshold {
        let desired = -tangential;
        let max_static = params.mu_static * normal_speed.abs();
        if tangential_speed > max_static {
            -max_static * tangential.normalize_or_zero()
        } else {
            desired
        }
    } else {
        -params.mu_kinetic * tangential
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: FrictionParams = FrictionParams {
        mu_static: 0.5,
        mu_kinetic: 0.9,
        static_threshold: 1e-4,
    };

    #[test]
    fn test_kinetic_friction_opposes_sliding() {
        let f = friction_force(Vec3::new(2.0, -1.0, 0.0), Vec3::Y, PARAMS);
        assert!((f - Vec3::new(-1.8, 0.0, 0.0)).length() < 1e-6, "got {f}");
    }

    #[test]
    fn test_static_friction_cancels_small_slip() {
        let f = friction_force(Vec3::new(5e-5, -1.0, 0.0), Vec3::Y, PARAMS);
        assert!((f - Vec3::new(-5e-5, 0.0, 0.0)).length() < 1e-9, "got {f}");
    }

    #[test]
    fn test_static_friction_capped_by_normal_speed() {
        // |v_t| = 5e-5 but cap = 0.5 * 2e-5 = 1e-5
        let f = friction_force(Vec3::new(5e-5, 2e-5, 0.0), Vec3::Y, PARAMS);
        assert!((f - Vec3::new(-1e-5, 0.0, 0.0)).length() < 1e-9, "got {f}");
    }

    #[test]
    fn test_pure_normal_velocity_gives_no_friction() {
        let f = friction_force(Vec3::new(0.0, -3.0, 0.0), Vec3::Y, PARAMS);
        assert_eq!(f, Vec3::ZERO);
    }
}
