use glam::Vec3;

/// Add `gravity` as a constant force to every unanchored particle.
///
/// The value is a force, not an acceleration: the integrator divides it by the
/// particle mass, so heavier particles fall slower.
pub fn apply_gravity(anchored: &[bool], gravity: Vec3, forces: &mut [Vec3]) {
    for (force, &pinned) in forces.iter_mut().zip(anchored) {
        if !pinned {
            *force += gravity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_skips_anchored() {
        let anchored = [false, true, false];
        let mut forces = [Vec3::ZERO; 3];
        apply_gravity(&anchored, Vec3::new(0.0, -9.8, 0.0), &mut forces);

        assert_eq!(forces[0], Vec3::new(0.0, -9.8, 0.0));
        assert_eq!(forces[1], Vec3::ZERO);
        assert_eq!(forces[2], Vec3::new(0.0, -9.8, 0.0));
    }
}
