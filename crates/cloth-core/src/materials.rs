use crate::config::ClothConfig;

/// Fabric preset for quick configuration of spring and contact behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClothMaterial {
    pub structural_k: f32,
    pub shear_k: f32,
    pub bend_k: f32,
    pub damping: f32,
    pub particle_mass: f32,
    pub mu_static: f32,
    pub mu_kinetic: f32,
}

impl ClothMaterial {
    /// Cotton: the default sheet, moderately stiff with grippy contact.
    pub const COTTON: Self = Self {
        structural_k: 50.0,
        shear_k: 25.0,
        bend_k: 5.0,
        damping: 0.2,
        particle_mass: 3.0,
        mu_static: 0.5,
        mu_kinetic: 0.9,
    };

    /// Silk: light, soft in shear and bend, slippery.
    pub const SILK: Self = Self {
        structural_k: 40.0,
        shear_k: 10.0,
        bend_k: 0.5,
        damping: 0.1,
        particle_mass: 1.0,
        mu_static: 0.2,
        mu_kinetic: 0.15,
    };

    /// Denim: heavy and stiff, resists folding.
    pub const DENIM: Self = Self {
        structural_k: 120.0,
        shear_k: 60.0,
        bend_k: 20.0,
        damping: 0.4,
        particle_mass: 5.0,
        mu_static: 0.6,
        mu_kinetic: 0.5,
    };

    /// Rubber: stretchy, heavily damped, very high friction.
    pub const RUBBER: Self = Self {
        structural_k: 20.0,
        shear_k: 20.0,
        bend_k: 8.0,
        damping: 1.0,
        particle_mass: 4.0,
        mu_static: 1.0,
        mu_kinetic: 0.8,
    };

    /// Apply this material preset to a cloth config.
    pub fn apply_to(&self, config: &mut ClothConfig) {
        config.structural_k = self.structural_k;
        config.shear_k = self.shear_k;
        config.bend_k = self.bend_k;
        config.damping = self.damping;
        config.particle_mass = self.particle_mass;
        config.mu_static = self.mu_static;
        config.mu_kinetic = self.mu_kinetic;
    }
}
