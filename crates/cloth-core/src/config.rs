use glam::Vec3;

use crate::error::ClothError;

/// Grid extent and placement of a cloth sheet.
///
/// Particles sit on the plane `y = origin.y + height`, spanning `width` along +X
/// and `depth` along +Z from the bottom-left `origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClothGeometry {
    pub width: f32,
    pub depth: f32,
    pub width_step: f32,
    pub depth_step: f32,
    pub height: f32,
    pub origin: Vec3,
}

impl ClothGeometry {
    /// Number of particles along X: `floor(width / width_step) + 1`, saturating.
    pub fn width_points(&self) -> usize {
        axis_points(self.width, self.width_step)
    }

    /// Number of particles along Z: `floor(depth / depth_step) + 1`, saturating.
    pub fn depth_points(&self) -> usize {
        axis_points(self.depth, self.depth_step)
    }

    /// Total particle count, or `None` if it does not fit a `u32` particle index.
    pub fn particle_count(&self) -> Option<usize> {
        let count = self.width_points().checked_mul(self.depth_points())?;
        (count <= u32::MAX as usize).then_some(count)
    }
}

fn axis_points(extent: f32, step: f32) -> usize {
    ((extent / step) as usize).saturating_add(1)
}

impl Default for ClothGeometry {
    fn default() -> Self {
        Self {
            width: 2.0,
            depth: 2.0,
            width_step: 0.3,
            depth_step: 0.3,
            height: 1.0,
            origin: Vec3::new(-1.0, 0.0, -1.0),
        }
    }
}

/// Broad-phase used by the cloth-to-cloth collision pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelfCollision {
    /// No cloth-to-cloth collision.
    Disabled,
    /// Test every unordered pair of particles. O(n^2).
    AllPairs,
    /// Find overlaps through a uniform spatial hash. Same result as `AllPairs`.
    SpatialHash,
}

/// When the per-particle external (friction) force is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrictionPolicy {
    /// Consumed by the next integration, then zeroed.
    ClearEachTick,
    /// Never cleared; friction keeps accumulating across ticks.
    Accumulate,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClothConfig {
    pub geometry: ClothGeometry,
    pub particle_mass: f32,
    pub structural_k: f32,
    pub shear_k: f32,
    pub bend_k: f32,
    /// Damping coefficient shared by every spring kind.
    pub damping: f32,
    /// Added as a constant force to unanchored particles (not scaled by mass).
    pub gravity: Vec3,
    pub mu_static: f32,
    pub mu_kinetic: f32,
    /// Tangential speed under which static friction applies.
    pub static_friction_threshold: f32,
    /// Self-collision radius of every particle.
    pub particle_radius: f32,
    /// Margin kept between a particle and a rigid collider surface.
    pub shape_collision_correction: f32,
    /// Extra push applied to each particle of an overlapping cloth pair.
    pub cloth_collision_correction: f32,
    /// Fraction of rest length a spring may stretch or compress before projection.
    pub max_stretch_ratio: f32,
    /// Outer {constrain, self-collide, rigid-collide} passes per tick.
    pub solver_iterations: u32,
    pub self_collision: SelfCollision,
    pub friction_policy: FrictionPolicy,
    /// Distance to a collider landmark under which a particle gets anchored.
    pub anchor_tolerance: f32,
    /// Clamp particles that drift further than this from the origin.
    pub max_position_magnitude: Option<f32>,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            geometry: ClothGeometry::default(),
            particle_mass: 3.0,
            structural_k: 50.0,
            shear_k: 25.0,
            bend_k: 5.0,
            damping: 0.2,
            gravity: Vec3::new(0.0, -9.8, 0.0),
            mu_static: 0.5,
            mu_kinetic: 0.9,
            static_friction_threshold: 1e-4,
            particle_radius: 0.01,
            shape_collision_correction: 0.01,
            cloth_collision_correction: 0.001,
            max_stretch_ratio: 0.1,
            solver_iterations: 5,
            self_collision: SelfCollision::AllPairs,
            friction_policy: FrictionPolicy::ClearEachTick,
            anchor_tolerance: 0.05,
            max_position_magnitude: None,
        }
    }
}

impl ClothConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_geometry(mut self, geometry: ClothGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_stiffness(mut self, structural_k: f32, shear_k: f32, bend_k: f32) -> Self {
        self.structural_k = structural_k;
        self.shear_k = shear_k;
        self.bend_k = bend_k;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_friction(mut self, mu_static: f32, mu_kinetic: f32) -> Self {
        self.mu_static = mu_static;
        self.mu_kinetic = mu_kinetic;
        self
    }

    pub fn with_particle_mass(mut self, mass: f32) -> Self {
        self.particle_mass = mass;
        self
    }

    pub fn with_particle_radius(mut self, radius: f32) -> Self {
        self.particle_radius = radius;
        self
    }

    pub fn with_solver_iterations(mut self, iterations: u32) -> Self {
        self.solver_iterations = iterations;
        self
    }

    pub fn with_self_collision(mut self, mode: SelfCollision) -> Self {
        self.self_collision = mode;
        self
    }

    pub fn with_friction_policy(mut self, policy: FrictionPolicy) -> Self {
        self.friction_policy = policy;
        self
    }

    pub fn with_max_position_magnitude(mut self, limit: Option<f32>) -> Self {
        self.max_position_magnitude = limit;
        self
    }

    /// Reject values that would otherwise turn into NaN positions mid-tick.
    pub fn validate(&self) -> Result<(), ClothError> {
        let g = &self.geometry;
        positive("geometry.width_step", g.width_step)?;
        positive("geometry.depth_step", g.depth_step)?;
        non_negative("geometry.width", g.width)?;
        non_negative("geometry.depth", g.depth)?;
        if !g.height.is_finite() || !g.origin.is_finite() {
            return Err(ClothError::config("geometry.origin", "must be finite"));
        }
        if g.particle_count().is_none() {
            return Err(ClothError::config("geometry", "too many particles"));
        }
        positive("particle_mass", self.particle_mass)?;
        non_negative("structural_k", self.structural_k)?;
        non_negative("shear_k", self.shear_k)?;
        non_negative("bend_k", self.bend_k)?;
        non_negative("damping", self.damping)?;
        if !self.gravity.is_finite() {
            return Err(ClothError::config("gravity", "must be finite"));
        }
        non_negative("mu_static", self.mu_static)?;
        non_negative("mu_kinetic", self.mu_kinetic)?;
        non_negative("static_friction_threshold", self.static_friction_threshold)?;
        positive("particle_radius", self.particle_radius)?;
        non_negative("shape_collision_correction", self.shape_collision_correction)?;
        non_negative("cloth_collision_correction", self.cloth_collision_correction)?;
        non_negative("anchor_tolerance", self.anchor_tolerance)?;
        if !(0.0..1.0).contains(&self.max_stretch_ratio) {
            return Err(ClothError::config("max_stretch_ratio", "must be in [0, 1)"));
        }
        if self.solver_iterations == 0 {
            return Err(ClothError::config("solver_iterations", "must be at least 1"));
        }
        if let Some(limit) = self.max_position_magnitude {
            positive("max_position_magnitude", limit)?;
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ClothError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ClothError::config(field, "must be positive and finite"))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ClothError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ClothError::config(field, "must be non-negative and finite"))
    }
}
