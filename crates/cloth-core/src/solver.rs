use glam::Vec3;
use tracing::{debug, instrument, warn};

use crate::collider::{ColliderFrame, RigidCollider};
use crate::collision::{solve_rigid_collisions, RigidCollisionParams};
use crate::config::{ClothConfig, SelfCollision};
use crate::constraints::contact::{
    solve_self_collisions, solve_self_collisions_hashed, MovedParticles, SelfCollisionParams,
};
use crate::constraints::stretch::solve_stretch_limits;
use crate::error::ClothError;
use crate::forces::accumulate_forces;
use crate::friction::FrictionParams;
use crate::grid::SpatialHashGrid;
use crate::integrator::{clamp_positions, verlet_integrate};
use crate::particle::ParticleSet;
use crate::snapshot::RenderSnapshot;
use crate::spring::Spring;
use crate::topology::{ClothTopology, SpringParams};

/// Counters gathered over one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Springs projected back into their stretch band, summed over iterations.
    pub stretch_corrections: usize,
    /// Overlapping cloth particle pairs separated, summed over iterations.
    pub self_contacts: usize,
    /// Particle-collider contacts resolved, summed over iterations.
    pub rigid_contacts: usize,
    /// Particles clamped by `max_position_magnitude`.
    pub clamped: usize,
    /// Anchored particles after the tick.
    pub anchored: usize,
}

/// Fixed-timestep cloth driver.
///
/// One tick: accumulate forces, Verlet-integrate, then `solver_iterations` rounds of
/// {stretch limiting, self-collision, rigid collision}. All mutation goes through
/// `&mut self`, so a tick can never overlap a read of the particle state.
pub struct ClothSolver {
    config: ClothConfig,
    topology: ClothTopology,
    /// Per-particle force scratch, reused across ticks.
    forces: Vec<Vec3>,
    /// Collider transforms cached for the current tick.
    frames: Vec<ColliderFrame>,
    grid: Option<SpatialHashGrid>,
    moved: MovedParticles,
}

impl ClothSolver {
    /// Validate `config` and build a fresh cloth from it.
    pub fn new(config: ClothConfig) -> Result<Self, ClothError> {
        let (topology, grid) = Self::build(&config)?;
        Ok(Self {
            forces: vec![Vec3::ZERO; topology.particles.count],
            frames: Vec::new(),
            moved: MovedParticles::default(),
            config,
            topology,
            grid,
        })
    }

    /// Replace the configuration and regenerate the cloth from scratch.
    ///
    /// Prior positions and anchors are discarded. On error nothing changes.
    pub fn rebuild(&mut self, config: ClothConfig) -> Result<(), ClothError> {
        let (topology, grid) = Self::build(&config)?;
        self.forces = vec![Vec3::ZERO; topology.particles.count];
        self.config = config;
        self.topology = topology;
        self.grid = grid;
        Ok(())
    }

    #[instrument(
        skip(config),
        fields(width = config.geometry.width, depth = config.geometry.depth)
    )]
    fn build(
        config: &ClothConfig,
    ) -> Result<(ClothTopology, Option<SpatialHashGrid>), ClothError> {
        if let Err(err) = config.validate() {
            warn!(%err, "rejected cloth configuration");
            return Err(err);
        }
        let topology = ClothTopology::build(
            &config.geometry,
            SpringParams::from(config),
            config.particle_mass,
        );
        let grid = (config.self_collision == SelfCollision::SpatialHash).then(|| {
            SpatialHashGrid::for_particles(config.particle_radius, topology.particles.count)
        });
        Ok((topology, grid))
    }

    /// Advance the cloth by `dt` seconds against this tick's colliders.
    ///
    /// `dt` may vary between calls but must be positive and finite; otherwise the
    /// tick does not start and the state is untouched.
    pub fn step(&mut self, dt: f32, colliders: &[RigidCollider]) -> Result<StepStats, ClothError> {
        if !(dt.is_finite() && dt > 0.0) {
            warn!(dt, "rejected timestep");
            return Err(ClothError::InvalidTimestep { dt });
        }

        let config = &self.config;
        let particles = &mut self.topology.particles;
        let springs = &self.topology.springs;
        let mut stats = StepStats::default();

        self.frames.clear();
        for (index, collider) in colliders.iter().enumerate() {
            match ColliderFrame::new(collider) {
                Some(frame) => self.frames.push(frame),
                None => warn!(index, "skipping collider with a non-invertible transform"),
            }
        }

        accumulate_forces(particles, springs, config.gravity, dt, &mut self.forces);
        verlet_integrate(particles, &self.forces, dt, config.friction_policy);

        if let Some(limit) = config.max_position_magnitude {
            stats.clamped = clamp_positions(particles, limit);
            if stats.clamped > 0 {
                warn!(clamped = stats.clamped, limit, "particles clamped after integration");
            }
        }

        let self_params = SelfCollisionParams {
            radius: config.particle_radius,
            correction: config.cloth_collision_correction,
        };
        let rigid_params = RigidCollisionParams {
            margin: config.shape_collision_correction,
            friction: FrictionParams {
                mu_static: config.mu_static,
                mu_kinetic: config.mu_kinetic,
                static_threshold: config.static_friction_threshold,
            },
            anchor_tolerance: config.anchor_tolerance,
        };

        for _ in 0..config.solver_iterations {
            stats.stretch_corrections +=
                solve_stretch_limits(springs, particles, config.max_stretch_ratio);

            stats.self_contacts += match (config.self_collision, self.grid.as_mut()) {
                (SelfCollision::Disabled, _) => 0,
                (SelfCollision::SpatialHash, Some(grid)) => {
                    solve_self_collisions_hashed(particles, self_params, grid, &mut self.moved)
                }
                _ => solve_self_collisions(particles, self_params),
            };

            stats.rigid_contacts +=
                solve_rigid_collisions(particles, &self.frames, &rigid_params, dt);
        }

        self.topology.recompute_normals();
        stats.anchored = self.topology.particles.anchored_count();

        debug!(
            dt,
            rigid_contacts = stats.rigid_contacts,
            self_contacts = stats.self_contacts,
            stretch_corrections = stats.stretch_corrections,
            anchored = stats.anchored,
            "cloth tick"
        );

        Ok(stats)
    }

    pub fn config(&self) -> &ClothConfig {
        &self.config
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.topology.particles
    }

    pub fn springs(&self) -> &[Spring] {
        &self.topology.springs
    }

    pub fn triangles(&self) -> &[u32] {
        &self.topology.triangles
    }

    pub fn topology(&self) -> &ClothTopology {
        &self.topology
    }

    /// Grid dimensions `(width_points, depth_points)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.topology.width_points, self.topology.depth_points)
    }

    /// Pin a particle in place. It stays put until [`ClothSolver::unanchor`].
    pub fn anchor(&mut self, index: usize) -> Result<(), ClothError> {
        self.set_anchored(index, true)
    }

    /// Release a pinned particle.
    ///
    /// Its implied velocity resumes from the `previous` position it had when pinned.
    pub fn unanchor(&mut self, index: usize) -> Result<(), ClothError> {
        self.set_anchored(index, false)
    }

    pub fn is_anchored(&self, index: usize) -> Result<bool, ClothError> {
        self.check_index(index)?;
        Ok(self.topology.particles.anchored[index])
    }

    /// Anchor every particle whose grid coordinates `(i, j)` satisfy `predicate`.
    ///
    /// Returns how many particles were newly anchored.
    pub fn anchor_where<F: Fn(usize, usize) -> bool>(&mut self, predicate: F) -> usize {
        let dp = self.topology.depth_points;
        let particles = &mut self.topology.particles;
        let mut anchored = 0;
        for idx in 0..particles.count {
            if !particles.anchored[idx] && predicate(idx / dp, idx % dp) {
                particles.anchored[idx] = true;
                anchored += 1;
            }
        }
        anchored
    }

    fn set_anchored(&mut self, index: usize, anchored: bool) -> Result<(), ClothError> {
        self.check_index(index)?;
        self.topology.particles.anchored[index] = anchored;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), ClothError> {
        let count = self.topology.particles.count;
        if index < count {
            Ok(())
        } else {
            Err(ClothError::ParticleOutOfBounds { index, count })
        }
    }

    /// Owned copy of everything a renderer needs.
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.topology)
    }
}
