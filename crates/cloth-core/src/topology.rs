use glam::Vec3;
use tracing::info;

use crate::config::{ClothConfig, ClothGeometry};
use crate::math::face_normal;
use crate::particle::ParticleSet;
use crate::spring::{Spring, SpringKind};

/// Stiffness and damping assigned per spring kind at build time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub structural_k: f32,
    pub shear_k: f32,
    pub bend_k: f32,
    pub damping: f32,
}

impl From<&ClothConfig> for SpringParams {
    fn from(config: &ClothConfig) -> Self {
        Self {
            structural_k: config.structural_k,
            shear_k: config.shear_k,
            bend_k: config.bend_k,
            damping: config.damping,
        }
    }
}

/// Particle grid, spring network and triangle index buffer of one cloth sheet.
///
/// Particle `(i, j)` (i along X, j along Z) lives at index `i * depth_points + j`.
/// Springs and triangles share that addressing.
pub struct ClothTopology {
    pub particles: ParticleSet,
    pub springs: Vec<Spring>,
    /// Two counter-clockwise triangles per grid cell.
    pub triangles: Vec<u32>,
    pub width_points: usize,
    pub depth_points: usize,
}

impl ClothTopology {
    /// Build the full grid from scratch. No particle is anchored.
    ///
    /// An axis with fewer than two points simply gets no springs along it. The
    /// geometry must pass [`ClothConfig::validate`], which keeps every particle
    /// index within `u32`.
    pub fn build(geometry: &ClothGeometry, params: SpringParams, mass: f32) -> Self {
        debug_assert!(geometry.particle_count().is_some());
        let width_points = geometry.width_points();
        let depth_points = geometry.depth_points();

        let mut positions = Vec::with_capacity(width_points * depth_points);
        for i in 0..width_points {
            for j in 0..depth_points {
                positions.push(
                    geometry.origin
                        + Vec3::new(
                            i as f32 * geometry.width_step,
                            geometry.height,
                            j as f32 * geometry.depth_step,
                        ),
                );
            }
        }

        let mut topology = Self {
            particles: ParticleSet::from_positions(positions, mass),
            springs: Vec::new(),
            triangles: Vec::new(),
            width_points,
            depth_points,
        };
        topology.create_springs(params);
        topology.create_triangles();
        topology.recompute_normals();

        info!(
            particles = topology.particles.count,
            springs = topology.springs.len(),
            triangles = topology.triangles.len() / 3,
            width_points,
            depth_points,
            "cloth topology built"
        );

        topology
    }

    /// Particle index of grid point `(i, j)`.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> u32 {
        (i * self.depth_points + j) as u32
    }

    fn create_springs(&mut self, params: SpringParams) {
        let (wp, dp) = (self.width_points, self.depth_points);

        for i in 0..wp {
            for j in 0..dp {
                let current = self.index(i, j);

                // Structural: right and up only, so each edge is added once.
                if i + 1 < wp {
                    self.add_spring(current, self.index(i + 1, j), SpringKind::Structural, params);
                }
                if j + 1 < dp {
                    self.add_spring(current, self.index(i, j + 1), SpringKind::Structural, params);
                }

                // Shear
                if i + 1 < wp && j + 1 < dp {
                    self.add_spring(current, self.index(i + 1, j + 1), SpringKind::Shear, params);
                }
                if i + 1 < wp && j > 0 {
                    self.add_spring(current, self.index(i + 1, j - 1), SpringKind::Shear, params);
                }

                // Bend
                if i + 2 < wp {
                    self.add_spring(current, self.index(i + 2, j), SpringKind::Bend, params);
                }
                if j + 2 < dp {
                    self.add_spring(current, self.index(i, j + 2), SpringKind::Bend, params);
                }
            }
        }
    }

    fn add_spring(&mut self, a: u32, b: u32, kind: SpringKind, params: SpringParams) {
        let stiffness = match kind {
            SpringKind::Structural => params.structural_k,
            SpringKind::Shear => params.shear_k,
            SpringKind::Bend => params.bend_k,
        };
        let rest_length =
            (self.particles.position[b as usize] - self.particles.position[a as usize]).length();
        self.springs
            .push(Spring::new(a, b, rest_length, stiffness, params.damping, kind));
        self.particles.link(a, b);
    }

    fn create_triangles(&mut self) {
        self.triangles.clear();
        if self.width_points < 2 || self.depth_points < 2 {
            return;
        }
        self.triangles
            .reserve((self.width_points - 1) * (self.depth_points - 1) * 6);

        for i in 0..self.width_points - 1 {
            for j in 0..self.depth_points - 1 {
                let current = self.index(i, j);
                let top = self.index(i, j + 1);
                let right = self.index(i + 1, j);
                let top_diagonal = self.index(i + 1, j + 1);

                self.triangles
                    .extend_from_slice(&[current, top_diagonal, right, current, top, top_diagonal]);
            }
        }
    }

    /// Recompute per-vertex normals from the current positions.
    ///
    /// Each vertex sums the unit normals of its incident triangles. Vertices with no
    /// (non-degenerate) triangle keep a zero normal.
    pub fn recompute_normals(&mut self) {
        let particles = &mut self.particles;
        particles.normal.iter_mut().for_each(|n| *n = Vec3::ZERO);

        for tri in self.triangles.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let n = face_normal(
                particles.position[i0],
                particles.position[i1],
                particles.position[i2],
            );
            particles.normal[i0] += n;
            particles.normal[i1] += n;
            particles.normal[i2] += n;
        }

        for n in particles.normal.iter_mut() {
            *n = n.normalize_or_zero();
        }
    }

    pub fn spring_count(&self, kind: SpringKind) -> usize {
        self.springs.iter().filter(|s| s.kind == kind).count()
    }
}
