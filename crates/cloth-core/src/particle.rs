use std::collections::BTreeSet;

use glam::Vec3;

/// SoA cloth particle storage.
///
/// Velocity is never stored: it is implied by `position - previous`.
pub struct ParticleSet {
    pub count: usize,
    pub position: Vec<Vec3>,
    /// Position before the most recent integration step. Only the integrator writes it.
    pub previous: Vec<Vec3>,
    pub mass: Vec<f32>,
    /// Pinned particles are skipped by integration and collision response.
    pub anchored: Vec<bool>,
    /// Friction force collected during a tick, consumed by the next integration.
    pub external_force: Vec<Vec3>,
    /// Vertex normal (sum of incident unit face normals, normalized), rendering only.
    pub normal: Vec<Vec3>,
    /// Spring-connected particles, excluded from self-collision.
    pub neighbors: Vec<BTreeSet<u32>>,
}

impl ParticleSet {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            position: vec![Vec3::ZERO; count],
            previous: vec![Vec3::ZERO; count],
            mass: vec![1.0; count],
            anchored: vec![false; count],
            external_force: vec![Vec3::ZERO; count],
            normal: vec![Vec3::ZERO; count],
            neighbors: vec![BTreeSet::new(); count],
        }
    }

    /// Build a set at rest: `previous == position`, uniform mass.
    pub fn from_positions(positions: Vec<Vec3>, mass: f32) -> Self {
        let count = positions.len();
        Self {
            count,
            previous: positions.clone(),
            position: positions,
            mass: vec![mass; count],
            anchored: vec![false; count],
            external_force: vec![Vec3::ZERO; count],
            normal: vec![Vec3::ZERO; count],
            neighbors: vec![BTreeSet::new(); count],
        }
    }

    /// Record a symmetric adjacency between `i` and `j`.
    pub fn link(&mut self, i: u32, j: u32) {
        self.neighbors[i as usize].insert(j);
        self.neighbors[j as usize].insert(i);
    }

    #[inline]
    pub fn are_neighbors(&self, i: usize, j: usize) -> bool {
        self.neighbors[i].contains(&(j as u32))
    }

    pub fn anchored_count(&self) -> usize {
        self.anchored.iter().filter(|&&a| a).count()
    }
}
