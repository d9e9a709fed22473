use crate::grid::SpatialHashGrid;
use crate::math::direction_and_length;
use crate::particle::ParticleSet;

/// Cloth-to-cloth repulsion parameters.
#[derive(Clone, Copy, Debug)]
pub struct SelfCollisionParams {
    /// Particle radius; pairs closer than twice this overlap.
    pub radius: f32,
    /// Extra separation added on top of half the overlap, per particle.
    pub correction: f32,
}

/// Whether `(i, j)` overlaps and can be separated: not spring neighbors, not both
/// anchored, closer than the contact distance but not coincident.
fn in_contact(particles: &ParticleSet, i: usize, j: usize, min_dist: f32) -> bool {
    if (particles.anchored[i] && particles.anchored[j]) || particles.are_neighbors(i, j) {
        return false;
    }
    let delta = particles.position[j] - particles.position[i];
    delta.length_squared() < min_dist * min_dist && direction_and_length(delta).is_some()
}

/// Push one overlapping pair apart along the line joining them.
///
/// Each free particle moves `overlap / 2 + correction`. If one side is anchored the
/// other takes the whole displacement.
fn separate(particles: &mut ParticleSet, i: usize, j: usize, params: SelfCollisionParams) {
    let min_dist = 2.0 * params.radius;
    let delta = particles.position[j] - particles.position[i];
    let Some((direction, distance)) = direction_and_length(delta) else {
        return;
    };

    let push = 0.5 * (min_dist - distance) + params.correction;
    match (particles.anchored[i], particles.anchored[j]) {
        (false, false) => {
            particles.position[i] -= direction * push;
            particles.position[j] += direction * push;
        }
        (true, false) => particles.position[j] += direction * (2.0 * push),
        (false, true) => particles.position[i] -= direction * (2.0 * push),
        (true, true) => {}
    }
}

/// Test every unordered pair of non-adjacent particles. O(n^2).
///
/// Returns the number of pairs that were separated.
pub fn solve_self_collisions(particles: &mut ParticleSet, params: SelfCollisionParams) -> usize {
    let min_dist = 2.0 * params.radius;
    let mut contacts = 0;
    for i in 0..particles.count {
        for j in (i + 1)..particles.count {
            if in_contact(particles, i, j, min_dist) {
                separate(particles, i, j, params);
                contacts += 1;
            }
        }
    }
    contacts
}

/// Particles displaced since the grid was last built.
///
/// Their grid buckets are stale, so the hashed pass checks them directly.
#[derive(Debug, Default)]
pub struct MovedParticles {
    list: Vec<u32>,
    flags: Vec<bool>,
}

impl MovedParticles {
    fn reset(&mut self, count: usize) {
        self.list.clear();
        self.flags.clear();
        self.flags.resize(count, false);
    }

    fn mark(&mut self, index: usize) {
        if !self.flags[index] {
            self.flags[index] = true;
            self.list.push(index as u32);
        }
    }
}

/// Smallest `j > after` in contact with particle `i` at the current positions.
///
/// Unmoved particles are found through `grid` around the live position of `i`;
/// moved ones are tested one by one.
fn next_contact(
    particles: &ParticleSet,
    grid: &SpatialHashGrid,
    moved: &MovedParticles,
    i: usize,
    after: usize,
    min_dist: f32,
) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut consider = |j: usize| {
        if j <= after || best.is_some_and(|b| j >= b) {
            return;
        }
        if in_contact(particles, i, j, min_dist) {
            best = Some(j);
        }
    };

    grid.query_neighbors(particles.position[i], |j| consider(j as usize));
    for &j in &moved.list {
        consider(j as usize);
    }
    best
}

/// Spatial-hash variant of [`solve_self_collisions`].
///
/// Visits the same pairs in the same order as the all-pairs loop and gives
/// identical results. The grid is built once from the positions at the start of the
/// pass; particles displaced afterwards are tracked in `moved` and tested directly.
///
/// `grid` cell size must be at least twice the particle radius.
pub fn solve_self_collisions_hashed(
    particles: &mut ParticleSet,
    params: SelfCollisionParams,
    grid: &mut SpatialHashGrid,
    moved: &mut MovedParticles,
) -> usize {
    let min_dist = 2.0 * params.radius;
    grid.build(&particles.position, particles.count);
    moved.reset(particles.count);

    let mut contacts = 0;
    for i in 0..particles.count {
        let mut cursor = i;
        // Pairs skipped by the all-pairs loop leave both positions untouched, so the
        // next pair it separates is the smallest `j` in contact right now.
        while let Some(j) = next_contact(particles, grid, moved, i, cursor, min_dist) {
            separate(particles, i, j, params);
            moved.mark(i);
            moved.mark(j);
            contacts += 1;
            cursor = j;
        }
    }
    contacts
}
