use glam::Vec3;

/// Uniform spatial hash grid used as the self-collision broad-phase.
///
/// Built with a counting sort each pass, O(N). Cells are hashed into a fixed-size
/// bucket table, so distant cells may share a bucket.
pub struct SpatialHashGrid {
    cell_size: f32,
    inv_cell_size: f32,
    table_size: usize,
    /// Particles per bucket after `build`.
    cell_count: Vec<u32>,
    /// First slot of each bucket in `sorted_indices`.
    cell_start: Vec<u32>,
    /// Particle indices grouped by bucket.
    sorted_indices: Vec<u32>,
    /// Bucket of each particle, scratch for `build`.
    particle_hashes: Vec<u32>,
}

impl SpatialHashGrid {
    /// Create grid with given cell size and initial particle capacity.
    /// `cell_size` must be >= 2 * particle_radius for neighbor queries to be complete.
    pub fn new(cell_size: f32, table_size: usize, max_particles: usize) -> Self {
        let table_size = table_size.max(1);
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            table_size,
            cell_count: vec![0u32; table_size],
            cell_start: vec![0u32; table_size],
            sorted_indices: vec![0u32; max_particles],
            particle_hashes: vec![0u32; max_particles],
        }
    }

    /// Grid sized for a cloth of `particle_count` particles of the given radius.
    pub fn for_particles(particle_radius: f32, particle_count: usize) -> Self {
        let table_size = (particle_count * 2).next_power_of_two().max(64);
        Self::new(2.0 * particle_radius, table_size, particle_count)
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Build the grid from current positions.
    /// O(N) using counting sort. Grows the per-particle buffers if `count` exceeds them.
    pub fn build(&mut self, positions: &[Vec3], count: usize) {
        if count > self.sorted_indices.len() {
            self.sorted_indices.resize(count, 0);
            self.particle_hashes.resize(count, 0);
        }

        // Count particles per bucket.
        self.cell_count.fill(0);
        for (i, &p) in positions[..count].iter().enumerate() {
            let bucket = self.bucket_of(p);
            self.particle_hashes[i] = bucket as u32;
            self.cell_count[bucket] += 1;
        }

        // Exclusive prefix sum gives each bucket's first slot.
        let mut running = 0u32;
        for (start, &n) in self.cell_start.iter_mut().zip(&self.cell_count) {
            *start = running;
            running += n;
        }

        // Scatter, reusing cell_count as the per-bucket fill cursor.
        self.cell_count.fill(0);
        for i in 0..count {
            let bucket = self.particle_hashes[i] as usize;
            let slot = self.cell_start[bucket] + self.cell_count[bucket];
            self.sorted_indices[slot as usize] = i as u32;
            self.cell_count[bucket] += 1;
        }
    }

    /// Query all particles in the given position's cell and its 26 neighbors (3x3x3).
    /// Calls `callback(particle_index)` for each particle found in those cells.
    /// The caller is responsible for distance checks; an index may be reported more
    /// than once when two neighboring cells hash to the same bucket.
    pub fn query_neighbors<F: FnMut(u32)>(&self, pos: Vec3, mut callback: F) {
        let (cx, cy, cz) = self.cell_coords(pos);
        for dx in -1..=1_i32 {
            for dy in -1..=1_i32 {
                for dz in -1..=1_i32 {
                    let h = self.hash_cell(cx + dx, cy + dy, cz + dz);
                    let start = self.cell_start[h] as usize;
                    let end = start + self.cell_count[h] as usize;
                    for idx in start..end {
                        callback(self.sorted_indices[idx]);
                    }
                }
            }
        }
    }

    /// Hash function: cell coords -> table index
    #[inline]
    fn hash_cell(&self, cx: i32, cy: i32, cz: i32) -> usize {
        let h = (cx as u32).wrapping_mul(73856093)
            ^ (cy as u32).wrapping_mul(19349663)
            ^ (cz as u32).wrapping_mul(83492791);
        (h as usize) % self.table_size
    }

    #[inline]
    fn bucket_of(&self, pos: Vec3) -> usize {
        let (cx, cy, cz) = self.cell_coords(pos);
        self.hash_cell(cx, cy, cz)
    }

    /// Convert world position to cell coordinates
    #[inline]
    fn cell_coords(&self, pos: Vec3) -> (i32, i32, i32) {
        (
            (pos.x * self.inv_cell_size).floor() as i32,
            (pos.y * self.inv_cell_size).floor() as i32,
            (pos.z * self.inv_cell_size).floor() as i32,
        )
    }
}
