//! Uniform grid used to find nearby particle pairs in large fields.

use emergent_core::Viewport;

use crate::particle::Particle;

const MIN_BUCKETS: usize = 1024;

/// Particles bucketed into square cells at least `threshold` wide.
///
/// Any two particles closer than the cell size sit in the same or in
/// adjacent cells, so only those buckets need to be compared.
pub(crate) struct SpatialGrid {
    cell: f64,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub(crate) fn build(particles: &[Particle], viewport: Viewport, threshold: f64) -> Self {
        // Grow the cells for tiny thresholds so the bucket count stays
        // proportional to the particle count.
        let max_buckets = (particles.len() * 4).max(MIN_BUCKETS) as f64;
        let cell = threshold.max((viewport.width * viewport.height / max_buckets).sqrt());
        let cols = ((viewport.width / cell).ceil() as usize).max(1);
        let rows = ((viewport.height / cell).ceil() as usize).max(1);

        let mut grid = Self {
            cell,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
        };
        for (i, p) in particles.iter().enumerate() {
            let (cx, cy) = grid.cell_of(p.x, p.y);
            grid.cells[cy * cols + cx].push(i);
        }
        grid
    }

    /// Cell holding a point; points slightly outside land in the edge cells.
    fn cell_of(&self, x: f64, y: f64) -> (usize, usize) {
        let clamp = |v: f64, n: usize| ((v / self.cell).floor().max(0.0) as usize).min(n - 1);
        (clamp(x, self.cols), clamp(y, self.rows))
    }

    /// Visit every unordered pair of particles in the same or adjacent cells.
    pub(crate) fn for_each_candidate_pair(&self, mut f: impl FnMut(usize, usize)) {
        // Half of the 3x3 neighbourhood, so each cell pair is seen once.
        const NEIGHBOURS: [(isize, isize); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];

        for cy in 0..self.rows {
            for cx in 0..self.cols {
                let here = &self.cells[cy * self.cols + cx];
                for (k, &i) in here.iter().enumerate() {
                    for &j in &here[k + 1..] {
                        f(i, j);
                    }
                }

                for (dx, dy) in NEIGHBOURS {
                    let (nx, ny) = (cx as isize + dx, cy as isize + dy);
                    if nx < 0 || ny < 0 || nx >= self.cols as isize || ny >= self.rows as isize {
                        continue;
                    }
                    let there = &self.cells[ny as usize * self.cols + nx as usize];
                    for &i in here {
                        for &j in there {
                            f(i, j);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> Particle {
        Particle::new(x, y, 0.0, 0.0, 1.0, 1.0)
    }

    fn pairs(grid: &SpatialGrid) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        grid.for_each_candidate_pair(|i, j| out.push((i.min(j), i.max(j))));
        out.sort_unstable();
        out
    }

    #[test]
    fn test_far_particles_are_not_candidates() {
        let particles = [at(10.0, 10.0), at(790.0, 590.0)];
        let grid = SpatialGrid::build(&particles, Viewport::new(800.0, 600.0), 100.0);
        assert!(pairs(&grid).is_empty());
    }

    #[test]
    fn test_adjacent_cells_are_candidates() {
        // Straddle a cell boundary diagonally in the "down-left" direction.
        let particles = [at(105.0, 95.0), at(95.0, 105.0), at(150.0, 50.0)];
        let grid = SpatialGrid::build(&particles, Viewport::new(800.0, 600.0), 100.0);
        assert_eq!(pairs(&grid), vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_each_pair_reported_once() {
        let particles: Vec<Particle> = (0..20).map(|i| at(i as f64 * 7.0, 50.0)).collect();
        let grid = SpatialGrid::build(&particles, Viewport::new(800.0, 600.0), 100.0);
        let found = pairs(&grid);
        let mut deduped = found.clone();
        deduped.dedup();
        assert_eq!(found, deduped);
    }

    #[test]
    fn test_points_outside_viewport_use_edge_cells() {
        let particles = [at(-0.2, -0.2), at(800.3, 600.3)];
        let grid = SpatialGrid::build(&particles, Viewport::new(800.0, 600.0), 100.0);
        assert_eq!(grid.cell_of(-0.2, -0.2), (0, 0));
        assert_eq!(grid.cell_of(800.3, 600.3), (grid.cols - 1, grid.rows - 1));
    }
}
