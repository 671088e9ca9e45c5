use rand::Rng;
use smallvec::smallvec;

use crate::grid::Grid;
use crate::step::{Step, Stepwise, Touched};

/// Walks the grid row by row and turns each free cell into a barrier with probability 1/3.
#[derive(Clone, Debug)]
pub struct RandomMaze<R> {
    rng: R,
    next: usize,
}

impl<R: Rng> RandomMaze<R> {
    pub fn new(rng: R) -> RandomMaze<R> {
        RandomMaze { rng, next: 0 }
    }
}

impl<R: Rng> Stepwise for RandomMaze<R> {
    type Output = ();

    fn step(&mut self, grid: &mut Grid) -> Step<()> {
        if self.next >= grid.cells().len() {
            return Step::Finished(());
        }
        let point = grid.point_at(self.next);
        self.next += 1;
        if self.rng.gen_ratio(1, 3) && grid.set_barrier(point) {
            Step::Continue(smallvec![point])
        } else {
            Step::Continue(Touched::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{position, CellState};
    use crate::step::run_to_completion;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn one_trial_per_cell_in_row_major_order() {
        let mut grid = Grid::new(5);
        let mut maze = RandomMaze::new(StdRng::seed_from_u64(3));
        let mut trials = 0;
        let mut last = None;
        while let Step::Continue(touched) = maze.step(&mut grid) {
            trials += 1;
            for point in touched {
                if let Some(previous) = last {
                    assert!(grid.ix(previous) < grid.ix(point));
                }
                last = Some(point);
            }
        }
        assert_eq!(trials, 25);
    }

    #[test]
    fn density_is_about_a_third() {
        let mut grid = Grid::new(75);
        grid.select_cell(position(0, 0));
        grid.select_cell(position(74, 74));
        run_to_completion(&mut RandomMaze::new(StdRng::seed_from_u64(0)), &mut grid);
        let barriers = grid.count(CellState::Barrier) as f64 / (75.0 * 75.0);
        assert!((0.28..0.39).contains(&barriers), "{barriers}");
        assert_eq!(grid.state(position(0, 0)), CellState::Start);
    }
}
