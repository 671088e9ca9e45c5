use core::time::Duration;
use grid_util::point::Point;
use smallvec::smallvec;

use crate::grid::Grid;
use crate::step::{Step, Stepwise};

/// Longest pause between two traced path cells.
pub const MAX_TRACE_DELAY: Duration = Duration::from_millis(80);

/// Marks the interior of a found path as [Path](crate::grid::CellState::Path), one cell per step
/// from the start outwards. Short paths are drawn slowly and long ones quickly, so tracing takes
/// roughly the same time whatever the length.
#[derive(Clone, Debug)]
pub struct PathTrace {
    path: Vec<Point>,
    next: usize,
    side: usize,
}

impl PathTrace {
    pub fn new(grid: &Grid, path: Vec<Point>) -> PathTrace {
        PathTrace {
            path,
            next: 1,
            side: grid.side(),
        }
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn into_path(self) -> Vec<Point> {
        self.path
    }
}

impl Stepwise for PathTrace {
    type Output = Vec<Point>;

    fn step(&mut self, grid: &mut Grid) -> Step<Vec<Point>> {
        // The last cell is the end, which keeps its state
        while self.next + 1 < self.path.len() {
            let point = self.path[self.next];
            self.next += 1;
            if grid.set_path(point) {
                return Step::Continue(smallvec![point]);
            }
        }
        Step::Finished(std::mem::take(&mut self.path))
    }

    fn pace(&self, base: Duration) -> Duration {
        if self.path.is_empty() {
            return base;
        }
        let millis = base.as_secs_f64() * 1000.0 * 24.0 * self.side as f64 / self.path.len() as f64;
        Duration::from_millis(millis.round() as u64).min(MAX_TRACE_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{position, CellState};
    use crate::solver::SearchAlgorithm;
    use crate::step::run_to_completion;

    #[test]
    fn marks_only_the_interior() {
        let mut grid = Grid::new(5);
        grid.select_cell(position(0, 0));
        grid.select_cell(position(0, 4));
        let path = SearchAlgorithm::Bfs.solve(&mut grid).unwrap().path().unwrap().to_vec();
        let mut trace = PathTrace::new(&grid, path.clone());
        let mut marked = vec![];
        while let Step::Continue(touched) = trace.step(&mut grid) {
            marked.extend(touched);
        }
        assert_eq!(marked, path[1..4].to_vec());
        assert_eq!(grid.count(CellState::Path), 3);
        assert_eq!(grid.state(position(0, 0)), CellState::Start);
        assert_eq!(grid.state(position(0, 4)), CellState::End);
    }

    #[test]
    fn returns_the_path_when_done() {
        let mut grid = Grid::new(3);
        let path = vec![position(0, 0), position(0, 1)];
        let mut trace = PathTrace::new(&grid, path.clone());
        assert_eq!(run_to_completion(&mut trace, &mut grid), path);
    }

    #[test]
    fn pace_scales_with_length_and_is_capped() {
        let grid = Grid::new(25);
        let base = Duration::from_millis(10);
        let long = PathTrace::new(&grid, vec![position(0, 0); 100]);
        // 24 * 25 * 10 / 100
        assert_eq!(long.pace(base), Duration::from_millis(60));
        let short = PathTrace::new(&grid, vec![position(0, 0); 10]);
        assert_eq!(short.pace(base), MAX_TRACE_DELAY);
    }
}
