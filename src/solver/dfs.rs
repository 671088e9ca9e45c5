use grid_util::point::Point;
use smallvec::smallvec;

use super::{endpoints, reconstruct_path, PathResult};
use crate::error::RunRequestError;
use crate::grid::{CellState, Grid};
use crate::step::{Step, Stepwise};

/// Depth-first search. Exploratory only: the path it returns connects start and end but is
/// usually far from the shortest.
///
/// The returned path follows the parent links of the DFS tree. The raw order in which cells were
/// popped, dead ends included, is kept in [Dfs::trail].
#[derive(Clone, Debug)]
pub struct Dfs {
    start: usize,
    end: usize,
    /// Pending cells together with the cell that pushed them.
    stack: Vec<(usize, Option<usize>)>,
    trail: Vec<Point>,
}

impl Dfs {
    pub fn new(grid: &mut Grid) -> Result<Dfs, RunRequestError> {
        let (start, end) = endpoints(grid)?;
        grid.cell_at_mut(start).source_distance = 0;
        Ok(Dfs {
            start,
            end,
            stack: vec![(start, None)],
            trail: Vec::new(),
        })
    }

    /// Every cell popped so far, in visiting order.
    pub fn trail(&self) -> &[Point] {
        &self.trail
    }
}

impl Stepwise for Dfs {
    type Output = PathResult;

    fn step(&mut self, grid: &mut Grid) -> Step<PathResult> {
        if self.start == self.end {
            return Step::Finished(PathResult::Found(vec![grid.point_at(self.start)]));
        }
        loop {
            let Some((ix, parent)) = self.stack.pop() else {
                return Step::Finished(PathResult::NoPath);
            };
            let point = grid.point_at(ix);
            match grid.cell_at(ix).state {
                CellState::Visited => continue,
                CellState::End => {
                    grid.cell_at_mut(ix).parent = parent;
                    self.trail.push(point);
                    return Step::Finished(PathResult::Found(reconstruct_path(grid, ix)));
                }
                _ => {}
            }
            // The start is the only popped cell that cannot be marked
            let marked = grid.set_visited(point);
            if marked {
                grid.cell_at_mut(ix).parent = parent;
            }
            self.trail.push(point);
            for next in grid.neighbors_of(point) {
                if matches!(grid.state(next), CellState::Free | CellState::End) {
                    self.stack.push((grid.ix(next), Some(ix)));
                }
            }
            if marked {
                return Step::Continue(smallvec![point]);
            }
        }
    }
}
