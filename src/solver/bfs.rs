use grid_util::point::Point;
use smallvec::{smallvec, SmallVec};
use std::collections::VecDeque;

use super::{endpoints, reconstruct_path, PathResult};
use crate::error::RunRequestError;
use crate::grid::Grid;
use crate::step::{Step, Stepwise};

/// Breadth-first search. Cells are marked visited when first discovered, so on a unit-cost
/// grid the first time the end is seen is along a shortest path.
#[derive(Clone, Debug)]
pub struct Bfs {
    start: usize,
    end: usize,
    frontier: VecDeque<usize>,
    current: Option<usize>,
    /// Neighbours of `current` still to examine, reversed so that popping keeps direction order.
    pending: SmallVec<[Point; 4]>,
}

impl Bfs {
    pub fn new(grid: &mut Grid) -> Result<Bfs, RunRequestError> {
        let (start, end) = endpoints(grid)?;
        grid.cell_at_mut(start).source_distance = 0;
        Ok(Bfs {
            start,
            end,
            frontier: VecDeque::from([start]),
            current: None,
            pending: SmallVec::new(),
        })
    }
}

impl Stepwise for Bfs {
    type Output = PathResult;

    fn step(&mut self, grid: &mut Grid) -> Step<PathResult> {
        if self.start == self.end {
            return Step::Finished(PathResult::Found(vec![grid.point_at(self.start)]));
        }
        loop {
            if let Some(current) = self.current {
                while let Some(next) = self.pending.pop() {
                    let next_ix = grid.ix(next);
                    if next_ix == self.end {
                        grid.cell_at_mut(next_ix).parent = Some(current);
                        return Step::Finished(PathResult::Found(reconstruct_path(grid, next_ix)));
                    }
                    if grid.set_visited(next) {
                        let distance = grid.cell_at(current).source_distance.saturating_add(1);
                        let cell = grid.cell_at_mut(next_ix);
                        cell.source_distance = distance;
                        cell.parent = Some(current);
                        self.frontier.push_back(next_ix);
                        return Step::Continue(smallvec![next]);
                    }
                }
            }
            let Some(ix) = self.frontier.pop_front() else {
                return Step::Finished(PathResult::NoPath);
            };
            self.current = Some(ix);
            self.pending = grid
                .neighbors_of(grid.point_at(ix))
                .into_iter()
                .rev()
                .collect();
        }
    }
}
