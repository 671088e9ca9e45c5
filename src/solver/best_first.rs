//! Best-first search over the grid arena, shared by Dijkstra and A*. The two only differ in the
//! heuristic supplied by their [CostModel].
use grid_util::point::Point;
use smallvec::smallvec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{endpoints, reconstruct_path, PathResult};
use crate::error::RunRequestError;
use crate::grid::{CellState, Grid};
use crate::step::{Step, Stepwise};

/// Every move between adjacent cells costs the same.
pub const EDGE_COST: u32 = 1;

pub trait CostModel {
    /// Estimated remaining cost from `from` to `to`. Must never overestimate.
    fn heuristic(&self, from: Point, to: Point) -> u32;
}

/// Priority of a frontier entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrontierKey {
    /// f-score: cost so far plus heuristic.
    pub estimate: u32,
    /// g-score: cost so far.
    pub cost: u32,
    /// Insertion counter, making equal keys leave in FIFO order.
    pub seq: u64,
}

/// Orders frontier entries so that the entry to expand first compares [Ordering::Less]: lowest
/// estimate first, then lowest cost, then oldest.
pub fn compare_frontier(a: &FrontierKey, b: &FrontierKey) -> Ordering {
    a.estimate
        .cmp(&b.estimate)
        .then(a.cost.cmp(&b.cost))
        .then(a.seq.cmp(&b.seq))
}

#[derive(Clone, Debug)]
struct SmallestCostHolder {
    key: FrontierKey,
    index: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        compare_frontier(&self.key, &other.key) == Ordering::Equal
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the greatest element
        compare_frontier(&other.key, &self.key)
    }
}

#[derive(Clone, Debug)]
pub struct BestFirst<M> {
    model: M,
    start: usize,
    end: usize,
    goal: Point,
    to_see: BinaryHeap<SmallestCostHolder>,
    seq: u64,
}

impl<M: CostModel> BestFirst<M> {
    pub fn new(grid: &mut Grid, model: M) -> Result<BestFirst<M>, RunRequestError> {
        let (start, end) = endpoints(grid)?;
        let goal = grid.point_at(end);
        let estimate = model.heuristic(grid.point_at(start), goal);
        let cell = grid.cell_at_mut(start);
        cell.source_distance = 0;
        cell.target_distance = estimate;
        let mut search = BestFirst {
            model,
            start,
            end,
            goal,
            to_see: BinaryHeap::new(),
            seq: 0,
        };
        search.push(start, estimate, 0);
        Ok(search)
    }

    fn push(&mut self, index: usize, estimate: u32, cost: u32) {
        self.to_see.push(SmallestCostHolder {
            key: FrontierKey {
                estimate,
                cost,
                seq: self.seq,
            },
            index,
        });
        self.seq += 1;
    }
}

impl<M: CostModel> Stepwise for BestFirst<M> {
    type Output = PathResult;

    fn step(&mut self, grid: &mut Grid) -> Step<PathResult> {
        if self.start == self.end {
            return Step::Finished(PathResult::Found(vec![grid.point_at(self.start)]));
        }
        while let Some(SmallestCostHolder { key, index }) = self.to_see.pop() {
            let cell = grid.cell_at(index);
            // We may have inserted a cell several times into the heap if we found a better way
            // to reach it. Only the best entry is expanded.
            if key.cost > cell.source_distance || cell.state == CellState::Visited {
                continue;
            }
            if index == self.end {
                return Step::Finished(PathResult::Found(reconstruct_path(grid, index)));
            }
            let point = cell.position;
            let marked = grid.set_visited(point);
            for next in grid.neighbors_of(point) {
                if !matches!(grid.state(next), CellState::Free | CellState::End) {
                    continue;
                }
                let new_cost = key.cost + EDGE_COST;
                let next_ix = grid.ix(next);
                if new_cost < grid.cell_at(next_ix).source_distance {
                    let estimate = new_cost + self.model.heuristic(next, self.goal);
                    let successor = grid.cell_at_mut(next_ix);
                    successor.source_distance = new_cost;
                    successor.target_distance = estimate;
                    successor.parent = Some(index);
                    self.push(next_ix, estimate, new_cost);
                }
            }
            if marked {
                return Step::Continue(smallvec![point]);
            }
        }
        Step::Finished(PathResult::NoPath)
    }
}
