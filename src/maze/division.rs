//! Recursive division. The border goes up first, then each open region is cut by a wall on an
//! even row or column with a single gap on an odd coordinate, and both halves are divided again.
//! Regions wait on an explicit stack, so deep divisions never recurse.
use core::time::Duration;
use grid_util::point::Point;
use rand::Rng;
use smallvec::smallvec;
use std::cmp::Ordering;
use std::collections::VecDeque;

use super::pick_with_parity;
use crate::grid::{position, Grid};
use crate::step::{Step, Stepwise, Touched};

/// Inclusive bounds of a region still to be divided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Region {
    top: i32,
    bottom: i32,
    left: i32,
    right: i32,
}

#[derive(Clone, Debug)]
pub struct RecursiveDivision<R> {
    rng: R,
    /// Border cells still to raise, in reverse order.
    border: Vec<Point>,
    regions: Vec<Region>,
    /// Cells of the wall currently being raised. The gap is never queued.
    wall: VecDeque<Point>,
    on_border: bool,
}

impl<R: Rng> RecursiveDivision<R> {
    pub fn new(grid: &Grid, rng: R) -> RecursiveDivision<R> {
        let mut border = grid.border();
        border.reverse();
        let last = grid.side() as i32 - 2;
        let mut regions = Vec::new();
        if last >= 1 {
            regions.push(Region {
                top: 1,
                bottom: last,
                left: 1,
                right: last,
            });
        }
        RecursiveDivision {
            rng,
            border,
            regions,
            wall: VecDeque::new(),
            on_border: false,
        }
    }

    fn divide(&mut self, region: Region) {
        let Region {
            top,
            bottom,
            left,
            right,
        } = region;
        let horizontal = match (right - left).cmp(&(bottom - top)) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.rng.gen(),
        };
        if horizontal {
            let Some(row) = pick_with_parity(&mut self.rng, top, bottom, 0) else {
                return;
            };
            let Some(gap) = pick_with_parity(&mut self.rng, left, right, 1) else {
                return;
            };
            self.wall.extend(
                (left..=right)
                    .filter(|&col| col != gap)
                    .map(|col| position(row as usize, col as usize)),
            );
            // The upper half is divided first
            self.regions.push(Region { top: row + 1, ..region });
            self.regions.push(Region { bottom: row - 1, ..region });
        } else {
            let Some(col) = pick_with_parity(&mut self.rng, left, right, 0) else {
                return;
            };
            let Some(gap) = pick_with_parity(&mut self.rng, top, bottom, 1) else {
                return;
            };
            self.wall.extend(
                (top..=bottom)
                    .filter(|&row| row != gap)
                    .map(|row| position(row as usize, col as usize)),
            );
            self.regions.push(Region { left: col + 1, ..region });
            self.regions.push(Region { right: col - 1, ..region });
        }
    }
}

impl<R: Rng> Stepwise for RecursiveDivision<R> {
    type Output = ();

    fn step(&mut self, grid: &mut Grid) -> Step<()> {
        if let Some(point) = self.border.pop() {
            self.on_border = true;
            return Step::Continue(raise(grid, point));
        }
        self.on_border = false;
        loop {
            if let Some(point) = self.wall.pop_front() {
                return Step::Continue(raise(grid, point));
            }
            match self.regions.pop() {
                Some(region) => self.divide(region),
                None => return Step::Finished(()),
            }
        }
    }

    /// The border is drawn at half speed.
    fn pace(&self, base: Duration) -> Duration {
        if self.on_border {
            base * 2
        } else {
            base
        }
    }
}

fn raise(grid: &mut Grid, point: Point) -> Touched {
    if grid.set_barrier(point) {
        smallvec![point]
    } else {
        Touched::new()
    }
}
