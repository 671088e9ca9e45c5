//! The unit-of-work protocol shared by every search, maze generator and path trace.
//!
//! A [Stepwise] process never loops over the whole grid by itself: each call to
//! [Stepwise::step] performs at most one visible mutation and hands control back, so whoever
//! drives it can poll input, draw and pause between steps.
use core::time::Duration;
use grid_util::point::Point;
use smallvec::SmallVec;

use crate::grid::Grid;

/// Cells changed by a single step. Searches touch one cell, carving generators up to two.
pub type Touched = SmallVec<[Point; 2]>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step<T> {
    /// The process did one unit of work and wants to be called again.
    Continue(Touched),
    /// The process is done; it must not be stepped again.
    Finished(T),
}

pub trait Stepwise {
    type Output;

    fn step(&mut self, grid: &mut Grid) -> Step<Self::Output>;

    /// Delay to apply after an animated step, given the base delay of the current speed and grid
    /// size.
    fn pace(&self, base: Duration) -> Duration {
        base
    }
}

/// Steps `process` until it finishes, with no input polling, drawing or pausing in between.
pub fn run_to_completion<S: Stepwise>(process: &mut S, grid: &mut Grid) -> S::Output {
    loop {
        if let Step::Finished(output) = process.step(grid) {
            return output;
        }
    }
}
