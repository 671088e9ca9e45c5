//! Maze generators. Each one is a [Stepwise] process that only ever flips cells between free and
//! barrier, so the start and end survive generation.
use core::time::Duration;
use rand::Rng;

use crate::grid::Grid;
use crate::step::{run_to_completion, Step, Stepwise};

pub mod backtracker;
pub mod division;
pub mod prim;
pub mod random;

use backtracker::Backtracker;
use division::RecursiveDivision;
use prim::Prims;
use random::RandomMaze;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MazeAlgorithm {
    Random,
    RecursiveDivision,
    RecursiveBacktracker,
    Prims,
}

impl MazeAlgorithm {
    pub const ALL: [MazeAlgorithm; 4] = [
        MazeAlgorithm::Random,
        MazeAlgorithm::RecursiveDivision,
        MazeAlgorithm::RecursiveBacktracker,
        MazeAlgorithm::Prims,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MazeAlgorithm::Random => "Random",
            MazeAlgorithm::RecursiveDivision => "Recursive Division",
            MazeAlgorithm::RecursiveBacktracker => "Recursive Backtracker",
            MazeAlgorithm::Prims => "Prim's",
        }
    }

    /// Clears the grid (barriers included) and prepares a step-wise generator for it. Carving
    /// generators start from a completely filled grid.
    pub fn generator<R: Rng>(self, grid: &mut Grid, rng: R) -> MazeGenerator<R> {
        grid.clear(false);
        match self {
            MazeAlgorithm::Random => MazeGenerator::Random(RandomMaze::new(rng)),
            MazeAlgorithm::RecursiveDivision => {
                MazeGenerator::Division(RecursiveDivision::new(grid, rng))
            }
            MazeAlgorithm::RecursiveBacktracker => {
                grid.fill();
                MazeGenerator::Backtracker(Backtracker::new(grid, rng))
            }
            MazeAlgorithm::Prims => {
                grid.fill();
                MazeGenerator::Prims(Prims::new(grid, rng))
            }
        }
    }

    /// Generates the whole maze at once.
    pub fn generate<R: Rng>(self, grid: &mut Grid, rng: R) {
        let mut generator = self.generator(grid, rng);
        run_to_completion(&mut generator, grid)
    }
}

#[derive(Clone, Debug)]
pub enum MazeGenerator<R> {
    Random(RandomMaze<R>),
    Division(RecursiveDivision<R>),
    Backtracker(Backtracker<R>),
    Prims(Prims<R>),
}

impl<R: Rng> Stepwise for MazeGenerator<R> {
    type Output = ();

    fn step(&mut self, grid: &mut Grid) -> Step<()> {
        match self {
            MazeGenerator::Random(generator) => generator.step(grid),
            MazeGenerator::Division(generator) => generator.step(grid),
            MazeGenerator::Backtracker(generator) => generator.step(grid),
            MazeGenerator::Prims(generator) => generator.step(grid),
        }
    }

    fn pace(&self, base: Duration) -> Duration {
        match self {
            MazeGenerator::Division(generator) => generator.pace(base),
            _ => base,
        }
    }
}

/// Picks a uniformly random coordinate in `lo..=hi` whose parity matches `parity`.
pub(crate) fn pick_with_parity<R: Rng>(rng: &mut R, lo: i32, hi: i32, parity: i32) -> Option<i32> {
    let first = lo + (lo - parity).rem_euclid(2);
    if first > hi {
        return None;
    }
    let choices = (hi - first) / 2 + 1;
    Some(first + 2 * rng.gen_range(0..choices))
}
