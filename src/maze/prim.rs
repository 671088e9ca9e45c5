use fxhash::{FxBuildHasher, FxHashSet};
use grid_util::point::Point;
use indexmap::IndexSet;
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::grid::{CellState, Grid, DIRECTIONS};
use crate::step::{Step, Stepwise, Touched};

type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Randomised Prim's algorithm on a filled grid. Rooms sit on odd coordinates two cells apart.
/// The frontier holds `(link, candidate)` pairs where `candidate` is an uncarved room next to a
/// carved one and `link` the wall between them. Each step carves one randomly chosen candidate.
/// Rooms holding the start or end are carved through without changing their state.
#[derive(Clone, Debug)]
pub struct Prims<R> {
    rng: R,
    frontier: FxIndexSet<(Point, Point)>,
    carved: FxHashSet<Point>,
}

fn carvable(state: CellState) -> bool {
    matches!(state, CellState::Barrier | CellState::Start | CellState::End)
}

impl<R: Rng> Prims<R> {
    /// Expects `grid` to be filled already. Carving starts from a random room.
    pub fn new(grid: &Grid, mut rng: R) -> Prims<R> {
        let mut frontier = FxIndexSet::default();
        let origin = grid
            .cells()
            .iter()
            .filter(|c| c.row() % 2 == 1 && c.col() % 2 == 1 && carvable(c.state))
            .map(|c| c.position)
            .choose(&mut rng);
        if let Some(origin) = origin {
            frontier.insert((origin, origin));
        }
        Prims {
            rng,
            frontier,
            carved: FxHashSet::default(),
        }
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    fn open_room(&self, grid: &Grid, point: Point) -> bool {
        grid.in_bounds(point) && !self.carved.contains(&point) && carvable(grid.state(point))
    }
}

impl<R: Rng> Stepwise for Prims<R> {
    type Output = ();

    fn step(&mut self, grid: &mut Grid) -> Step<()> {
        while !self.frontier.is_empty() {
            let pick = self.rng.gen_range(0..self.frontier.len());
            let Some((link, candidate)) = self.frontier.swap_remove_index(pick) else {
                break;
            };
            if !self.open_room(grid, candidate) {
                continue;
            }
            self.carved.insert(candidate);
            let mut touched = Touched::new();
            for point in [candidate, link] {
                if grid.set_free(point) {
                    touched.push(point);
                }
            }
            for (dx, dy) in DIRECTIONS {
                let far = Point::new(candidate.x + 2 * dx, candidate.y + 2 * dy);
                if self.open_room(grid, far) {
                    let wall = Point::new(candidate.x + dx, candidate.y + dy);
                    self.frontier.insert((wall, far));
                }
            }
            return Step::Continue(touched);
        }
        Step::Finished(())
    }
}
