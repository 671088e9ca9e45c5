use fxhash::FxHashSet;
use grid_util::point::Point;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use smallvec::SmallVec;

use crate::grid::{CellState, Grid, DIRECTIONS};
use crate::step::{Step, Stepwise, Touched};

#[derive(Clone, Debug)]
struct Frame {
    at: Point,
    /// Directions not yet tried from `at`, in shuffled order.
    untried: SmallVec<[(i32, i32); 4]>,
}

/// Randomised depth-first carving on a filled grid. Rooms sit on odd coordinates two cells
/// apart and the outer ring stays solid; every step knocks through one wall and the room behind
/// it. Backtracking happens on an explicit stack.
#[derive(Clone, Debug)]
pub struct Backtracker<R> {
    rng: R,
    side: i32,
    origin: Option<Point>,
    stack: Vec<Frame>,
    carved: FxHashSet<Point>,
}

impl<R: Rng> Backtracker<R> {
    /// Expects `grid` to be filled already. The origin is a random barrier room.
    pub fn new(grid: &Grid, mut rng: R) -> Backtracker<R> {
        let origin = grid
            .cells()
            .iter()
            .filter(|c| c.row() % 2 == 1 && c.col() % 2 == 1 && c.state == CellState::Barrier)
            .filter(|c| c.row() + 1 < grid.side() && c.col() + 1 < grid.side())
            .map(|c| c.position)
            .choose(&mut rng);
        Backtracker {
            rng,
            side: grid.side() as i32,
            origin,
            stack: Vec::new(),
            carved: FxHashSet::default(),
        }
    }

    fn interior(&self, point: Point) -> bool {
        (1..self.side - 1).contains(&point.x) && (1..self.side - 1).contains(&point.y)
    }

    fn enter(&mut self, at: Point) {
        let mut untried = SmallVec::from_buf(DIRECTIONS);
        untried.shuffle(&mut self.rng);
        self.carved.insert(at);
        self.stack.push(Frame { at, untried });
    }
}

impl<R: Rng> Stepwise for Backtracker<R> {
    type Output = ();

    fn step(&mut self, grid: &mut Grid) -> Step<()> {
        let mut touched = Touched::new();
        if let Some(origin) = self.origin.take() {
            self.enter(origin);
            if grid.set_free(origin) {
                touched.push(origin);
            }
            return Step::Continue(touched);
        }
        loop {
            let Some(frame) = self.stack.last_mut() else {
                return Step::Finished(());
            };
            let Some((dx, dy)) = frame.untried.pop() else {
                self.stack.pop();
                continue;
            };
            let at = frame.at;
            let far = Point::new(at.x + 2 * dx, at.y + 2 * dy);
            if !self.interior(far) || self.carved.contains(&far) {
                continue;
            }
            let link = Point::new(at.x + dx, at.y + dy);
            for point in [link, far] {
                if grid.set_free(point) {
                    touched.push(point);
                }
            }
            self.enter(far);
            return Step::Continue(touched);
        }
    }
}
