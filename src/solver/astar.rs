use grid_util::point::Point;

use super::best_first::{CostModel, EDGE_COST};

/// Number of straight moves between two cells on a 4-neighbourhood grid.
pub fn manhattan_distance(a: Point, b: Point) -> u32 {
    (a.x - b.x).unsigned_abs() + (a.y - b.y).unsigned_abs()
}

/// A* with the Manhattan distance, which is admissible and consistent when only straight unit
/// moves are allowed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

impl CostModel for Manhattan {
    fn heuristic(&self, from: Point, to: Point) -> u32 {
        manhattan_distance(from, to) * EDGE_COST
    }
}
