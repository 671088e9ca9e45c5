use grid_util::point::Point;

use super::best_first::CostModel;

/// Dijkstra's algorithm is best-first search without any estimate of the remaining distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uniform;

impl CostModel for Uniform {
    fn heuristic(&self, _: Point, _: Point) -> u32 {
        0
    }
}
