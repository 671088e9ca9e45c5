use grid_util::point::Point;

use crate::error::RunRequestError;
use crate::grid::Grid;
use crate::step::{run_to_completion, Step, Stepwise};

pub mod astar;
pub mod best_first;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;

use astar::Manhattan;
use best_first::BestFirst;
use bfs::Bfs;
use dfs::Dfs;
use dijkstra::Uniform;

/// Outcome of a search that ran to the end. Not finding a path is an ordinary result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathResult {
    /// Cells from start to end, both included.
    Found(Vec<Point>),
    NoPath,
}

impl PathResult {
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            PathResult::Found(path) => Some(path),
            PathResult::NoPath => None,
        }
    }
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchAlgorithm {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
}

impl SearchAlgorithm {
    pub const ALL: [SearchAlgorithm; 4] = [
        SearchAlgorithm::Bfs,
        SearchAlgorithm::Dfs,
        SearchAlgorithm::Dijkstra,
        SearchAlgorithm::AStar,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SearchAlgorithm::Bfs => "BFS",
            SearchAlgorithm::Dfs => "DFS",
            SearchAlgorithm::Dijkstra => "Dijkstra",
            SearchAlgorithm::AStar => "A*",
        }
    }

    /// Seeds a step-wise search from the grid's start towards its end.
    pub fn searcher(self, grid: &mut Grid) -> Result<Search, RunRequestError> {
        Ok(match self {
            SearchAlgorithm::Bfs => Search::Bfs(Bfs::new(grid)?),
            SearchAlgorithm::Dfs => Search::Dfs(Dfs::new(grid)?),
            SearchAlgorithm::Dijkstra => Search::Dijkstra(BestFirst::new(grid, Uniform)?),
            SearchAlgorithm::AStar => Search::AStar(BestFirst::new(grid, Manhattan)?),
        })
    }

    /// Runs the whole search at once, marking visited cells on the way.
    pub fn solve(self, grid: &mut Grid) -> Result<PathResult, RunRequestError> {
        let mut search = self.searcher(grid)?;
        Ok(run_to_completion(&mut search, grid))
    }
}

/// One in-flight search of any kind.
#[derive(Clone, Debug)]
pub enum Search {
    Bfs(Bfs),
    Dfs(Dfs),
    Dijkstra(BestFirst<Uniform>),
    AStar(BestFirst<Manhattan>),
}

impl Stepwise for Search {
    type Output = PathResult;

    fn step(&mut self, grid: &mut Grid) -> Step<PathResult> {
        match self {
            Search::Bfs(search) => search.step(grid),
            Search::Dfs(search) => search.step(grid),
            Search::Dijkstra(search) => search.step(grid),
            Search::AStar(search) => search.step(grid),
        }
    }
}

pub(crate) fn endpoints(grid: &Grid) -> Result<(usize, usize), RunRequestError> {
    let start = grid.start().ok_or(RunRequestError::MissingStart)?;
    let end = grid.end().ok_or(RunRequestError::MissingEnd)?;
    Ok((grid.ix(start), grid.ix(end)))
}

/// Walks the parent chain back from `end` and returns it in start-to-end order.
pub(crate) fn reconstruct_path(grid: &Grid, end: usize) -> Vec<Point> {
    let mut path: Vec<Point> = std::iter::successors(Some(end), |&ix| grid.cell_at(ix).parent)
        .map(|ix| grid.point_at(ix))
        .collect();
    path.reverse();
    path
}
