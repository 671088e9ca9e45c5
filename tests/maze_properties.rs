use grid_visualizer::grid::{position, CellState, Grid};
use grid_visualizer::maze::MazeAlgorithm;
use grid_visualizer::solver::SearchAlgorithm;
use rand::prelude::*;

/// Counts open cells and the edges between horizontally or vertically adjacent open cells.
fn open_graph(grid: &Grid) -> (usize, usize) {
    let side = grid.side();
    let open = |row: usize, col: usize| grid.state(position(row, col)) != CellState::Barrier;
    let mut nodes = 0;
    let mut edges = 0;
    for row in 0..side {
        for col in 0..side {
            if !open(row, col) {
                continue;
            }
            nodes += 1;
            if col + 1 < side && open(row, col + 1) {
                edges += 1;
            }
            if row + 1 < side && open(row + 1, col) {
                edges += 1;
            }
        }
    }
    (nodes, edges)
}

fn single_component(grid: &Grid) -> bool {
    let components = grid.generate_components();
    let mut open = grid
        .cells()
        .iter()
        .filter(|c| c.state != CellState::Barrier)
        .map(|c| grid.ix(c.position));
    let Some(first) = open.next() else {
        return true;
    };
    open.all(|ix| components.equiv(first, ix))
}

#[test]
fn carved_mazes_are_spanning_trees() {
    let mut rng = StdRng::seed_from_u64(0);
    for algorithm in [MazeAlgorithm::RecursiveBacktracker, MazeAlgorithm::Prims] {
        for side in [5, 9, 25, 45] {
            let mut grid = Grid::new(side);
            algorithm.generate(&mut grid, StdRng::seed_from_u64(rng.gen()));
            let (nodes, edges) = open_graph(&grid);
            assert!(nodes > 1, "{} on {side}", algorithm.label());
            assert!(single_component(&grid), "{} on {side}\n{grid}", algorithm.label());
            assert_eq!(edges, nodes - 1, "{} on {side}\n{grid}", algorithm.label());
        }
    }
}

#[test]
fn division_leaves_one_connected_maze() {
    for seed in 0..20 {
        let mut grid = Grid::new(25);
        grid.select_cell(position(1, 1));
        grid.select_cell(position(23, 23));
        MazeAlgorithm::RecursiveDivision.generate(&mut grid, StdRng::seed_from_u64(seed));
        assert!(single_component(&grid), "seed {seed}\n{grid}");
        for point in grid.border() {
            assert_eq!(grid.state(point), CellState::Barrier);
        }
        let result = SearchAlgorithm::AStar.solve(&mut grid).unwrap();
        assert!(result.is_found(), "seed {seed}");
    }
}

#[test]
fn mazes_overwrite_old_barriers() {
    let mut grid = Grid::new(25);
    grid.select_cell(position(0, 0));
    grid.select_cell(position(24, 24));
    for col in 0..25 {
        grid.select_cell(position(12, col));
    }
    grid.set_visited(position(3, 3));
    MazeAlgorithm::Prims.generate(&mut grid, StdRng::seed_from_u64(5));
    assert_eq!(grid.count(CellState::Visited), 0);
    assert_eq!(grid.start(), Some(position(0, 0)));
    assert_eq!(grid.end(), Some(position(24, 24)));
}

#[test]
fn same_seed_same_maze() {
    for algorithm in MazeAlgorithm::ALL {
        let mut a = Grid::new(25);
        let mut b = Grid::new(25);
        algorithm.generate(&mut a, StdRng::seed_from_u64(42));
        algorithm.generate(&mut b, StdRng::seed_from_u64(42));
        assert_eq!(a.to_string(), b.to_string(), "{}", algorithm.label());
    }
}

#[test]
fn endpoints_in_rooms_stay_connected() {
    for algorithm in [MazeAlgorithm::RecursiveBacktracker, MazeAlgorithm::Prims] {
        for seed in 0..200 {
            let mut grid = Grid::new(25);
            let (start, end) = (position(1, 1), position(23, 23));
            grid.select_cell(start);
            grid.select_cell(end);
            algorithm.generate(&mut grid, StdRng::seed_from_u64(seed));
            assert!(
                grid.reachable(start, end),
                "{} seed {seed}\n{grid}",
                algorithm.label()
            );
            let result = SearchAlgorithm::Bfs.solve(&mut grid).unwrap();
            assert!(result.is_found(), "{} seed {seed}", algorithm.label());
        }
    }
}
