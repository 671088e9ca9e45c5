/// Fuzzes the searches by checking on many random grids that a path is found exactly when the end
/// is in the same connected component as the start, and that the shortest-path searches agree.
use grid_util::point::Point;
use grid_visualizer::grid::{position, CellState, Grid};
use grid_visualizer::solver::astar::manhattan_distance;
use grid_visualizer::solver::SearchAlgorithm;
use rand::prelude::*;

fn random_grid(n: usize, rng: &mut StdRng, start: Point, end: Point) -> Grid {
    let mut grid = Grid::new(n);
    for row in 0..n {
        for col in 0..n {
            if rng.gen_bool(0.35) {
                grid.set_barrier(position(row, col));
            }
        }
    }
    grid.select_cell(start);
    grid.select_cell(end);
    grid
}

fn visualize_grid(grid: &Grid) {
    print!("{grid}");
}

/// Checks that `path` walks from start to end over open, adjacent cells.
fn assert_valid_path(grid: &Grid, path: &[Point], start: Point, end: Point) {
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&end));
    for pair in path.windows(2) {
        assert_eq!(manhattan_distance(pair[0], pair[1]), 1, "{pair:?}");
    }
    for &p in path {
        assert_ne!(grid.state(p), CellState::Barrier, "{p}");
    }
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 5000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = position(0, 0);
    let end = position(N - 1, N - 1);
    for _ in 0..N_GRIDS {
        let random_grid = random_grid(N, &mut rng, start, end);
        let reachable = random_grid.reachable(start, end);
        for algorithm in SearchAlgorithm::ALL {
            let mut grid = random_grid.clone();
            let result = algorithm.solve(&mut grid).unwrap();
            // Show the grid if the search disagrees with the components
            if result.is_found() != reachable {
                visualize_grid(&random_grid);
            }
            assert_eq!(result.is_found(), reachable, "{}", algorithm.label());
            if let Some(path) = result.path() {
                assert_valid_path(&grid, path, start, end);
            }
        }
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 8;
    const N_GRIDS: usize = 5000;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let start = position(rng.gen_range(0..N), rng.gen_range(0..N));
        let end = position(rng.gen_range(0..N), rng.gen_range(0..N));
        let random_grid = random_grid(N, &mut rng, start, end);
        if start == end || !random_grid.reachable(start, end) {
            continue;
        }
        let mut lengths = vec![];
        let mut visited = vec![];
        for algorithm in [
            SearchAlgorithm::Bfs,
            SearchAlgorithm::Dijkstra,
            SearchAlgorithm::AStar,
        ] {
            let mut grid = random_grid.clone();
            let result = algorithm.solve(&mut grid).unwrap();
            lengths.push(result.path().map(|p| p.len()));
            visited.push(grid.count(CellState::Visited));
        }
        if lengths[0] != lengths[1] || lengths[1] != lengths[2] {
            println!("BFS/Dijkstra/A* lengths: {lengths:?}");
            visualize_grid(&random_grid);
        }
        assert!(lengths[0] == lengths[1] && lengths[1] == lengths[2]);
        assert!(visited[2] <= visited[1], "A* {} > Dijkstra {}", visited[2], visited[1]);
    }
}

#[test]
fn open_grid_paths_follow_manhattan_distance() {
    const N: usize = 12;
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..500 {
        let start = position(rng.gen_range(0..N), rng.gen_range(0..N));
        let end = position(rng.gen_range(0..N), rng.gen_range(0..N));
        if start == end {
            continue;
        }
        let mut grid = Grid::new(N);
        grid.select_cell(start);
        grid.select_cell(end);
        let result = SearchAlgorithm::Bfs.solve(&mut grid).unwrap();
        let path = result.path().unwrap();
        assert_eq!(path.len() as u32 - 1, manhattan_distance(start, end));
    }
}
