use core::fmt;
use grid_util::point::Point;
use itertools::iproduct;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Distance value of a cell that no search has reached yet.
pub const UNREACHED: u32 = u32::MAX;

/// Neighbour offsets as `(dx, dy)` in East, South, West, North order. Traversal order of every
/// search depends on it.
pub const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Builds the [Point] of the cell at `(row, col)`. Columns map to `x` and rows to `y`.
pub fn position(row: usize, col: usize) -> Point {
    Point::new(col as i32, row as i32)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellState {
    Free,
    Start,
    End,
    Barrier,
    Visited,
    Path,
}

impl CellState {
    pub fn symbol(self) -> char {
        match self {
            CellState::Free => '.',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Barrier => '#',
            CellState::Visited => 'o',
            CellState::Path => '*',
        }
    }
}

/// A single grid position together with the bookkeeping the searches keep on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub position: Point,
    pub state: CellState,
    /// g-score: cost of the best known route from the start.
    pub source_distance: u32,
    /// f-score: g-score plus the heuristic estimate to the end.
    pub target_distance: u32,
    /// Arena index of the cell this one was discovered from.
    pub parent: Option<usize>,
}

impl Cell {
    fn new(position: Point) -> Cell {
        Cell {
            position,
            state: CellState::Free,
            source_distance: UNREACHED,
            target_distance: UNREACHED,
            parent: None,
        }
    }
    pub fn row(&self) -> usize {
        self.position.y as usize
    }
    pub fn col(&self) -> usize {
        self.position.x as usize
    }
    fn reset_bookkeeping(&mut self) {
        self.source_distance = UNREACHED;
        self.target_distance = UNREACHED;
        self.parent = None;
    }
}

/// The three supported grid densities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GridSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl GridSize {
    pub const ALL: [GridSize; 3] = [GridSize::Small, GridSize::Medium, GridSize::Large];

    pub fn side(self) -> usize {
        match self {
            GridSize::Small => 25,
            GridSize::Medium => 45,
            GridSize::Large => 75,
        }
    }
    pub fn from_side(side: usize) -> Option<GridSize> {
        GridSize::ALL.into_iter().find(|size| size.side() == side)
    }
}

/// Immutable description of a grid. Changing the size means building a new [Grid] from a new
/// config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridConfig {
    pub size: GridSize,
    pub gridlines: bool,
}

impl GridConfig {
    pub fn new(size: GridSize, gridlines: bool) -> GridConfig {
        GridConfig { size, gridlines }
    }
}

/// [Grid] owns every [Cell] in a flat arena indexed by `row * side + col` and keeps weak
/// references (indices) to the start and end cells.
#[derive(Clone, Debug)]
pub struct Grid {
    side: usize,
    cells: Vec<Cell>,
    start: Option<usize>,
    end: Option<usize>,
    gridlines_visible: bool,
}

impl Grid {
    /// Creates a grid of `side * side` free cells.
    pub fn new(side: usize) -> Grid {
        let cells = iproduct!(0..side, 0..side)
            .map(|(row, col)| Cell::new(position(row, col)))
            .collect();
        Grid {
            side,
            cells,
            start: None,
            end: None,
            gridlines_visible: false,
        }
    }
    pub fn from_config(config: GridConfig) -> Grid {
        let mut grid = Grid::new(config.size.side());
        grid.gridlines_visible = config.gridlines;
        grid
    }

    pub fn side(&self) -> usize {
        self.side
    }
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    pub fn gridlines_visible(&self) -> bool {
        self.gridlines_visible
    }
    pub fn toggle_gridlines(&mut self) {
        self.gridlines_visible = !self.gridlines_visible;
    }
    pub fn start(&self) -> Option<Point> {
        self.start.map(|ix| self.cells[ix].position)
    }
    pub fn end(&self) -> Option<Point> {
        self.end.map(|ix| self.cells[ix].position)
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.side
            && (point.y as usize) < self.side
    }
    /// Arena index of an in-bounds point. Panics for points off the grid.
    pub fn ix(&self, point: Point) -> usize {
        assert!(self.in_bounds(point), "{} is out of bounds", point);
        point.y as usize * self.side + point.x as usize
    }
    pub fn point_at(&self, ix: usize) -> Point {
        self.cells[ix].position
    }
    pub fn get(&self, point: Point) -> Option<&Cell> {
        if self.in_bounds(point) {
            Some(&self.cells[self.ix(point)])
        } else {
            None
        }
    }
    /// Panics if `point` lies outside the grid, like slice indexing.
    pub fn cell(&self, point: Point) -> &Cell {
        &self.cells[self.ix(point)]
    }
    pub fn cell_mut(&mut self, point: Point) -> &mut Cell {
        let ix = self.ix(point);
        &mut self.cells[ix]
    }
    pub fn cell_at(&self, ix: usize) -> &Cell {
        &self.cells[ix]
    }
    pub fn cell_at_mut(&mut self, ix: usize) -> &mut Cell {
        &mut self.cells[ix]
    }
    pub fn state(&self, point: Point) -> CellState {
        self.cell(point).state
    }
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }

    /// Applies the click selection rule: the first selected cell becomes the start, the next
    /// distinct one the end, and every further free cell a barrier. Points off the grid are
    /// ignored.
    pub fn select_cell(&mut self, point: Point) {
        if !self.in_bounds(point) {
            return;
        }
        let ix = self.ix(point);
        if self.start.is_none() {
            if self.end == Some(ix) {
                self.end = None;
            }
            self.start = Some(ix);
            self.cells[ix].state = CellState::Start;
        } else if self.end.is_none() && self.start != Some(ix) {
            self.end = Some(ix);
            self.cells[ix].state = CellState::End;
        } else {
            self.set_barrier(point);
        }
    }
    /// Frees a cell whatever it held, dropping the start or end reference if it pointed here.
    pub fn deselect_cell(&mut self, point: Point) {
        if !self.in_bounds(point) {
            return;
        }
        let ix = self.ix(point);
        if self.start == Some(ix) {
            self.start = None;
        } else if self.end == Some(ix) {
            self.end = None;
        }
        let cell = &mut self.cells[ix];
        cell.state = CellState::Free;
        cell.reset_bookkeeping();
    }

    /// Turns a free cell into a barrier. Returns whether the cell changed.
    pub fn set_barrier(&mut self, point: Point) -> bool {
        self.transition(point, &[CellState::Free], CellState::Barrier)
    }
    /// Carves a barrier, visited or path cell back to free. Start and end are left alone.
    pub fn set_free(&mut self, point: Point) -> bool {
        self.transition(
            point,
            &[CellState::Barrier, CellState::Visited, CellState::Path],
            CellState::Free,
        )
    }
    pub fn set_visited(&mut self, point: Point) -> bool {
        self.transition(point, &[CellState::Free], CellState::Visited)
    }
    pub fn set_path(&mut self, point: Point) -> bool {
        self.transition(
            point,
            &[CellState::Free, CellState::Visited],
            CellState::Path,
        )
    }
    fn transition(&mut self, point: Point, from: &[CellState], to: CellState) -> bool {
        let cell = self.cell_mut(point);
        if from.contains(&cell.state) {
            cell.state = to;
            true
        } else {
            false
        }
    }

    /// Resets search bookkeeping everywhere and frees visited and path cells. Barriers survive
    /// only if `keep_barriers` is set; start and end always survive.
    pub fn clear(&mut self, keep_barriers: bool) {
        for cell in &mut self.cells {
            let keep = match cell.state {
                CellState::Start | CellState::End => true,
                CellState::Barrier => keep_barriers,
                _ => false,
            };
            if !keep {
                cell.state = CellState::Free;
            }
            cell.reset_bookkeeping();
        }
    }
    /// Turns every free cell into a barrier.
    pub fn fill(&mut self) {
        for cell in &mut self.cells {
            if cell.state == CellState::Free {
                cell.state = CellState::Barrier;
            }
        }
    }
    /// The outer ring of the grid, walked row by row.
    pub fn border(&self) -> Vec<Point> {
        let last = self.side.saturating_sub(1);
        iproduct!(0..self.side, 0..self.side)
            .filter(|&(row, col)| row == 0 || col == 0 || row == last || col == last)
            .map(|(row, col)| position(row, col))
            .collect()
    }
    pub fn add_border(&mut self) {
        for point in self.border() {
            self.set_barrier(point);
        }
    }

    /// The in-bounds, non-barrier cells adjacent to `point`, in [DIRECTIONS] order.
    pub fn neighbors_of(&self, point: Point) -> SmallVec<[Point; 4]> {
        DIRECTIONS
            .iter()
            .map(|&(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|&n| self.in_bounds(n) && self.state(n) != CellState::Barrier)
            .collect()
    }

    /// Generates a new [UnionFind] structure and links up non-barrier neighbours to the same
    /// components.
    pub fn generate_components(&self) -> UnionFind<usize> {
        let mut components = UnionFind::new(self.cells.len());
        for (row, col) in iproduct!(0..self.side, 0..self.side) {
            let point = position(row, col);
            if self.state(point) == CellState::Barrier {
                continue;
            }
            let ix = self.ix(point);
            for next in [Point::new(point.x + 1, point.y), Point::new(point.x, point.y + 1)] {
                if self.in_bounds(next) && self.state(next) != CellState::Barrier {
                    components.union(ix, self.ix(next));
                }
            }
        }
        components
    }
    /// Checks if a barrier-free route joins `a` and `b`.
    pub fn reachable(&self, a: Point, b: Point) -> bool {
        let open = |p: Point| self.in_bounds(p) && self.state(p) != CellState::Barrier;
        if !open(a) || !open(b) {
            return false;
        }
        self.generate_components().equiv(self.ix(a), self.ix(b))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.side.max(1)) {
            let line: String = row.iter().map(|c| c.state.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_cycle() {
        let mut grid = Grid::new(3);
        let (a, b, c) = (position(0, 0), position(0, 1), position(0, 2));
        grid.select_cell(a);
        grid.select_cell(a);
        assert_eq!(grid.state(a), CellState::Start);
        assert_eq!(grid.end(), None);
        grid.select_cell(b);
        grid.select_cell(c);
        assert_eq!(grid.start(), Some(a));
        assert_eq!(grid.end(), Some(b));
        assert_eq!(grid.state(c), CellState::Barrier);
        // Start and end are never overwritten by further clicks
        grid.select_cell(b);
        assert_eq!(grid.state(b), CellState::End);
        assert_eq!(grid.count(CellState::Start), 1);
        assert_eq!(grid.count(CellState::End), 1);
    }

    #[test]
    fn selection_off_the_grid_is_ignored() {
        let mut grid = Grid::new(25);
        // Would land on (1, 5) if the column wrapped into the next row
        grid.select_cell(Point::new(30, 0));
        grid.select_cell(Point::new(-1, 3));
        assert_eq!(grid.start(), None);
        assert_eq!(grid.count(CellState::Free), 625);
        grid.select_cell(position(1, 5));
        grid.deselect_cell(Point::new(30, 0));
        assert_eq!(grid.start(), Some(position(1, 5)));
    }

    #[test]
    #[should_panic]
    fn indexing_off_the_grid_panics() {
        Grid::new(25).ix(Point::new(30, 0));
    }

    #[test]
    fn deselect_drops_references() {
        let mut grid = Grid::new(3);
        let (a, b) = (position(1, 1), position(2, 2));
        grid.select_cell(a);
        grid.select_cell(b);
        grid.deselect_cell(a);
        assert_eq!(grid.start(), None);
        assert_eq!(grid.state(a), CellState::Free);
        // The freed start slot is filled before anything else
        grid.select_cell(position(0, 0));
        assert_eq!(grid.start(), Some(position(0, 0)));
        assert_eq!(grid.end(), Some(b));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut grid = Grid::new(4);
        grid.select_cell(position(0, 0));
        grid.select_cell(position(3, 3));
        grid.select_cell(position(1, 1));
        grid.set_visited(position(2, 2));
        grid.set_path(position(2, 1));
        grid.cell_mut(position(0, 0)).source_distance = 0;

        grid.clear(true);
        assert_eq!(grid.count(CellState::Barrier), 1);
        assert_eq!(grid.count(CellState::Visited), 0);
        assert_eq!(grid.count(CellState::Path), 0);
        assert_eq!(grid.cell(position(0, 0)).source_distance, UNREACHED);

        grid.clear(false);
        let once = grid.to_string();
        grid.clear(false);
        assert_eq!(once, grid.to_string());
        assert_eq!(grid.count(CellState::Free), 14);
        assert_eq!(grid.start(), Some(position(0, 0)));
        assert_eq!(grid.end(), Some(position(3, 3)));
    }

    #[test]
    fn fill_and_border_keep_endpoints() {
        let mut grid = Grid::new(5);
        grid.select_cell(position(0, 2));
        grid.select_cell(position(2, 2));
        grid.add_border();
        assert_eq!(grid.count(CellState::Barrier), 15);
        assert_eq!(grid.state(position(0, 2)), CellState::Start);
        grid.fill();
        assert_eq!(grid.count(CellState::Barrier), 23);
        assert_eq!(grid.state(position(2, 2)), CellState::End);
    }

    #[test]
    fn neighbour_order_and_barriers() {
        let mut grid = Grid::new(3);
        let centre = position(1, 1);
        let expected = [position(1, 2), position(2, 1), position(1, 0), position(0, 1)];
        assert_eq!(grid.neighbors_of(centre).as_slice(), &expected);
        grid.set_barrier(position(2, 1));
        assert_eq!(
            grid.neighbors_of(centre).as_slice(),
            &[position(1, 2), position(1, 0), position(0, 1)]
        );
        assert_eq!(
            grid.neighbors_of(position(0, 0)).as_slice(),
            &[position(0, 1), position(1, 0)]
        );
    }

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // |.#.|
        // |.#.|
        let mut grid = Grid::new(3);
        for row in 0..3 {
            grid.set_barrier(position(row, 1));
        }
        assert!(grid.reachable(position(0, 0), position(2, 0)));
        assert!(!grid.reachable(position(0, 0), position(0, 2)));
        assert!(!grid.reachable(position(0, 0), position(1, 1)));
        grid.set_free(position(2, 1));
        assert!(grid.reachable(position(0, 0), position(0, 2)));
    }

    #[test]
    fn sizes_round_trip() {
        for size in GridSize::ALL {
            assert_eq!(GridSize::from_side(size.side()), Some(size));
            let grid = Grid::from_config(GridConfig::new(size, true));
            assert_eq!(grid.cells().len(), size.side() * size.side());
            assert!(grid.gridlines_visible());
        }
        assert_eq!(GridSize::from_side(30), None);
    }
}
