//! Drives a session from a script and prints the grid to the terminal: a maze is generated, the
//! endpoints are placed in two of its rooms and A* searches between them.
use grid_util::point::Point;
use grid_visualizer::host::{ScriptedInput, ThreadPacer};
use grid_visualizer::maze::MazeAlgorithm;
use grid_visualizer::session::RunOutcome;
use grid_visualizer::{
    Grid, GridSize, Host, InputEvent, MouseButton, Renderer, SearchAlgorithm, SessionCommand,
    SessionControl, Settings, Speed, VisualizerSession,
};

/// Prints the whole grid whenever a full redraw is presented and only counts single cells.
#[derive(Default)]
struct TerminalRenderer {
    snapshot: Option<String>,
    cells_drawn: usize,
}

impl Renderer for TerminalRenderer {
    fn draw_cell(&mut self, _grid: &Grid, _point: Point) {
        self.cells_drawn += 1;
    }
    fn draw_grid(&mut self, grid: &Grid) {
        self.snapshot = Some(grid.to_string());
    }
    fn present_frame(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            println!("{snapshot}");
        }
    }
    fn show_no_path(&mut self) {
        println!("No path found");
    }
}

type TerminalHost = Host<ScriptedInput, TerminalRenderer, ThreadPacer>;

fn play(session: &mut VisualizerSession, host: &mut TerminalHost, frames: Vec<Vec<InputEvent>>) {
    host.input = ScriptedInput::new(frames);
    while !host.input.is_exhausted() || session.is_running() {
        if session.frame(host) == SessionControl::Quit {
            return;
        }
    }
}

fn main() {
    let settings = Settings {
        size: GridSize::Small,
        gridlines: false,
        speed: Speed::Fast,
    };
    let mut session = VisualizerSession::new(settings);
    let mut host = Host::new(
        ScriptedInput::default(),
        TerminalRenderer::default(),
        ThreadPacer,
    );

    play(
        &mut session,
        &mut host,
        vec![vec![
            InputEvent::Command(SessionCommand::GenerateMaze(
                MazeAlgorithm::RecursiveBacktracker,
            )),
            InputEvent::SkipAnimation,
        ]],
    );
    let click = |row, col| InputEvent::CellClicked {
        row,
        col,
        button: MouseButton::Left,
    };
    play(
        &mut session,
        &mut host,
        vec![vec![
            click(1, 1),
            click(23, 23),
            InputEvent::Command(SessionCommand::SelectAlgorithm(SearchAlgorithm::AStar)),
            InputEvent::Command(SessionCommand::Run),
        ]],
    );

    match session.last_outcome() {
        Some(RunOutcome::PathFound(path)) => println!("Path of {} cells", path.len()),
        Some(outcome) => println!("{outcome:?}"),
        None => println!("Nothing ran"),
    }
    println!(
        "{} cells drawn one at a time, settings {}",
        host.renderer.cells_drawn,
        session.settings()
    );
}
