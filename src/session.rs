//! [VisualizerSession] ties the grid, the step controller and the host together. Hosts call
//! [VisualizerSession::frame] once per frame (or hand control to [VisualizerSession::run]);
//! while a run is active every frame is one suspension point of that run, otherwise the frame
//! drains input and dispatches it.
use core::time::Duration;
use grid_util::point::Point;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::controller::{CancelReason, Resolution, RunState, Speed, StepController};
use crate::error::{RunRequestError, SettingsError};
use crate::grid::{position, Grid, GridConfig, GridSize};
use crate::host::{Host, InputEvent, InputSource, MouseButton, Pacer, Renderer, SessionCommand};
use crate::maze::{MazeAlgorithm, MazeGenerator};
use crate::settings::{Settings, SettingsStore};
use crate::solver::{PathResult, Search, SearchAlgorithm};
use crate::trace::PathTrace;

/// Pause between two idle frames.
pub const IDLE_FRAME: Duration = Duration::from_millis(16);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Quit,
}

/// How the last run ended, as far as the user is concerned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The search found a path and it has been traced.
    PathFound(Vec<Point>),
    NoPath,
    MazeGenerated(MazeAlgorithm),
    Cancelled(CancelReason),
}

#[derive(Clone, Debug)]
enum ActiveRun {
    Search(SearchAlgorithm, Search),
    Trace(PathTrace),
    Maze(MazeAlgorithm, MazeGenerator<StdRng>),
}

enum Finished {
    Search(SearchAlgorithm, PathResult),
    Trace(Vec<Point>),
    Maze(MazeAlgorithm),
}

#[derive(Clone, Debug)]
pub struct VisualizerSession {
    config: GridConfig,
    grid: Grid,
    algorithm: Option<SearchAlgorithm>,
    controller: StepController,
    active: Option<ActiveRun>,
    last: Option<RunOutcome>,
    rng: StdRng,
    needs_redraw: bool,
}

impl VisualizerSession {
    pub fn new(settings: Settings) -> VisualizerSession {
        VisualizerSession::with_rng(settings, StdRng::from_entropy())
    }

    /// Like [VisualizerSession::new] with a fixed source of randomness for the maze generators.
    pub fn with_rng(settings: Settings, rng: StdRng) -> VisualizerSession {
        let config = settings.grid_config();
        VisualizerSession {
            config,
            grid: Grid::from_config(config),
            algorithm: None,
            controller: StepController::new(settings.speed),
            active: None,
            last: None,
            rng,
            needs_redraw: true,
        }
    }

    /// Builds a session from whatever `store` remembers.
    pub fn from_store<S: SettingsStore>(store: &mut S) -> VisualizerSession {
        VisualizerSession::new(store.load())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn config(&self) -> GridConfig {
        self.config
    }
    pub fn algorithm(&self) -> Option<SearchAlgorithm> {
        self.algorithm
    }
    pub fn speed(&self) -> Speed {
        self.controller.speed()
    }
    pub fn run_state(&self) -> RunState {
        self.controller.state()
    }
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }
    pub fn last_outcome(&self) -> Option<&RunOutcome> {
        self.last.as_ref()
    }
    pub fn settings(&self) -> Settings {
        Settings {
            size: self.config.size,
            gridlines: self.grid.gridlines_visible(),
            speed: self.controller.speed(),
        }
    }

    fn ensure_idle(&self) -> Result<(), RunRequestError> {
        if self.is_running() {
            Err(RunRequestError::AlreadyRunning)
        } else {
            Ok(())
        }
    }

    pub fn select_algorithm(&mut self, algorithm: SearchAlgorithm) {
        debug!("Selected {}", algorithm.label());
        self.algorithm = Some(algorithm);
    }

    /// Validates the grid and starts the selected search. Barriers survive, everything left over
    /// from earlier runs is cleared. Nothing changes when the request is refused.
    pub fn start_search(&mut self) -> Result<(), RunRequestError> {
        self.ensure_idle()?;
        self.grid.start().ok_or(RunRequestError::MissingStart)?;
        self.grid.end().ok_or(RunRequestError::MissingEnd)?;
        let algorithm = self.algorithm.ok_or(RunRequestError::NoAlgorithmSelected)?;
        self.grid.clear(true);
        let search = algorithm.searcher(&mut self.grid)?;
        self.controller.begin(self.config.size)?;
        info!("Started {} search", algorithm.label());
        self.active = Some(ActiveRun::Search(algorithm, search));
        self.last = None;
        self.needs_redraw = true;
        Ok(())
    }

    /// Wipes every barrier and starts generating a maze in their place.
    pub fn start_maze(&mut self, algorithm: MazeAlgorithm) -> Result<(), RunRequestError> {
        self.ensure_idle()?;
        let rng = StdRng::seed_from_u64(self.rng.gen());
        let generator = algorithm.generator(&mut self.grid, rng);
        self.controller.begin(self.config.size)?;
        info!("Generating {} maze", algorithm.label());
        self.active = Some(ActiveRun::Maze(algorithm, generator));
        self.last = None;
        self.needs_redraw = true;
        Ok(())
    }

    /// Removes search results, keeping barriers, start and end.
    pub fn clear(&mut self) -> Result<(), RunRequestError> {
        self.ensure_idle()?;
        self.grid.clear(true);
        self.needs_redraw = true;
        Ok(())
    }

    /// Starts over on an empty grid of the same size.
    pub fn reset(&mut self) -> Result<(), RunRequestError> {
        self.ensure_idle()?;
        self.config.gridlines = self.grid.gridlines_visible();
        self.grid = Grid::from_config(self.config);
        self.last = None;
        self.needs_redraw = true;
        Ok(())
    }

    pub fn set_grid_size(&mut self, size: GridSize) -> Result<(), RunRequestError> {
        self.ensure_idle()?;
        self.config = GridConfig::new(size, self.grid.gridlines_visible());
        self.grid = Grid::from_config(self.config);
        self.last = None;
        self.needs_redraw = true;
        info!("Grid size set to {}x{}", size.side(), size.side());
        Ok(())
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.controller.set_speed(speed);
    }

    pub fn toggle_gridlines(&mut self) {
        self.grid.toggle_gridlines();
        self.config.gridlines = self.grid.gridlines_visible();
        self.needs_redraw = true;
    }

    /// Left click selects (start, then end, then barriers), right click frees the cell. Returns
    /// the cell that may have changed, or `None` when the click was ignored.
    pub fn click(&mut self, row: usize, col: usize, button: MouseButton) -> Option<Point> {
        if self.is_running() {
            debug!("Ignoring click at ({row}, {col}) during a run");
            return None;
        }
        let side = self.grid.side();
        if row >= side || col >= side {
            debug!("Ignoring click at ({row}, {col}) outside the {side}x{side} grid");
            return None;
        }
        let point = position(row, col);
        match button {
            MouseButton::Left => self.grid.select_cell(point),
            MouseButton::Right => self.grid.deselect_cell(point),
        }
        Some(point)
    }

    /// One host frame. Returns [SessionControl::Quit] once the user asked to leave, whether or
    /// not a run was going on at the time.
    pub fn frame<I, R, P>(&mut self, host: &mut Host<I, R, P>) -> SessionControl
    where
        I: InputSource,
        R: Renderer,
        P: Pacer,
    {
        let control = if self.active.is_some() {
            self.advance_run(host)
        } else {
            self.idle_frame(host)
        };
        if self.needs_redraw {
            host.redraw(&self.grid);
            self.needs_redraw = false;
        }
        control
    }

    /// Runs frames until the user quits.
    pub fn run<I, R, P>(&mut self, host: &mut Host<I, R, P>)
    where
        I: InputSource,
        R: Renderer,
        P: Pacer,
    {
        host.redraw(&self.grid);
        self.needs_redraw = false;
        while self.frame(host) == SessionControl::Continue {
            if !self.is_running() {
                host.pacer.pause(IDLE_FRAME);
            }
        }
        info!("Session ended");
    }

    /// Persists the current size, gridline and speed settings.
    pub fn shutdown<S: SettingsStore>(&self, store: &mut S) -> Result<(), SettingsError> {
        store.save(&self.settings())
    }

    fn advance_run<I, R, P>(&mut self, host: &mut Host<I, R, P>) -> SessionControl
    where
        I: InputSource,
        R: Renderer,
        P: Pacer,
    {
        let Some(mut run) = self.active.take() else {
            return SessionControl::Continue;
        };
        let grid = &mut self.grid;
        let resolution = match &mut run {
            ActiveRun::Search(algorithm, search) => {
                let algorithm = *algorithm;
                self.controller
                    .advance(search, grid, host)
                    .map(|r| r.map(|result| Finished::Search(algorithm, result)))
            }
            ActiveRun::Trace(trace) => self
                .controller
                .advance(trace, grid, host)
                .map(|r| r.map(Finished::Trace)),
            ActiveRun::Maze(algorithm, generator) => {
                let algorithm = *algorithm;
                self.controller
                    .advance(generator, grid, host)
                    .map(|r| r.map(|()| Finished::Maze(algorithm)))
            }
        };
        match resolution {
            None => {
                self.active = Some(run);
                SessionControl::Continue
            }
            Some(Resolution::Completed(finished)) => {
                self.finish(finished, host);
                SessionControl::Continue
            }
            Some(Resolution::Cancelled(reason)) => {
                info!("Run cancelled ({reason:?})");
                self.last = Some(RunOutcome::Cancelled(reason));
                match reason {
                    CancelReason::User => SessionControl::Continue,
                    CancelReason::Exit => SessionControl::Quit,
                }
            }
        }
    }

    fn finish<I, R, P>(&mut self, finished: Finished, host: &mut Host<I, R, P>)
    where
        I: InputSource,
        R: Renderer,
        P: Pacer,
    {
        match finished {
            Finished::Search(algorithm, PathResult::Found(path)) => {
                info!("{} found a path of {} cells", algorithm.label(), path.len());
                let animate = self.controller.animating();
                if let Err(err) = self.controller.begin(self.config.size) {
                    warn!("Could not trace the path: {err}");
                    self.last = Some(RunOutcome::PathFound(path));
                    return;
                }
                if !animate {
                    self.controller.skip_animation();
                }
                self.active = Some(ActiveRun::Trace(PathTrace::new(&self.grid, path)));
            }
            Finished::Search(algorithm, PathResult::NoPath) => {
                info!("{} found no path", algorithm.label());
                host.renderer.show_no_path();
                host.renderer.present_frame();
                self.last = Some(RunOutcome::NoPath);
            }
            Finished::Trace(path) => self.last = Some(RunOutcome::PathFound(path)),
            Finished::Maze(algorithm) => self.last = Some(RunOutcome::MazeGenerated(algorithm)),
        }
    }

    fn idle_frame<I, R, P>(&mut self, host: &mut Host<I, R, P>) -> SessionControl
    where
        I: InputSource,
        R: Renderer,
        P: Pacer,
    {
        while let Some(event) = host.input.poll_event() {
            if self.dispatch(event, host) == SessionControl::Quit {
                return SessionControl::Quit;
            }
            // The rest of this poll round belongs to the run's first suspension point
            if self.is_running() {
                while let Some(event) = host.input.poll_event() {
                    self.controller.defer(event);
                }
                break;
            }
        }
        SessionControl::Continue
    }

    fn dispatch<I, R, P>(&mut self, event: InputEvent, host: &mut Host<I, R, P>) -> SessionControl
    where
        I: InputSource,
        R: Renderer,
        P: Pacer,
    {
        match event {
            InputEvent::Quit => return SessionControl::Quit,
            InputEvent::ResizeTo(width, height) => {
                host.renderer.resize(width, height);
                self.needs_redraw = true;
            }
            InputEvent::SpeedChanged(speed) => self.set_speed(speed),
            InputEvent::GridlinesToggled => self.toggle_gridlines(),
            InputEvent::CancelRequested | InputEvent::SkipAnimation => {
                debug!("Ignoring {event:?}, nothing is running")
            }
            InputEvent::CellClicked { row, col, button } => {
                if let Some(point) = self.click(row, col, button) {
                    host.renderer.draw_cell(&self.grid, point);
                    host.renderer.present_frame();
                }
            }
            InputEvent::Command(command) => {
                if let Err(err) = self.command(command) {
                    warn!("{command:?} refused: {err}");
                }
            }
        }
        SessionControl::Continue
    }

    fn command(&mut self, command: SessionCommand) -> Result<(), RunRequestError> {
        match command {
            SessionCommand::Run => self.start_search(),
            SessionCommand::Clear => self.clear(),
            SessionCommand::Reset => self.reset(),
            SessionCommand::SelectAlgorithm(algorithm) => {
                self.select_algorithm(algorithm);
                Ok(())
            }
            SessionCommand::GenerateMaze(algorithm) => self.start_maze(algorithm),
            SessionCommand::SetGridSize(size) => self.set_grid_size(size),
        }
    }
}
