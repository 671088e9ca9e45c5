//! Drives a [Stepwise] process one suspension point at a time.
//!
//! Every call to [StepController::advance] first drains the host's input. A quit or cancel
//! request ends the run right there, before the process is touched again; resize, speed and
//! gridline events are applied and the run carries on. Only then does the process take a single
//! step, after which the touched cells are drawn and the host pauses for a delay that depends on
//! the chosen [Speed] and the [GridSize].
use core::time::Duration;
use log::{debug, info, warn};
use std::collections::VecDeque;

use crate::error::RunRequestError;
use crate::grid::{Grid, GridSize};
use crate::host::{Host, InputEvent, InputSource, Pacer, Renderer, SessionCommand};
use crate::step::{Step, Stepwise};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Speed::Slow, Speed::Normal, Speed::Fast];

    pub fn label(self) -> &'static str {
        match self {
            Speed::Slow => "S",
            Speed::Normal => "N",
            Speed::Fast => "F",
        }
    }
    pub fn from_label(label: &str) -> Option<Speed> {
        Speed::ALL.into_iter().find(|speed| speed.label() == label)
    }
}

/// Delay after each animated step. Bigger grids have more cells to get through, so they step
/// faster.
pub fn base_delay(speed: Speed, size: GridSize) -> Duration {
    let millis = match (speed, size) {
        (Speed::Slow, GridSize::Small) => 30,
        (Speed::Slow, GridSize::Medium) => 15,
        (Speed::Slow, GridSize::Large) => 8,
        (Speed::Normal, GridSize::Small) => 20,
        (Speed::Normal, GridSize::Medium) => 10,
        (Speed::Normal, GridSize::Large) => 5,
        (Speed::Fast, GridSize::Small) => 10,
        (Speed::Fast, GridSize::Medium) => 5,
        (Speed::Fast, GridSize::Large) => 3,
    };
    Duration::from_millis(millis)
}

/// What a suspension point tells the running process to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    Continue,
    Cancel,
    Exit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CancelReason {
    /// The user pressed stop.
    User,
    /// The host is shutting down.
    Exit,
}

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution<T> {
    Completed(T),
    Cancelled(CancelReason),
}

impl<T> Resolution<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Resolution::Completed(output) => Resolution::Completed(f(output)),
            Resolution::Cancelled(reason) => Resolution::Cancelled(reason),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct StepController {
    state: RunState,
    speed: Speed,
    size: GridSize,
    animate: bool,
    polls: u64,
    steps: u64,
    /// Events read before the run started, handled at its first suspension point.
    deferred: VecDeque<InputEvent>,
}

impl StepController {
    pub fn new(speed: Speed) -> StepController {
        StepController {
            speed,
            animate: true,
            ..StepController::default()
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }
    pub fn speed(&self) -> Speed {
        self.speed
    }
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }
    pub fn animating(&self) -> bool {
        self.animate
    }
    /// Stops drawing and pausing for the rest of the current run.
    pub fn skip_animation(&mut self) {
        self.animate = false;
    }
    /// Suspension points passed in the current or last run.
    pub fn polls(&self) -> u64 {
        self.polls
    }
    /// Process steps taken in the current or last run.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Starts a new run on a grid of the given size. Refused while another run is going.
    pub fn begin(&mut self, size: GridSize) -> Result<(), RunRequestError> {
        if self.is_running() {
            return Err(RunRequestError::AlreadyRunning);
        }
        self.state = RunState::Running;
        self.size = size;
        self.animate = true;
        self.polls = 0;
        self.steps = 0;
        debug!("Run started on a {size:?} grid at {:?} speed", self.speed);
        Ok(())
    }

    /// Queues an event for the next suspension point, ahead of anything the host has pending.
    pub fn defer(&mut self, event: InputEvent) {
        self.deferred.push_back(event);
    }

    /// One suspension point: drains pending input, applies what can be applied mid-run and
    /// folds the rest into a [Signal]. Exit wins over cancel.
    pub fn suspend<I, R, P>(&mut self, grid: &mut Grid, host: &mut Host<I, R, P>) -> Signal
    where
        I: InputSource,
        R: Renderer,
        P: Pacer,
    {
        self.polls += 1;
        let mut signal = Signal::Continue;
        while let Some(event) = self.deferred.pop_front().or_else(|| host.input.poll_event()) {
            match event {
                InputEvent::Quit => signal = Signal::Exit,
                InputEvent::CancelRequested => {
                    if signal == Signal::Continue {
                        signal = Signal::Cancel;
                    }
                }
                InputEvent::ResizeTo(width, height) => {
                    host.renderer.resize(width, height);
                    host.redraw(grid);
                }
                InputEvent::SpeedChanged(speed) => self.speed = speed,
                InputEvent::GridlinesToggled => {
                    grid.toggle_gridlines();
                    host.redraw(grid);
                }
                InputEvent::SkipAnimation => self.skip_animation(),
                InputEvent::Command(SessionCommand::Run) => {
                    warn!("Run refused: {}", RunRequestError::AlreadyRunning)
                }
                InputEvent::CellClicked { .. } | InputEvent::Command(_) => {
                    debug!("Ignoring {event:?} while a run is in progress")
                }
            }
        }
        signal
    }

    /// Passes one suspension point and, unless told to stop, takes one step of `process`.
    /// Returns the [Resolution] once the run is over; afterwards (and whenever no run is going)
    /// it returns `None` without touching the process.
    pub fn advance<S, I, R, P>(
        &mut self,
        process: &mut S,
        grid: &mut Grid,
        host: &mut Host<I, R, P>,
    ) -> Option<Resolution<S::Output>>
    where
        S: Stepwise,
        I: InputSource,
        R: Renderer,
        P: Pacer,
    {
        if !self.is_running() {
            debug!("advance called in state {:?}", self.state);
            return None;
        }
        match self.suspend(grid, host) {
            Signal::Continue => {}
            Signal::Cancel => {
                return Some(self.resolve(Resolution::Cancelled(CancelReason::User), grid, host))
            }
            Signal::Exit => {
                return Some(self.resolve(Resolution::Cancelled(CancelReason::Exit), grid, host))
            }
        }
        match process.step(grid) {
            Step::Continue(touched) => {
                self.steps += 1;
                if self.animate && !touched.is_empty() {
                    for &point in &touched {
                        host.renderer.draw_cell(grid, point);
                    }
                    host.renderer.present_frame();
                    host.pacer
                        .pause(process.pace(base_delay(self.speed, self.size)));
                }
                None
            }
            Step::Finished(output) => Some(self.resolve(Resolution::Completed(output), grid, host)),
        }
    }

    /// Begins a run and advances it until it resolves.
    pub fn drive<S, I, R, P>(
        &mut self,
        process: &mut S,
        grid: &mut Grid,
        size: GridSize,
        host: &mut Host<I, R, P>,
    ) -> Result<Resolution<S::Output>, RunRequestError>
    where
        S: Stepwise,
        I: InputSource,
        R: Renderer,
        P: Pacer,
    {
        self.begin(size)?;
        loop {
            if let Some(resolution) = self.advance(process, grid, host) {
                return Ok(resolution);
            }
        }
    }

    fn resolve<T, I, R, P>(
        &mut self,
        resolution: Resolution<T>,
        grid: &Grid,
        host: &mut Host<I, R, P>,
    ) -> Resolution<T>
    where
        I: InputSource,
        R: Renderer,
        P: Pacer,
    {
        self.state = match resolution {
            Resolution::Completed(_) => RunState::Completed,
            Resolution::Cancelled(_) => RunState::Cancelled,
        };
        host.redraw(grid);
        info!(
            "Run {:?} after {} steps and {} polls",
            self.state, self.steps, self.polls
        );
        resolution
    }
}
