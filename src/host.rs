//! Capabilities the engine consumes from whatever window, terminal or test harness hosts it.
use core::time::Duration;
use grid_util::point::Point;
use std::collections::VecDeque;

use crate::controller::Speed;
use crate::grid::{Grid, GridSize};
use crate::maze::MazeAlgorithm;
use crate::solver::SearchAlgorithm;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// Button-level commands, already resolved from screen coordinates by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Run,
    Clear,
    Reset,
    SelectAlgorithm(SearchAlgorithm),
    GenerateMaze(MazeAlgorithm),
    SetGridSize(GridSize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    ResizeTo(u32, u32),
    SpeedChanged(Speed),
    CancelRequested,
    /// Finish the current run without drawing or pausing between steps.
    SkipAnimation,
    GridlinesToggled,
    CellClicked {
        row: usize,
        col: usize,
        button: MouseButton,
    },
    Command(SessionCommand),
}

pub trait Renderer {
    fn draw_cell(&mut self, grid: &Grid, point: Point);
    fn draw_grid(&mut self, grid: &Grid);
    fn present_frame(&mut self);
    fn resize(&mut self, _width: u32, _height: u32) {}
    /// Tells the user the last search came up empty.
    fn show_no_path(&mut self) {}
}

/// Non-blocking event queue. Returns `None` once nothing more is pending right now.
pub trait InputSource {
    fn poll_event(&mut self) -> Option<InputEvent>;
}

pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Pauses by sleeping the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw_cell(&mut self, _: &Grid, _: Point) {}
    fn draw_grid(&mut self, _: &Grid) {}
    fn present_frame(&mut self) {}
}

/// Replays a fixed script of polls. Each inner vector holds the events one poll round (one
/// suspension point or idle frame) sees; once the script runs out every poll is empty.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Option<InputEvent>>,
}

impl ScriptedInput {
    pub fn new<F>(frames: F) -> ScriptedInput
    where
        F: IntoIterator<Item = Vec<InputEvent>>,
    {
        let mut queue = VecDeque::new();
        for frame in frames {
            queue.extend(frame.into_iter().map(Some));
            queue.push_back(None);
        }
        ScriptedInput { queue }
    }
    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.queue.pop_front().flatten()
    }
}

/// The three collaborators a session or controller talks to.
#[derive(Clone, Debug, Default)]
pub struct Host<I, R, P> {
    pub input: I,
    pub renderer: R,
    pub pacer: P,
}

impl<I: InputSource, R: Renderer, P: Pacer> Host<I, R, P> {
    pub fn new(input: I, renderer: R, pacer: P) -> Host<I, R, P> {
        Host {
            input,
            renderer,
            pacer,
        }
    }
    pub(crate) fn redraw(&mut self, grid: &Grid) {
        self.renderer.draw_grid(grid);
        self.renderer.present_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_frames_end_with_an_empty_poll() {
        let mut input = ScriptedInput::new(vec![
            vec![],
            vec![InputEvent::CancelRequested, InputEvent::Quit],
        ]);
        assert_eq!(input.poll_event(), None);
        assert_eq!(input.poll_event(), Some(InputEvent::CancelRequested));
        assert_eq!(input.poll_event(), Some(InputEvent::Quit));
        assert_eq!(input.poll_event(), None);
        assert!(input.is_exhausted());
        assert_eq!(input.poll_event(), None);
    }
}
