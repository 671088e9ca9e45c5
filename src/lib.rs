//! # grid_visualizer
//!
//! The engine behind a grid pathfinding visualizer. A square [Grid](grid::Grid) of cells holds a
//! start, an end and barriers; [BFS](solver::bfs), [DFS](solver::dfs),
//! [Dijkstra](solver::dijkstra) and [A*](solver::astar) search it, and four
//! [maze generators](maze) fill it. Every algorithm is a [Stepwise](step::Stepwise) process that
//! does one visible unit of work per call, so a [StepController](controller::StepController)
//! can poll input, draw and pause in between, and stop a run cleanly at any suspension point.
//!
//! Windowing, drawing and input are left to the host, which implements the traits in [host].
//! [VisualizerSession](session::VisualizerSession) wires everything together.
pub mod controller;
pub mod error;
pub mod grid;
pub mod host;
pub mod maze;
pub mod session;
pub mod settings;
pub mod solver;
pub mod step;
pub mod trace;

pub use controller::{Speed, StepController};
pub use error::{RunRequestError, SettingsError};
pub use grid::{position, CellState, Grid, GridConfig, GridSize};
pub use host::{Host, InputEvent, InputSource, MouseButton, Pacer, Renderer, SessionCommand};
pub use maze::MazeAlgorithm;
pub use session::{SessionControl, VisualizerSession};
pub use settings::{FileSettingsStore, Settings, SettingsStore};
pub use solver::{PathResult, SearchAlgorithm};
