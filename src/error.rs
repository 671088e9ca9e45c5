use thiserror::Error;

/// Reasons a run request is turned down. Nothing on the grid changes when one is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RunRequestError {
    #[error("no start cell has been selected")]
    MissingStart,
    #[error("no end cell has been selected")]
    MissingEnd,
    #[error("no search algorithm has been selected")]
    NoAlgorithmSelected,
    #[error("a run is already in progress")]
    AlreadyRunning,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file could not be accessed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Malformed(String),
}
