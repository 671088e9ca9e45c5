//! The three values remembered between sessions, stored as a single line
//! `"<side> <gridlines 0|1> <speed S|N|F>"`, for example `45 0 N`.
use log::{info, warn};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::controller::Speed;
use crate::error::SettingsError;
use crate::grid::{GridConfig, GridSize};

pub const DEFAULT_SETTINGS_FILE: &str = "settings.txt";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub size: GridSize,
    pub gridlines: bool,
    pub speed: Speed,
}

impl Settings {
    pub fn grid_config(&self) -> GridConfig {
        GridConfig::new(self.size, self.gridlines)
    }
}

impl FromStr for Settings {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Settings, SettingsError> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        let [side, gridlines, speed] = fields.as_slice() else {
            return Err(SettingsError::Malformed(format!(
                "expected 3 fields, found {}",
                fields.len()
            )));
        };
        let size = side
            .parse()
            .ok()
            .and_then(GridSize::from_side)
            .ok_or_else(|| SettingsError::Malformed(format!("unknown grid size {side:?}")))?;
        let gridlines = match *gridlines {
            "0" => false,
            "1" => true,
            other => {
                return Err(SettingsError::Malformed(format!(
                    "gridlines flag must be 0 or 1, not {other:?}"
                )))
            }
        };
        let speed = Speed::from_label(speed)
            .ok_or_else(|| SettingsError::Malformed(format!("unknown speed {speed:?}")))?;
        Ok(Settings {
            size,
            gridlines,
            speed,
        })
    }
}

impl std::fmt::Display for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.size.side(),
            u8::from(self.gridlines),
            self.speed.label()
        )
    }
}

pub trait SettingsStore {
    /// Never fails; anything unreadable falls back to [Settings::default].
    fn load(&mut self) -> Settings;
    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError>;
}

/// Keeps settings in a small text file.
#[derive(Clone, Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> FileSettingsStore {
        FileSettingsStore { path: path.into() }
    }

    fn read(&self) -> Result<Settings, SettingsError> {
        fs::read_to_string(&self.path)?.parse()
    }
}

impl Default for FileSettingsStore {
    fn default() -> FileSettingsStore {
        FileSettingsStore::new(DEFAULT_SETTINGS_FILE)
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&mut self) -> Settings {
        match self.read() {
            Ok(settings) => {
                info!("Loaded settings {settings} from {}", self.path.display());
                settings
            }
            Err(err) => {
                warn!(
                    "Using default settings, {} is unusable: {err}",
                    self.path.display()
                );
                Settings::default()
            }
        }
    }

    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        fs::write(&self.path, settings.to_string())?;
        info!("Saved settings {settings} to {}", self.path.display());
        Ok(())
    }
}

/// Holds settings in memory. Useful for hosts without a writable disk and for tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySettingsStore {
    pub stored: Option<Settings>,
    pub saves: usize,
}

impl SettingsStore for MemorySettingsStore {
    fn load(&mut self) -> Settings {
        self.stored.unwrap_or_default()
    }

    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        self.stored = Some(*settings);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "grid_visualizer_{}_{name}.txt",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn parses_the_stored_line() {
        let settings: Settings = "75 1 F\n".parse().unwrap();
        assert_eq!(
            settings,
            Settings {
                size: GridSize::Large,
                gridlines: true,
                speed: Speed::Fast
            }
        );
        assert_eq!(settings.to_string(), "75 1 F");
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in ["", "45 0", "30 0 N", "45 2 N", "45 0 X", "45 0 N extra"] {
            assert!(
                matches!(line.parse::<Settings>(), Err(SettingsError::Malformed(_))),
                "{line:?}"
            );
        }
    }

    #[test]
    fn missing_file_loads_defaults() {
        let mut store = FileSettingsStore::new(scratch_file("missing"));
        let settings = store.load();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.size, GridSize::Medium);
        assert!(!settings.gridlines);
        assert_eq!(settings.speed, Speed::Normal);
    }

    #[test]
    fn garbage_file_loads_defaults() {
        let path = scratch_file("garbage");
        fs::write(&path, "big yes quick").unwrap();
        assert_eq!(FileSettingsStore::new(&path).load(), Settings::default());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn save_then_load() {
        let path = scratch_file("saved");
        let mut store = FileSettingsStore::new(&path);
        let settings = Settings {
            size: GridSize::Small,
            gridlines: true,
            speed: Speed::Slow,
        };
        store.save(&settings).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "25 1 S");
        assert_eq!(store.load(), settings);
        let _ = fs::remove_file(path);
    }
}
