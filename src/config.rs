use std::{path::Path, time::Duration};

use crate::error::ConfigError;
use crate::snakes_ladders::{Board, CLASSIC_LADDERS, CLASSIC_SNAKES};

/// Top-level game configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub timing: TimingConfig,
    pub board: BoardConfig,
    pub display: DisplayConfig,
    pub simulation: SimulationConfig,
}

/// Animation and pacing delays, in milliseconds.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub roll_delay: u64,
    pub step_delay: u64,
    pub turn_pause: u64,
    pub computer_delay: u64,
    pub celebration_frame: u64,
    pub celebration_frames: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            roll_delay: 250,
            step_delay: 50,
            turn_pause: 1500,
            computer_delay: 1500,
            celebration_frame: 300,
            celebration_frames: 15,
        }
    }
}

impl TimingConfig {
    pub fn roll_delay(&self) -> Duration {
        Duration::from_millis(self.roll_delay)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay)
    }

    pub fn turn_pause(&self) -> Duration {
        Duration::from_millis(self.turn_pause)
    }

    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay)
    }

    pub fn celebration_frame(&self) -> Duration {
        Duration::from_millis(self.celebration_frame)
    }
}

/// Snake `(head, tail)` and ladder `(foot, top)` pairs.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub snakes: Vec<(u8, u8)>,
    pub ladders: Vec<(u8, u8)>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            snakes: CLASSIC_SNAKES.to_vec(),
            ladders: CLASSIC_LADDERS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Number of history lines shown next to the board.
    pub history_len: usize,
    pub cell_size: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            history_len: 10,
            cell_size: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Rolls after which a simulated game is abandoned.
    pub max_turns: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig { max_turns: 10_000 }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values, including the link table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.history_len == 0 {
            return Err(ConfigError::Validation(
                "display.history_len must be > 0".into(),
            ));
        }
        if !(self.display.cell_size > 0.0) {
            return Err(ConfigError::Validation(
                "display.cell_size must be > 0".into(),
            ));
        }
        if self.timing.celebration_frames > 0 && self.timing.celebration_frame == 0 {
            return Err(ConfigError::Validation(
                "timing.celebration_frame must be > 0 when celebration_frames is set".into(),
            ));
        }
        if self.simulation.max_turns == 0 {
            return Err(ConfigError::Validation(
                "simulation.max_turns must be > 0".into(),
            ));
        }
        self.board()?;
        Ok(())
    }

    /// Builds the board described by `[board]`.
    pub fn board(&self) -> Result<Board, ConfigError> {
        Ok(Board::from_links(&self.board.snakes, &self.board.ladders)?)
    }
}
