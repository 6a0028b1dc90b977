//! Arena configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_chesstoe::{Difficulty, SearchConfig};
use tracing::{debug, info, instrument};

/// One seat at the table.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct SeatConfig {
    /// Display name.
    name: String,

    /// Opponent strength in this seat.
    #[serde(default)]
    difficulty: Difficulty,
}

impl SeatConfig {
    /// Creates a seat.
    pub fn new(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            difficulty,
        }
    }
}

/// Configuration for an AI-versus-AI match.
///
/// ```toml
/// max_turns = 120
/// seed = 42
///
/// [player1]
/// name = "Ann"
/// difficulty = "hard"
///
/// [player2]
/// name = "Bo"
///
/// [search]
/// depth = 3
/// time_budget_ms = 500
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// First seat; moves first.
    #[serde(default = "default_player1")]
    player1: SeatConfig,

    /// Second seat.
    #[serde(default = "default_player2")]
    player2: SeatConfig,

    /// Actions after which an unfinished match is abandoned.
    #[serde(default = "default_max_turns")]
    max_turns: usize,

    /// Random seed; absent means seeded from the operating system.
    #[serde(default)]
    seed: Option<u64>,

    /// Search settings for the hard tier.
    #[serde(default)]
    search: SearchConfig,
}

fn default_player1() -> SeatConfig {
    SeatConfig::new("Player 1", Difficulty::Medium)
}

fn default_player2() -> SeatConfig {
    SeatConfig::new("Player 2", Difficulty::Medium)
}

fn default_max_turns() -> usize {
    200
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            player1: default_player1(),
            player2: default_player2(),
            max_turns: default_max_turns(),
            seed: None,
            search: SearchConfig::default(),
        }
    }
}

impl ArenaConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading arena config");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.max_turns == 0 {
            return Err(ConfigError::new("max_turns must be at least 1".to_string()));
        }

        info!(
            player1 = %config.player1.name,
            player2 = %config.player2.name,
            "Arena config loaded"
        );
        Ok(config)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(difficulty) = overrides.player1 {
            self.player1.difficulty = difficulty;
        }
        if let Some(difficulty) = overrides.player2 {
            self.player2.difficulty = difficulty;
        }
        if let Some(max_turns) = overrides.max_turns {
            self.max_turns = max_turns.max(1);
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if let Some(depth) = overrides.depth {
            self.search = self.search.with_depth(depth);
        }
        if let Some(budget) = overrides.time_budget_ms {
            self.search = self.search.with_time_budget_ms(budget);
        }
        self
    }
}

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    /// Player 1 difficulty.
    pub player1: Option<Difficulty>,
    /// Player 2 difficulty.
    pub player2: Option<Difficulty>,
    /// Turn limit.
    pub max_turns: Option<usize>,
    /// Random seed.
    pub seed: Option<u64>,
    /// Search depth.
    pub depth: Option<u32>,
    /// Search time budget in milliseconds.
    pub time_budget_ms: Option<u64>,
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
max_turns = 80
seed = 9

[player1]
name = "Ann"
difficulty = "hard"

[player2]
name = "Bo"
difficulty = "easy"

[search]
depth = 3
time_budget_ms = 250
"#,
        );
        let config = ArenaConfig::from_file(file.path()).expect("valid config");
        assert_eq!(config.player1().name(), "Ann");
        assert_eq!(*config.player1().difficulty(), Difficulty::Hard);
        assert_eq!(*config.player2().difficulty(), Difficulty::Easy);
        assert_eq!(*config.max_turns(), 80);
        assert_eq!(*config.seed(), Some(9));
        assert_eq!(*config.search().depth(), 3);
        assert_eq!(*config.search().time_budget_ms(), Some(250));
        assert_eq!(*config.search().branch_cap(), 15);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("");
        let config = ArenaConfig::from_file(file.path()).expect("valid config");
        assert_eq!(config, ArenaConfig::default());
    }

    #[test]
    fn test_invalid_toml_reports_parse_error() {
        let file = write_config("max_turns = \"lots\"");
        let err = ArenaConfig::from_file(file.path()).expect_err("bad type");
        assert!(err.message.contains("Failed to parse config"));
        assert!(err.file.ends_with("config.rs"));
    }

    #[test]
    fn test_zero_turns_rejected() {
        let file = write_config("max_turns = 0");
        let err = ArenaConfig::from_file(file.path()).expect_err("zero turns");
        assert!(err.to_string().contains("max_turns"));
    }

    #[test]
    fn test_missing_file_reports_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = ArenaConfig::from_file(dir.path().join("absent.toml")).expect_err("missing");
        assert!(err.message.contains("Failed to read config file"));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = Overrides {
            player2: Some(Difficulty::Hard),
            seed: Some(3),
            depth: Some(1),
            ..Overrides::default()
        };
        let config = ArenaConfig::default().with_overrides(&overrides);
        assert_eq!(*config.player1().difficulty(), Difficulty::Medium);
        assert_eq!(*config.player2().difficulty(), Difficulty::Hard);
        assert_eq!(*config.seed(), Some(3));
        assert_eq!(*config.search().depth(), 1);
    }
}
