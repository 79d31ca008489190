//! Session configuration loaded from TOML.

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use fliptac_core::{MAX_PLAYERS, MIN_BOARD_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Board sizes the oracles were trained on.
pub const ORACLE_BOARD_SIZES: [usize; 2] = [5, 7];

/// Which move selector the computer uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    /// Level 1: minimize the opponent's mobility.
    #[default]
    #[strum(serialize = "1 (mobility)")]
    Mobility,
    /// Level 2: weighted positional score.
    #[strum(serialize = "2 (positional)")]
    Positional,
    /// Level 3: tensor inference oracle.
    #[strum(serialize = "3 (tensor oracle)")]
    Tensor,
    /// Level 4: language model oracle.
    #[strum(serialize = "4 (text oracle)")]
    Text,
}

impl Difficulty {
    /// Returns true for the levels that delegate to an external oracle.
    pub fn uses_oracle(self) -> bool {
        matches!(self, Difficulty::Tensor | Difficulty::Text)
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Difficulty::Mobility),
            2 => Ok(Difficulty::Positional),
            3 => Ok(Difficulty::Tensor),
            4 => Ok(Difficulty::Text),
            other => Err(format!("cpu_difficulty must be 1 to 4, got {}", other)),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(level: Difficulty) -> Self {
        match level {
            Difficulty::Mobility => 1,
            Difficulty::Positional => 2,
            Difficulty::Tensor => 3,
            Difficulty::Text => 4,
        }
    }
}

/// Mobility weights for the positional selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WeightProfile {
    /// Opponent mobility ×5, own mobility ×4.
    #[default]
    Basic,
    /// Opponent mobility ×7, own mobility ×5.
    Tuned,
}

impl WeightProfile {
    /// `(opponent, own)` mobility weights.
    pub fn weights(self) -> (i64, i64) {
        match self {
            WeightProfile::Basic => (5, 4),
            WeightProfile::Tuned => (7, 5),
        }
    }
}

/// How the computer places its first stone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OpeningPolicy {
    /// Uniformly among the legal border cells.
    #[default]
    RandomBorder,
    /// Clockwise around the perimeter from a random start, first legal cell.
    PerimeterWalk,
}

/// External oracle settings, used by difficulty 3 and 4.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct OracleConfig {
    /// Seconds to wait for one inference before falling back.
    timeout_secs: u64,

    /// URL of the tensor inference service.
    #[setters(strip_option)]
    tensor_endpoint: Option<String>,

    /// LLM provider (openai or anthropic).
    llm_provider: LlmProvider,

    /// LLM model name.
    llm_model: String,

    /// Maximum tokens for LLM replies.
    llm_max_tokens: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            tensor_endpoint: None,
            llm_provider: LlmProvider::OpenAI,
            llm_model: "gpt-4o-mini".to_string(),
            llm_max_tokens: 64,
        }
    }
}

impl OracleConfig {
    /// The inference timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds LLM client settings.
    ///
    /// Reads `OPENAI_API_KEY` or `ANTHROPIC_API_KEY` depending on the
    /// provider.
    #[instrument(skip(self), fields(provider = %self.llm_provider, model = %self.llm_model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        let var = self.llm_provider.api_key_var();
        let api_key = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", var)))?;
        debug!("Resolved LLM API key");

        Ok(LlmConfig::new(
            self.llm_provider,
            api_key,
            self.llm_model.clone(),
            self.llm_max_tokens,
        ))
    }
}

/// Everything fixed for one session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct SessionConfig {
    /// 1 plays a human against the computer; 2 to 5 seats that many humans.
    player_count: usize,

    /// Board edge length.
    board_size: usize,

    /// Computer strength, 1 to 4.
    cpu_difficulty: Difficulty,

    /// Mobility weights for difficulty 2.
    weights: WeightProfile,

    /// Computer opening policy.
    opening: OpeningPolicy,

    /// Pause before each computer move, in milliseconds.
    cpu_delay_ms: u64,

    /// Seed for the computer's random choices. Entropy when absent.
    #[setters(strip_option)]
    seed: Option<u64>,

    /// Oracle settings.
    oracle: OracleConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_count: 1,
            board_size: 5,
            cpu_difficulty: Difficulty::Mobility,
            weights: WeightProfile::Basic,
            opening: OpeningPolicy::RandomBorder,
            cpu_delay_ms: 500,
            seed: None,
            oracle: OracleConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Loads configuration from a TOML file and validates it.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(
            players = config.player_count,
            size = config.board_size,
            difficulty = %config.cpu_difficulty,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Returns true when a computer takes a seat, i.e. a single human plays.
    pub fn has_computer(&self) -> bool {
        self.player_count == 1
    }

    /// Checks player count and board size, plus the oracle restrictions when
    /// a computer is seated.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::new(format!(
                "player_count must be 1 to {}, got {}",
                MAX_PLAYERS, self.player_count
            )));
        }
        if self.board_size < MIN_BOARD_SIZE {
            return Err(ConfigError::new(format!(
                "board_size must be at least {}, got {}",
                MIN_BOARD_SIZE, self.board_size
            )));
        }
        if !self.has_computer() {
            return Ok(());
        }
        if self.cpu_difficulty.uses_oracle() && !ORACLE_BOARD_SIZES.contains(&self.board_size) {
            return Err(ConfigError::new(format!(
                "difficulty {} only supports board sizes {:?}, got {}",
                self.cpu_difficulty, ORACLE_BOARD_SIZES, self.board_size
            )));
        }
        if self.cpu_difficulty == Difficulty::Tensor && self.oracle.tensor_endpoint.is_none() {
            return Err(ConfigError::new(
                "difficulty 3 needs oracle.tensor_endpoint".to_string(),
            ));
        }
        Ok(())
    }

    /// The computer pacing delay as a [`Duration`].
    pub fn cpu_delay(&self) -> Duration {
        Duration::from_millis(self.cpu_delay_ms)
    }
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
        tracing::error!(error_message = %message, "Config error created");
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

    #[test]
    fn test_defaults_are_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(*config.cpu_delay_ms(), 500);
        assert_eq!(config.oracle().timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_player_count_bounds() {
        assert!(SessionConfig::default().with_player_count(0).validate().is_err());
        assert!(SessionConfig::default().with_player_count(5).validate().is_ok());
        assert!(SessionConfig::default().with_player_count(6).validate().is_err());
    }

    #[test]
    fn test_board_size_minimum() {
        assert!(SessionConfig::default().with_board_size(2).validate().is_err());
        assert!(SessionConfig::default().with_board_size(3).validate().is_ok());
    }

    #[test]
    fn test_oracle_levels_restricted_to_trained_sizes() {
        let text = SessionConfig::default().with_cpu_difficulty(Difficulty::Text);
        assert!(text.clone().with_board_size(6).validate().is_err());
        assert!(text.clone().with_board_size(7).validate().is_ok());
        assert!(text.with_board_size(5).validate().is_ok());
    }

    #[test]
    fn test_tensor_level_needs_endpoint() {
        let config = SessionConfig::default().with_cpu_difficulty(Difficulty::Tensor);
        assert!(config.validate().is_err());
        let config = config.with_oracle(
            OracleConfig::default().with_tensor_endpoint("http://localhost:8000/infer".to_string()),
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_human_tables_ignore_computer_level() {
        let text = SessionConfig::default()
            .with_player_count(3)
            .with_board_size(6)
            .with_cpu_difficulty(Difficulty::Text);
        assert!(!text.has_computer());
        assert!(text.validate().is_ok());

        let tensor = SessionConfig::default()
            .with_player_count(2)
            .with_cpu_difficulty(Difficulty::Tensor);
        assert!(tensor.validate().is_ok());
        assert!(tensor.with_player_count(1).validate().is_err());
    }

    #[test]
    fn test_difficulty_from_number() {
        assert_eq!(Difficulty::try_from(2), Ok(Difficulty::Positional));
        assert!(Difficulty::try_from(0).is_err());
        assert!(Difficulty::try_from(5).is_err());
        assert_eq!(u8::from(Difficulty::Text), 4);
    }

    #[test]
    fn test_weight_profiles() {
        assert_eq!(WeightProfile::Basic.weights(), (5, 4));
        assert_eq!(WeightProfile::Tuned.weights(), (7, 5));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: SessionConfig = toml::from_str(
            r#"
            board_size = 7
            cpu_difficulty = 2
            weights = "tuned"
            opening = "perimeter_walk"

            [oracle]
            llm_provider = "anthropic"
            "#,
        )
        .unwrap();
        assert_eq!(*config.board_size(), 7);
        assert_eq!(*config.cpu_difficulty(), Difficulty::Positional);
        assert_eq!(*config.weights(), WeightProfile::Tuned);
        assert_eq!(*config.opening(), OpeningPolicy::PerimeterWalk);
        assert_eq!(*config.oracle().llm_provider(), LlmProvider::Anthropic);
        assert_eq!(*config.oracle().timeout_secs(), 30);
        assert_eq!(*config.player_count(), 1);
    }

    #[test]
    fn test_bad_difficulty_rejected_by_parser() {
        let parsed: Result<SessionConfig, _> = toml::from_str("cpu_difficulty = 9");
        assert!(parsed.is_err());
    }
}
