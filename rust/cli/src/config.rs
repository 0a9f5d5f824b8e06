//! Layered table configuration.
//!
//! Values resolve in order: built-in defaults, then the TOML file named by
//! `BLACKJACK_CONFIG`, then individual `BLACKJACK_*` environment variables.
//! Command-line flags are applied on top by each command.

use blackjack_engine::engine::MAX_PLAYERS;
use blackjack_engine::hand::AceDemotion;
use serde::{Deserialize, Serialize};
use std::fs;

/// Most decks a shoe may be built from.
pub const MAX_DECKS: u32 = 8;

pub const ENV_CONFIG: &str = "BLACKJACK_CONFIG";
pub const ENV_PLAYERS: &str = "BLACKJACK_PLAYERS";
pub const ENV_DECKS: &str = "BLACKJACK_DECKS";
pub const ENV_SEED: &str = "BLACKJACK_SEED";
pub const ENV_ACE_RULE: &str = "BLACKJACK_ACE_RULE";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub players: usize,
    pub decks: u32,
    pub seed: Option<u64>,
    pub ace_rule: AceDemotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub players: ValueSource,
    pub decks: ValueSource,
    pub seed: ValueSource,
    pub ace_rule: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            players: ValueSource::Default,
            decks: ValueSource::Default,
            seed: ValueSource::Default,
            ace_rule: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players: 1,
            decks: 1,
            seed: None,
            ace_rule: AceDemotion::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(ENV_CONFIG) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.decks {
            cfg.decks = v;
            sources.decks = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.ace_rule {
            cfg.ace_rule = parse_ace_rule(&v)?;
            sources.ace_rule = ValueSource::File;
        }
    }

    if let Some(players) = env_value(ENV_PLAYERS) {
        cfg.players = players
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", ENV_PLAYERS, players)))?;
        sources.players = ValueSource::Env;
    }
    if let Some(decks) = env_value(ENV_DECKS) {
        cfg.decks = decks
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", ENV_DECKS, decks)))?;
        sources.decks = ValueSource::Env;
    }
    if let Some(seed) = env_value(ENV_SEED) {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", ENV_SEED, seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(rule) = env_value(ENV_ACE_RULE) {
        cfg.ace_rule = parse_ace_rule(&rule)?;
        sources.ace_rule = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    decks: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    ace_rule: Option<String>,
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_ace_rule(s: &str) -> Result<AceDemotion, ConfigError> {
    AceDemotion::parse(s.trim()).ok_or_else(|| {
        ConfigError::Invalid(format!(
            "Invalid ace rule '{}' (expected single-pass or as-needed)",
            s
        ))
    })
}

/// Checks table limits shared by config values and command-line flags.
pub fn validate_table(players: usize, decks: u32) -> Result<(), String> {
    if players == 0 || players > MAX_PLAYERS {
        return Err(format!(
            "players must be between 1 and {}",
            MAX_PLAYERS
        ));
    }
    if decks == 0 || decks > MAX_DECKS {
        return Err(format!(
            "decks must be between 1 and {}",
            MAX_DECKS
        ));
    }
    Ok(())
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    validate_table(cfg.players, cfg.decks).map_err(ConfigError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [ENV_CONFIG, ENV_PLAYERS, ENV_DECKS, ENV_SEED, ENV_ACE_RULE] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn defaults_when_nothing_is_set() {
        clear_env();
        let resolved = load_with_sources().unwrap();
        assert_eq!(resolved.config, Config::default());
        assert_eq!(resolved.sources.players, ValueSource::Default);
        assert_eq!(resolved.sources.ace_rule, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.toml");
        fs::write(&path, "players = 3\ndecks = 6\nace_rule = \"as-needed\"\n").unwrap();
        std::env::set_var(ENV_CONFIG, &path);
        std::env::set_var(ENV_DECKS, "2");

        let resolved = load_with_sources().unwrap();
        clear_env();

        assert_eq!(resolved.config.players, 3);
        assert_eq!(resolved.sources.players, ValueSource::File);
        assert_eq!(resolved.config.decks, 2);
        assert_eq!(resolved.sources.decks, ValueSource::Env);
        assert_eq!(resolved.config.ace_rule, AceDemotion::AsNeeded);
        assert_eq!(resolved.sources.seed, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn rejects_out_of_range_players() {
        clear_env();
        std::env::set_var(ENV_PLAYERS, "8");
        let result = load_with_sources();
        clear_env();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    #[serial]
    fn rejects_unknown_ace_rule() {
        clear_env();
        std::env::set_var(ENV_ACE_RULE, "whenever");
        let result = load_with_sources();
        clear_env();
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("whenever"));
    }

    #[test]
    #[serial]
    fn blank_env_values_are_ignored() {
        clear_env();
        std::env::set_var(ENV_SEED, "  ");
        let resolved = load_with_sources().unwrap();
        clear_env();
        assert_eq!(resolved.config.seed, None);
    }

    #[test]
    fn table_limits() {
        assert!(validate_table(1, 1).is_ok());
        assert!(validate_table(7, 8).is_ok());
        assert!(validate_table(0, 1).is_err());
        assert!(validate_table(1, 9).is_err());
    }
}
