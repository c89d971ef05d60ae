use anyhow::Context;
use camino::Utf8Path;
use serde::Deserialize;
use std::collections::HashMap;
use tic_tac_toe::Team;
use tracing_subscriber::filter::EnvFilter;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct Config {
    /// The team the human plays.
    human: Option<Team>,

    #[serde(default)]
    show_hints: bool,

    #[serde(default = "default_log_level")]
    log_level: String,

    #[serde(flatten)]
    extra: HashMap<String, toml::Value>,
}

impl Config {
    pub fn human(&self) -> Option<Team> {
        self.human
    }

    pub fn show_hints(&self) -> bool {
        self.show_hints
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Load a config from a path
    pub fn load_from_path(path: &Utf8Path) -> anyhow::Result<Self> {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from '{path}'"))
            .and_then(|s| Self::load_from_str(&s))
    }

    /// Load a config from a toml string
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("failed to parse config")
    }

    /// Validate a config
    pub fn validate(&self) -> Vec<ValidationMessage> {
        let mut errors = Vec::new();

        if EnvFilter::try_new(&self.log_level).is_err() {
            errors.push(ValidationMessage {
                severity: Severity::Error,
                error: ValidationError::InvalidLogLevel(self.log_level.clone()),
            });
        }

        let mut unknown_keys: Vec<&String> = self.extra.keys().collect();
        unknown_keys.sort();
        for key in unknown_keys {
            errors.push(ValidationMessage {
                severity: Severity::Warn,
                error: ValidationError::UnknownKey(key.clone()),
            });
        }

        errors
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            human: None,
            show_hints: false,
            log_level: default_log_level(),
            extra: HashMap::new(),
        }
    }
}

#[derive(Debug)]
pub struct ValidationMessage {
    severity: Severity,
    error: ValidationError,
}

impl ValidationMessage {
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn error(&self) -> &ValidationError {
        &self.error
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid log filter \"{0}\"")]
    InvalidLogLevel(String),

    #[error("unknown key \"{0}\"")]
    UnknownKey(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Warn,
    Error,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_full() {
        let config = Config::load_from_str(
            r#"
human = "o"
show_hints = true
log_level = "debug"
"#,
        )
        .expect("failed to parse");

        assert_eq!(config.human(), Some(Team::O));
        assert!(config.show_hints());
        assert_eq!(config.log_level(), "debug");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn parse_empty() {
        let config = Config::load_from_str("").expect("failed to parse");
        assert_eq!(config.human(), None);
        assert!(!config.show_hints());
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn parse_invalid_team() {
        assert!(Config::load_from_str("human = \"Z\"").is_err());
    }

    #[test]
    fn validate() {
        let config = Config::load_from_str(
            r#"
log_level = "tic_tac_toe=loud"
theme = "dark"
"#,
        )
        .expect("failed to parse");

        let messages = config.validate();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].severity(), Severity::Error);
        assert!(matches!(
            messages[0].error(),
            ValidationError::InvalidLogLevel(level) if level == "tic_tac_toe=loud"
        ));
        assert_eq!(messages[1].severity(), Severity::Warn);
        assert_eq!(messages[1].error().to_string(), "unknown key \"theme\"");
    }

    #[test]
    fn validate_target_directives() {
        let config = Config::load_from_str("log_level = \"tic_tac_toe=debug,info\"")
            .expect("failed to parse");
        assert!(config.validate().is_empty());
    }
}
