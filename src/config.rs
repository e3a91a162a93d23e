//! Configuration management
//!
//! Loaded once from a TOML file at startup and never mutated afterwards.
//!
//! ```toml
//! [discord]
//! token = "..."
//!
//! [man]
//! server = "https://man.example.org/"
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;

/// Default config file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Discord embed description limit
pub const CARD_DESCRIPTION_LIMIT: usize = 4096;

/// Zero-width space separating document sections
pub const DEFAULT_DELIMITER: &str = "\u{200b}";

pub const DEFAULT_TRIGGER: &str = "man!";

pub const DEFAULT_ARCHIVE_MINUTES: u16 = 60;

/// Auto-archive durations Discord accepts for threads, in minutes
const ARCHIVE_CHOICES: [u16; 4] = [60, 1440, 4320, 10080];

/// Bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token
    pub discord_token: String,

    /// Base URL of the man-page service, including its trailing slash
    pub man_server: String,

    /// First token that marks a message as a command
    pub trigger: String,

    /// Separator between document sections in a fetched body
    pub delimiter: String,

    /// Maximum characters per card description
    pub max_description: usize,

    /// Thread auto-archive duration in minutes
    pub thread_archive_minutes: u16,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    discord: RawDiscord,
    #[serde(default)]
    man: RawMan,
}

#[derive(Debug, Default, Deserialize)]
struct RawDiscord {
    token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMan {
    server: Option<String>,
    trigger: Option<String>,
    delimiter: Option<String>,
    max_description: Option<usize>,
    thread_archive_minutes: Option<u16>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        let discord_token = required(raw.discord.token, "discord.token")?;
        let man_server = required(raw.man.server, "man.server")?;

        let trigger = raw
            .man
            .trigger
            .unwrap_or_else(|| DEFAULT_TRIGGER.to_string());
        if trigger.is_empty() || trigger.contains(' ') {
            return Err(ConfigError::Invalid {
                key: "man.trigger",
                reason: "must be a single non-empty token".to_string(),
            });
        }

        let delimiter = raw
            .man
            .delimiter
            .unwrap_or_else(|| DEFAULT_DELIMITER.to_string());
        if delimiter.is_empty() {
            return Err(ConfigError::Invalid {
                key: "man.delimiter",
                reason: "must not be empty".to_string(),
            });
        }

        let max_description = raw.man.max_description.unwrap_or(CARD_DESCRIPTION_LIMIT);
        if max_description == 0 || max_description > CARD_DESCRIPTION_LIMIT {
            return Err(ConfigError::Invalid {
                key: "man.max_description",
                reason: format!("must be between 1 and {}", CARD_DESCRIPTION_LIMIT),
            });
        }

        let thread_archive_minutes = raw
            .man
            .thread_archive_minutes
            .unwrap_or(DEFAULT_ARCHIVE_MINUTES);
        if !ARCHIVE_CHOICES.contains(&thread_archive_minutes) {
            return Err(ConfigError::Invalid {
                key: "man.thread_archive_minutes",
                reason: format!("must be one of {:?}", ARCHIVE_CHOICES),
            });
        }

        Ok(Self {
            discord_token,
            man_server,
            trigger,
            delimiter,
            max_description,
            thread_archive_minutes,
        })
    }

    /// Config with defaults for everything but the required keys
    pub fn new(discord_token: &str, man_server: &str) -> Self {
        Self {
            discord_token: discord_token.to_string(),
            man_server: man_server.to_string(),
            trigger: DEFAULT_TRIGGER.to_string(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            max_description: CARD_DESCRIPTION_LIMIT,
            thread_archive_minutes: DEFAULT_ARCHIVE_MINUTES,
        }
    }
}

fn required(value: Option<String>, key: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [discord]
            token = "abc"

            [man]
            server = "http://localhost:8000/"
            "#,
        )
        .unwrap();

        assert_eq!(config.discord_token, "abc");
        assert_eq!(config.man_server, "http://localhost:8000/");
        assert_eq!(config.trigger, "man!");
        assert_eq!(config.delimiter, "\u{200b}");
        assert_eq!(config.max_description, 4096);
        assert_eq!(config.thread_archive_minutes, 60);
    }

    #[test]
    fn test_missing_token() {
        let err = Config::from_toml("[man]\nserver = \"http://x/\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Missing("discord.token")));
    }

    #[test]
    fn test_empty_server_counts_as_missing() {
        let err = Config::from_toml("[discord]\ntoken = \"t\"\n[man]\nserver = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Missing("man.server")));
    }

    #[test]
    fn test_invalid_archive_duration() {
        let err = Config::from_toml(
            "[discord]\ntoken = \"t\"\n[man]\nserver = \"http://x/\"\nthread_archive_minutes = 5\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "man.thread_archive_minutes",
                ..
            }
        ));
    }

    #[test]
    fn test_cap_above_discord_limit_rejected() {
        let err = Config::from_toml(
            "[discord]\ntoken = \"t\"\n[man]\nserver = \"http://x/\"\nmax_description = 5000\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "man.max_description", .. }));
    }

    #[test]
    fn test_custom_delimiter_and_trigger() {
        let config = Config::from_toml(
            "[discord]\ntoken = \"t\"\n[man]\nserver = \"http://x/\"\ntrigger = \"!man\"\ndelimiter = \"\\n\\n\"\n",
        )
        .unwrap();
        assert_eq!(config.trigger, "!man");
        assert_eq!(config.delimiter, "\n\n");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[discord]\ntoken = \"t\"\n[man]\nserver = \"http://x/\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.man_server, "http://x/");
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file("/nonexistent/manbot.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
