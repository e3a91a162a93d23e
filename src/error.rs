//! Error types
//!
//! One enum per pipeline layer. Only `main` collapses them into `anyhow`.

use thiserror::Error;

/// Configuration could not be loaded. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing required config key `{0}`")]
    Missing(&'static str),

    #[error("Invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// The man-page service could not be reached.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },
}

/// Resolution of a command to a man page failed.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No manpage for {command} (section: {section:?})")]
    NotFound {
        section: Option<String>,
        command: String,
    },

    #[error("Man server fault ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("Unexpected status {status}: {body}")]
    UnknownStatus { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] FetchError),
}

impl ResolveError {
    /// Plain-text reply shown to the user in the source channel.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound {
                section: Some(section),
                command,
            } => format!("No manpage found for `{}` `{}`", section, command),
            Self::NotFound {
                section: None,
                command,
            } => format!("No manpage found for `{}`", command),
            Self::Server { .. } | Self::Transport(_) => "Internal server error".to_string(),
            Self::UnknownStatus { .. } => "Unknown error".to_string(),
        }
    }
}

/// Chat-platform failures while rendering.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("Thread creation failed: {0}")]
    ThreadCreation(String),

    #[error("Card post failed: {0}")]
    CardPost(String),

    #[error("Reply failed: {0}")]
    Reply(String),
}

/// Bot session errors. Fatal.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Connection failed: {0}")]
    Connection(String),
}
