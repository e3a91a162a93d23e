//! Manbot
//!
//! Discord bot that answers `man! [section] <command>` by fetching the page
//! from a man-page HTTP service and posting it as embed cards in a thread.
//!
//! # Architecture
//!
//! ```text
//! Discord gateway ──► Handler ──► Dispatcher ──► Resolver ──► Man server
//!   (serenity)                        │             (HTTP, sections 1-9)
//!                                     ├── Splitter (delimiter + 4096 cap)
//!                                     └── ThreadRenderer ──► thread + cards
//! ```

pub mod command;
pub mod config;
pub mod discord;
pub mod dispatcher;
pub mod error;
pub mod fetcher;
pub mod platform;
pub mod render;
pub mod resolver;
pub mod splitter;

pub use command::{Command, ParseOutcome};
pub use config::Config;
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::{BotError, ConfigError, FetchError, RenderError, ResolveError};
pub use fetcher::{FetchResponse, HttpFetcher, ManSource};
pub use platform::{ChatPlatform, IncomingMessage, MessageRef};
pub use render::{CardOutcome, ThreadRenderer};
pub use resolver::{Resolved, Resolver};
pub use splitter::Segment;
