//! Command dispatcher
//!
//! Runs one inbound message through parse → resolve → split → render and
//! reports where the invocation ended.

use tracing::{info, warn};

use crate::command::{self, Command, ParseOutcome};
use crate::config::Config;
use crate::error::{RenderError, ResolveError};
use crate::fetcher::{HttpFetcher, ManSource};
use crate::platform::{ChatPlatform, IncomingMessage};
use crate::render::{CardOutcome, ThreadRenderer};
use crate::resolver::Resolver;
use crate::splitter;

/// Terminal state of one invocation
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Not a command, or our own message
    Ignored,
    /// Thread created; per-card results in posting order
    Rendered {
        section: String,
        cards: Vec<CardOutcome>,
    },
    /// Resolution failed and the user was told
    Replied(ResolveError),
    /// Thread could not be created; logged only
    ThreadFailed(RenderError),
}

pub struct Dispatcher<S> {
    trigger: String,
    delimiter: String,
    max_description: usize,
    resolver: Resolver<S>,
    renderer: ThreadRenderer,
}

impl Dispatcher<HttpFetcher> {
    /// Dispatcher backed by the configured man server
    pub fn from_config(config: &Config) -> Self {
        Self::new(config, HttpFetcher::new(&config.man_server))
    }
}

impl<S: ManSource> Dispatcher<S> {
    pub fn new(config: &Config, source: S) -> Self {
        Self {
            trigger: config.trigger.clone(),
            delimiter: config.delimiter.clone(),
            max_description: config.max_description,
            resolver: Resolver::new(source),
            renderer: ThreadRenderer::new(config.thread_archive_minutes),
        }
    }

    pub fn parse(&self, content: &str) -> ParseOutcome {
        command::parse(content, &self.trigger)
    }

    pub async fn handle<P: ChatPlatform + ?Sized>(
        &self,
        platform: &P,
        msg: &IncomingMessage,
    ) -> DispatchOutcome {
        if msg.author_id == platform.current_user_id() {
            return DispatchOutcome::Ignored;
        }

        let Command { section, name } = match self.parse(&msg.content) {
            ParseOutcome::Dispatch(cmd) => cmd,
            ParseOutcome::Ignored => return DispatchOutcome::Ignored,
        };

        info!("{}: {}", msg.author_name, msg.content);

        let resolved = match self.resolver.resolve(section.as_deref(), &name).await {
            Ok(resolved) => resolved,
            Err(e) => {
                if let Err(reply_err) = platform.reply(msg.channel_id, &e.user_message()).await {
                    warn!("Could not send error reply: {}", reply_err);
                }
                return DispatchOutcome::Replied(e);
            }
        };

        let segments = splitter::split(&resolved.body, &self.delimiter, self.max_description);

        match self
            .renderer
            .render(platform, msg.reference(), &resolved.section, &name, &segments)
            .await
        {
            Ok(cards) => {
                let failed = cards.iter().filter(|c| !c.is_posted()).count();
                info!(
                    "Rendered man {} {}: {} cards ({} failed)",
                    resolved.section,
                    name,
                    cards.len(),
                    failed
                );
                DispatchOutcome::Rendered {
                    section: resolved.section,
                    cards,
                }
            }
            Err(e) => DispatchOutcome::ThreadFailed(e),
        }
    }
}
