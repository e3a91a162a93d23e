//! Discord Channel Implementation
//!
//! Uses the Discord gateway and REST API via the serenity crate.
//!
//! # Required intents
//!
//! - `GUILD_MESSAGES`: receive guild message events
//! - `MESSAGE_CONTENT`: read the command text (privileged, enable it in the
//!   developer portal)

use async_trait::async_trait;
use serenity::all::{
    AutoArchiveDuration, ChannelId, Client, Context, CreateEmbed, CreateMessage, CreateThread,
    EventHandler, GatewayIntents, Http, Message, MessageId, Ready,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::{BotError, RenderError};
use crate::fetcher::HttpFetcher;
use crate::platform::{ChatPlatform, IncomingMessage, MessageRef};
use crate::splitter::Segment;

/// `ChatPlatform` over serenity's REST client
pub struct DiscordPlatform {
    http: Arc<Http>,
    bot_id: u64,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>, bot_id: u64) -> Self {
        Self { http, bot_id }
    }
}

/// Map minutes to a duration Discord accepts
fn archive_duration(minutes: u16) -> AutoArchiveDuration {
    match minutes {
        1440 => AutoArchiveDuration::OneDay,
        4320 => AutoArchiveDuration::ThreeDays,
        10080 => AutoArchiveDuration::OneWeek,
        _ => AutoArchiveDuration::OneHour,
    }
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
    fn current_user_id(&self) -> u64 {
        self.bot_id
    }

    async fn reply(&self, channel_id: u64, text: &str) -> Result<(), RenderError> {
        ChannelId::new(channel_id)
            .say(&self.http, text)
            .await
            .map(|_| ())
            .map_err(|e| RenderError::Reply(e.to_string()))
    }

    async fn create_thread(
        &self,
        origin: MessageRef,
        name: &str,
        archive_minutes: u16,
    ) -> Result<u64, RenderError> {
        let builder = CreateThread::new(name).auto_archive_duration(archive_duration(archive_minutes));

        let thread = ChannelId::new(origin.channel_id)
            .create_thread_from_message(&self.http, MessageId::new(origin.message_id), builder)
            .await
            .map_err(|e| RenderError::ThreadCreation(e.to_string()))?;

        Ok(thread.id.get())
    }

    async fn post_card(&self, thread_id: u64, segment: &Segment) -> Result<(), RenderError> {
        let embed = CreateEmbed::new()
            .title(segment.title.as_str())
            .description(segment.description.as_str());

        ChannelId::new(thread_id)
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await
            .map(|_| ())
            .map_err(|e| RenderError::CardPost(e.to_string()))
    }
}

impl From<&Message> for IncomingMessage {
    fn from(msg: &Message) -> Self {
        Self {
            message_id: msg.id.get(),
            channel_id: msg.channel_id.get(),
            author_id: msg.author.id.get(),
            author_name: msg.author.name.clone(),
            content: msg.content.clone(),
        }
    }
}

/// Gateway event handler; each message event runs on its own task
pub struct Handler {
    dispatcher: Arc<Dispatcher<HttpFetcher>>,
}

impl Handler {
    pub fn new(dispatcher: Arc<Dispatcher<HttpFetcher>>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        let bot_id = ctx.cache.current_user().id.get();
        let platform = DiscordPlatform::new(ctx.http.clone(), bot_id);

        self.dispatcher
            .handle(&platform, &IncomingMessage::from(&msg))
            .await;
    }

    async fn ready(&self, _: Context, ready: Ready) {
        info!("Discord connected as {} ({})", ready.user.name, ready.user.id);
    }
}

/// Connect to the gateway and serve until Ctrl+C / SIGTERM
pub async fn run(config: &Config) -> Result<(), BotError> {
    let dispatcher = Arc::new(Dispatcher::from_config(config));
    let intents = GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler::new(dispatcher))
        .await
        .map_err(|e| BotError::Connection(e.to_string()))?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shard_manager.shutdown_all().await;
    });

    info!("Bot is now running. Press CTRL-C to exit.");
    client
        .start()
        .await
        .map_err(|e| BotError::Connection(e.to_string()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}
