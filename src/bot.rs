//! Long-polling bot front end

use crate::config::Config;
use crate::dispatch::{Delivery, DispatchFlow, Resource};
use crate::error::VoxResult;
use crate::remote::telegram::{Message, Update};
use crate::remote::TelegramClient;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Commands the bot answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Voice,
}

impl BotCommand {
    /// Match a message text exactly against the known commands
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "/start" => Some(Self::Start),
            "/voice" => Some(Self::Voice),
            _ => None,
        }
    }
}

/// Bot state shared by all update handlers
pub struct Bot {
    client: Arc<TelegramClient>,
    flow: DispatchFlow<TelegramClient>,
    resource: Resource,
    greeting: String,
    poll_timeout_secs: u32,
    retry_delay: Duration,
}

impl Bot {
    /// Create a bot around an API client and handle cache flow
    pub fn new(client: Arc<TelegramClient>, flow: DispatchFlow<TelegramClient>, config: &Config) -> Self {
        Self {
            client,
            flow,
            resource: Resource::from_path(&config.voice.resource, &config.voice.caption),
            greeting: config.voice.greeting.clone(),
            poll_timeout_secs: config.bot.poll_timeout_secs,
            retry_delay: Duration::from_secs(config.bot.retry_delay_secs),
        }
    }

    /// Poll for updates until Ctrl-C, handling each in its own task
    pub async fn run(self: Arc<Self>) -> VoxResult<()> {
        let me = self.client.get_me().await?;
        info!(
            "Bot started as @{}",
            me.username.as_deref().unwrap_or(&me.first_name)
        );

        let mut offset = 0;
        loop {
            let updates = tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutting down");
                    return Ok(());
                }
                result = self.client.get_updates(offset, self.poll_timeout_secs) => result,
            };

            let updates = match updates {
                Ok(updates) => updates,
                Err(e) if e.is_retryable() => {
                    warn!("Polling failed: {}", e);
                    if sleep_or_shutdown(self.retry_delay, tokio::signal::ctrl_c()).await {
                        info!("Shutting down");
                        return Ok(());
                    }
                    continue;
                }
                Err(e) => {
                    error!("Polling rejected: {}", e);
                    return Err(e);
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);
                let bot = Arc::clone(&self);
                tokio::spawn(async move { bot.handle_update(update).await });
            }
        }
    }

    async fn handle_update(&self, update: Update) {
        let Some(message) = update.message else {
            return;
        };

        let username = message
            .from
            .as_ref()
            .and_then(|u| u.username.as_deref())
            .unwrap_or("unknown");

        match message.text.as_deref().and_then(BotCommand::parse) {
            Some(BotCommand::Start) => self.handle_start(&message).await,
            Some(BotCommand::Voice) => self.handle_voice(&message, username).await,
            None => {
                if let Some(text) = &message.text {
                    info!("[{}] {}", username, text);
                }
            }
        }
    }

    async fn handle_start(&self, message: &Message) {
        info!("User /start");
        if let Err(e) = self.client.send_message(message.chat.id, &self.greeting).await {
            warn!("Failed to send greeting: {}", e);
        }
    }

    async fn handle_voice(&self, message: &Message, username: &str) {
        info!("[{}] /voice", username);
        match self.flow.deliver(message.chat.id, &self.resource).await {
            Ok(Delivery::Cached { .. }) => debug!("Sent {} from cache", self.resource.key),
            Ok(Delivery::Uploaded { .. }) => debug!("Sent {} by upload", self.resource.key),
            Err(e) => warn!("Failed to send {}: {}", self.resource.key, e),
        }
    }
}

/// Sleep for `delay` unless `shutdown` completes first; true on shutdown
async fn sleep_or_shutdown<F: Future>(delay: Duration, shutdown: F) -> bool {
    tokio::select! {
        _ = shutdown => true,
        _ = tokio::time::sleep(delay) => false,
    }
}
