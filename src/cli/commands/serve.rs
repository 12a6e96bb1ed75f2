//! Serve command - run the long-polling bot

use super::require_token;
use crate::bot::Bot;
use crate::cache::HandleCache;
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::dispatch::DispatchFlow;
use crate::error::VoxResult;
use crate::remote::TelegramClient;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: &Config, cache_path: &Path) -> VoxResult<()> {
    let token = require_token(args.token)?;

    let client = Arc::new(TelegramClient::new(&token, &config.bot)?);
    let cache = Arc::new(HandleCache::new(cache_path));
    info!("Using handle cache at {}", cache.path().display());

    let flow = DispatchFlow::new(cache, Arc::clone(&client), &config.voice.cached_suffix);
    let bot = Arc::new(Bot::new(client, flow, config));
    bot.run().await
}
