//! Send command - deliver the voice clip to a single chat

use super::require_token;
use crate::cache::HandleCache;
use crate::cli::args::SendArgs;
use crate::config::Config;
use crate::dispatch::{Delivery, DispatchFlow, Resource};
use crate::error::VoxResult;
use crate::remote::TelegramClient;
use console::style;
use std::path::Path;
use std::sync::Arc;

/// Execute the send command
pub async fn execute(args: SendArgs, config: &Config, cache_path: &Path) -> VoxResult<()> {
    let token = require_token(args.token)?;

    let resource = Resource::from_path(
        args.resource.unwrap_or_else(|| config.voice.resource.clone()),
        args.caption.unwrap_or_else(|| config.voice.caption.clone()),
    );

    let client = Arc::new(TelegramClient::new(&token, &config.bot)?);
    let cache = Arc::new(HandleCache::new(cache_path));
    let flow = DispatchFlow::new(cache, client, &config.voice.cached_suffix);

    match flow.deliver(args.chat, &resource).await? {
        Delivery::Cached { handle } => println!(
            "{} Sent {} from cached handle {}",
            style("✓").green(),
            style(&resource.key).cyan(),
            style(handle).dim()
        ),
        Delivery::Uploaded { handle, persisted } => {
            println!(
                "{} Uploaded {} as {}",
                style("✓").green(),
                style(&resource.key).cyan(),
                style(&handle).dim()
            );
            if !persisted {
                println!(
                    "{} Handle not saved to {}; the next send will upload again",
                    style("!").yellow(),
                    cache_path.display()
                );
            }
        }
    }

    Ok(())
}
