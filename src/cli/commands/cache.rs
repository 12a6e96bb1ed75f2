//! Cache command - inspect or edit the handle cache

use crate::cache::{HandleCache, HandleStore};
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::error::{VoxError, VoxResult};
use console::style;
use std::path::Path;

/// Execute the cache command
pub async fn execute(args: CacheArgs, cache_path: &Path) -> VoxResult<()> {
    let cache = HandleCache::new(cache_path);

    match args.action {
        CacheAction::List { format } => list_handles(&cache, format).await,
        CacheAction::Get { key } => get_handle(&cache, &key).await,
        CacheAction::Set { key, handle } => set_handle(&cache, key, handle).await,
        CacheAction::Remove { key } => remove_handle(&cache, &key).await,
        CacheAction::Clear => clear_cache(&cache).await,
        CacheAction::Path => {
            println!("{}", cache.path().display());
            Ok(())
        }
    }
}

/// Read the store, warning about (but tolerating) unreadable or corrupt files
async fn read_tolerant(cache: &HandleCache) -> HandleStore {
    match cache.read().await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{} {}", style("Warning:").yellow(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            HandleStore::new()
        }
    }
}

async fn list_handles(cache: &HandleCache, format: OutputFormat) -> VoxResult<()> {
    let store = read_tolerant(cache).await;

    match format {
        OutputFormat::Table => print_table(&store),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&store)?),
        OutputFormat::Plain => {
            for (key, handle) in store.iter() {
                println!("{key}\t{handle}");
            }
        }
    }

    Ok(())
}

fn print_table(store: &HandleStore) {
    if store.is_empty() {
        println!("No cached handles.");
        return;
    }

    println!(
        "{:<32} {}",
        style("RESOURCE").bold(),
        style("HANDLE").bold()
    );
    println!("{}", "-".repeat(72));

    for (key, handle) in store.iter() {
        println!("{:<32} {}", style(key).cyan(), handle);
    }

    println!();
    println!("Total: {} handle(s)", store.len());
}

async fn get_handle(cache: &HandleCache, key: &str) -> VoxResult<()> {
    let store = read_tolerant(cache).await;
    let handle = store
        .lookup(key)
        .ok_or_else(|| VoxError::User(format!("No handle cached for {key}")))?;
    println!("{handle}");
    Ok(())
}

async fn set_handle(cache: &HandleCache, key: String, handle: String) -> VoxResult<()> {
    let mut store = read_tolerant(cache).await;
    let previous = store.store(key.clone(), handle);
    cache.write(&store).await?;

    match previous {
        Some(old) => println!(
            "{} Replaced handle for {} (was {})",
            style("✓").green(),
            style(&key).cyan(),
            style(old).dim()
        ),
        None => println!("{} Cached handle for {}", style("✓").green(), style(&key).cyan()),
    }
    Ok(())
}

async fn remove_handle(cache: &HandleCache, key: &str) -> VoxResult<()> {
    let mut store = read_tolerant(cache).await;

    if store.remove(key).is_none() {
        println!("{} No handle cached for {}", style("!").yellow(), style(key).cyan());
        return Ok(());
    }

    cache.write(&store).await?;
    println!("{} Removed handle for {}", style("✓").green(), style(key).cyan());
    Ok(())
}

async fn clear_cache(cache: &HandleCache) -> VoxResult<()> {
    cache.clear().await?;
    println!(
        "{} Cleared handle cache {}",
        style("✓").green(),
        cache.path().display()
    );
    Ok(())
}
