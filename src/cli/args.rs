//! CLI argument definitions using clap derive

use crate::remote::ChatId;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Vox - voice clip bot with a persistent upload-handle cache
///
/// Uploads each voice clip once and re-sends it by the handle the Bot API
/// returned, across restarts.
#[derive(Parser, Debug)]
#[command(name = "vox")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "VOX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Handle cache file (overrides cache.path)
    #[arg(long, global = true, env = "VOX_CACHE")]
    pub cache: Option<PathBuf>,
}

impl Cli {
    /// Default log directive: serve reports activity at info, other commands stay quiet
    pub fn log_directive(&self) -> &'static str {
        match (self.verbose, &self.command) {
            (0, Commands::Serve(_)) | (1, _) => "vox=info",
            (0, _) => "vox=warn",
            _ => "vox=debug",
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bot, answering /start and /voice
    Serve(ServeArgs),

    /// Send the voice clip to one chat and exit
    Send(SendArgs),

    /// Inspect or edit the handle cache
    Cache(CacheArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Bot API token
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Arguments for the send command
#[derive(Parser, Debug)]
pub struct SendArgs {
    /// Target chat ID
    #[arg(long, allow_negative_numbers = true)]
    pub chat: ChatId,

    /// Clip to send (defaults to voice.resource)
    #[arg(short, long)]
    pub resource: Option<PathBuf>,

    /// Caption (defaults to voice.caption)
    #[arg(long)]
    pub caption: Option<String>,

    /// Bot API token
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cached handles
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the handle cached for a resource
    Get {
        /// Resource key (file name)
        key: String,
    },

    /// Record a handle for a resource
    Set {
        /// Resource key (file name)
        key: String,
        /// Handle issued by the remote service
        handle: String,
    },

    /// Forget the handle for a resource
    Remove {
        /// Resource key (file name)
        key: String,
    },

    /// Delete the cache file
    Clear,

    /// Show the cache file path
    Path,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for list command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn cli_parses_send() {
        let cli = Cli::parse_from(["vox", "send", "--chat", "-1001", "--resource", "clip.ogg"]);
        match cli.command {
            Commands::Send(args) => {
                assert_eq!(args.chat, -1001);
                assert_eq!(args.resource, Some(PathBuf::from("clip.ogg")));
                assert!(args.caption.is_none());
            }
            _ => panic!("expected Send command"),
        }
    }

    #[test]
    fn cli_parses_cache_set() {
        let cli = Cli::parse_from(["vox", "cache", "set", "clip.ogg", "ABC123"]);
        match cli.command {
            Commands::Cache(CacheArgs {
                action: CacheAction::Set { key, handle },
            }) => {
                assert_eq!(key, "clip.ogg");
                assert_eq!(handle, "ABC123");
            }
            _ => panic!("expected cache set"),
        }
    }

    #[test]
    fn cli_parses_cache_list_format() {
        let cli = Cli::parse_from(["vox", "cache", "list", "--format", "json"]);
        assert!(matches!(
            cli.command,
            Commands::Cache(CacheArgs {
                action: CacheAction::List {
                    format: OutputFormat::Json
                }
            })
        ));
    }

    #[test]
    #[serial]
    fn cli_global_cache_override() {
        let cli = Cli::parse_from(["vox", "cache", "path", "--cache", "/tmp/h.json"]);
        assert_eq!(cli.cache, Some(PathBuf::from("/tmp/h.json")));
    }

    #[test]
    #[serial]
    fn cli_cache_from_env() {
        std::env::set_var("VOX_CACHE", "/tmp/env-handles.json");
        let cli = Cli::parse_from(["vox", "cache", "list"]);
        std::env::remove_var("VOX_CACHE");

        assert_eq!(cli.cache, Some(PathBuf::from("/tmp/env-handles.json")));
    }

    #[test]
    fn cli_parses_config_default_action() {
        let cli = Cli::parse_from(["vox", "config"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigArgs { action: None })
        ));
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["vox", "cache", "path"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["vox", "-vv", "cache", "path"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn serve_logs_at_info_by_default() {
        let cli = Cli::parse_from(["vox", "serve"]);
        assert_eq!(cli.log_directive(), "vox=info");

        let cli = Cli::parse_from(["vox", "cache", "list"]);
        assert_eq!(cli.log_directive(), "vox=warn");

        let cli = Cli::parse_from(["vox", "-v", "cache", "list"]);
        assert_eq!(cli.log_directive(), "vox=info");

        let cli = Cli::parse_from(["vox", "-vv", "serve"]);
        assert_eq!(cli.log_directive(), "vox=debug");
    }
}
