//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for abrazeq
#[derive(Parser, Debug)]
#[command(name = "abrazeq")]
#[command(author, version, about = "Abrazeq - Arabic AI chat assistant in the terminal")]
#[command(long_about = r#"
Abrazeq chats in Arabic with a hosted generative model, streaming responses
into the terminal with optional web-search citations.

The API key is read from the GEMINI_API_KEY environment variable (the
variable name can be changed in the config file).

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./abrazeq.toml      Project-level config
3. ~/.config/abrazeq/config.toml   Global config

Example:
  abrazeq "اشرح لي مفهوم الملكية في لغة رست"
  abrazeq --chat
  abrazeq -m gemini-2.5-pro --no-search "لخص هذا النص"
"#)]
pub struct Cli {
    /// A single prompt to send (omit and use --chat for interactive mode)
    pub prompt: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Model to chat with
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Disable web-search augmentation for this run
    #[arg(long)]
    pub no_search: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the welcome banner
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
