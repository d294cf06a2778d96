//! CLI entrypoint for Abrazeq
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use abrazeq_application::{
    ChatService, ConversationLogger, NoConversationLogger, SessionManager,
};
use abrazeq_infrastructure::{ConfigLoader, GeminiChatGateway, JsonlConversationLogger};
use abrazeq_presentation::{ChatRepl, Cli, ConsoleFormatter};
use anyhow::{bail, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    info!("Starting Abrazeq");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    let api_key = config.resolve_api_key()?;
    let gemini_config = config.gemini_config(api_key)?;

    let mut session_config = config.session_config(cli.model.as_deref());
    if cli.no_search {
        session_config.search_grounding = false;
    }
    let model_name = session_config.model.to_string();

    // === Dependency Injection ===
    let gateway = Arc::new(GeminiChatGateway::new(gemini_config)?);
    let mut manager = SessionManager::new(gateway, session_config);
    manager.start_new_session();

    let transcript: Arc<dyn ConversationLogger> = match &config.log.transcript {
        Some(path) => match JsonlConversationLogger::new(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoConversationLogger),
        },
        None => Arc::new(NoConversationLogger),
    };

    let service = ChatService::new(manager, transcript);

    // Interactive mode: explicit --chat, or no prompt given
    if cli.chat || cli.prompt.is_none() {
        let mut repl = ChatRepl::new(service, model_name)
            .with_quiet(cli.quiet)
            .with_history_file(config.repl.history_file.clone().map(PathBuf::from));
        repl.run().await?;
        return Ok(());
    }

    let Some(prompt) = cli.prompt else {
        bail!("A prompt is required unless --chat is given");
    };
    let prompt = prompt.trim().to_string();
    if prompt.is_empty() {
        bail!("Prompt cannot be empty");
    }

    run_one_shot(service, &prompt).await
}

/// Send a single prompt, streaming the response to stdout.
async fn run_one_shot(mut service: ChatService, prompt: &str) -> Result<()> {
    let mut printed = 0usize;
    let outcome = service
        .send_message(prompt, |accumulated| {
            print!("{}", &accumulated[printed..]);
            let _ = std::io::stdout().flush();
            printed = accumulated.len();
        })
        .await?;

    let message = service.conversation().message(outcome.message_id());
    let Some(message) = message else {
        println!();
        return Ok(());
    };

    if !outcome.is_completed() {
        let tail = &message.content[printed.min(message.content.len())..];
        println!("{}", ConsoleFormatter::format_failure(tail));
        bail!("The response stream failed");
    }

    println!();
    if let Some(grounding) = &message.grounding {
        if let Some(sources) = ConsoleFormatter::format_sources(grounding) {
            println!();
            print!("{sources}");
        }
    }

    Ok(())
}
