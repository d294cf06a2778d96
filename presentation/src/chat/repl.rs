//! REPL (Read-Eval-Print Loop) for interactive chat
//!
//! The loop awaits each turn before reading the next line, so only one
//! send is ever in flight — input is effectively disabled while the model
//! is streaming.

use crate::output::console::ConsoleFormatter;
use abrazeq_application::{ChatService, TurnOutcome};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::io::Write;
use std::path::PathBuf;

/// Interactive chat REPL
pub struct ChatRepl {
    service: ChatService,
    model: String,
    history_file: Option<PathBuf>,
    quiet: bool,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(service: ChatService, model: impl Into<String>) -> Self {
        Self {
            service,
            model: model.into(),
            history_file: None,
            quiet: false,
        }
    }

    /// Override the input-history file location
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    /// Suppress the welcome banner
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self
            .history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("abrazeq").join("history.txt")));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        if !self.quiet {
            print!("{}", ConsoleFormatter::welcome(&self.model));
        }

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Empty input is rejected here, before the session
                    // manager ever sees it.
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line, &mut rl) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    self.process_message(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("مع السلامة!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, cmd: &str, rl: &mut DefaultEditor) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("مع السلامة!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /new             - Start a new conversation (clears context)");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                false
            }
            "/new" => {
                let confirm = rl.readline("هل تريد بدء محادثة جديدة ومسح السياق الحالي؟ (y/n) ");
                if let Ok(answer) = confirm {
                    let answer = answer.trim().to_lowercase();
                    if answer == "y" || answer == "yes" || answer == "نعم" {
                        self.service.reset();
                        println!("بدأت محادثة جديدة.");
                    }
                }
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_message(&mut self, text: &str) {
        println!();
        print!("{} ", ConsoleFormatter::model_label());
        let _ = std::io::stdout().flush();

        // The callback receives the full accumulated text every time; the
        // terminal can't repaint, so print only the unseen suffix.
        let mut printed = 0usize;
        let result = self
            .service
            .send_message(text, |accumulated| {
                print!("{}", &accumulated[printed..]);
                let _ = std::io::stdout().flush();
                printed = accumulated.len();
            })
            .await;

        match result {
            Ok(outcome) => {
                self.print_turn_tail(&outcome, printed);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
        println!();
    }

    /// Print whatever the store holds beyond what streamed to the screen:
    /// nothing for a normal completion, the inline error marker for a
    /// failed turn. Then the citations, if the response was grounded.
    fn print_turn_tail(&self, outcome: &TurnOutcome, printed: usize) {
        let Some(message) = self.service.conversation().message(outcome.message_id()) else {
            return;
        };

        let tail = &message.content[printed.min(message.content.len())..];
        if !tail.is_empty() {
            if outcome.is_completed() {
                print!("{tail}");
            } else {
                print!("{}", ConsoleFormatter::format_failure(tail));
            }
        }
        println!();

        if let Some(grounding) = &message.grounding {
            if let Some(sources) = ConsoleFormatter::format_sources(grounding) {
                println!();
                print!("{sources}");
            }
        }
    }
}
