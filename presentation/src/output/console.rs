//! Console output formatter for chat turns

use abrazeq_domain::{GroundingMetadata, Message, Role};
use colored::Colorize;

/// Formats chat output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Welcome banner for interactive mode.
    pub fn welcome(model: &str) -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str("╭─────────────────────────────────────────────╮\n");
        output.push_str("│          Abrazeq — مساعدك الذكي             │\n");
        output.push_str("╰─────────────────────────────────────────────╯\n");
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Model:".cyan().bold(), model));
        output.push('\n');
        output.push_str("Commands:\n");
        output.push_str("  /help     - Show this help\n");
        output.push_str("  /new      - Start a new conversation\n");
        output.push_str("  /quit     - Exit chat\n");
        output.push('\n');
        output
    }

    /// Label shown before a streamed model response.
    pub fn model_label() -> String {
        format!("{}", "Abrazeq:".green().bold())
    }

    /// One finished message, label plus content.
    pub fn format_message(message: &Message) -> String {
        let label = match message.role {
            Role::User => "You:".cyan().bold(),
            Role::Model => "Abrazeq:".green().bold(),
        };
        format!("{} {}", label, message.content)
    }

    /// Numbered citation list for a grounded response; `None` when there
    /// is nothing to show.
    pub fn format_sources(grounding: &GroundingMetadata) -> Option<String> {
        let sources: Vec<_> = grounding.web_sources().collect();
        if sources.is_empty() {
            return None;
        }

        let mut output = String::new();
        output.push_str(&format!("{}\n", "المصادر:".yellow().bold()));
        for (index, source) in sources.iter().enumerate() {
            let title = if source.title.is_empty() {
                source.uri.as_str()
            } else {
                source.title.as_str()
            };
            output.push_str(&format!(
                "  {}. {} — {}\n",
                index + 1,
                title,
                source.uri.dimmed()
            ));
        }
        Some(output)
    }

    /// Styled rendering of a failed turn's tail.
    pub fn format_failure(text: &str) -> String {
        format!("{}", text.red())
    }
}
