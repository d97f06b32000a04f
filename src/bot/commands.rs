//! Text responders for the chat bot commands.

use crate::catalog::BranchDirectory;
use crate::constants::PLATFORMS;

/// Commands the bot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    List,
    Unknown,
}

impl Command {
    /// Parses the first word of a message; `None` for plain text that is not a command.
    ///
    /// Telegram appends the bot name in group chats (`/list@my_bot`), that suffix is ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);
        Some(match name.to_lowercase().as_str() {
            "start" => Command::Start,
            "list" => Command::List,
            _ => Command::Unknown,
        })
    }
}

pub fn welcome_text() -> String {
    "Hallo! Ich zeige dir, welche Spiele und Filme in den Leipziger Stadtbibliotheken \
     gerade ausleihbar sind.\n\n/list zeigt alle Bibliotheken und Plattformen."
        .to_string()
}

pub fn list_text(directory: &dyn BranchDirectory) -> String {
    let branches = directory
        .branches()
        .iter()
        .map(|b| format!("- {}", b.name))
        .collect::<Vec<_>>()
        .join("\n");
    let platforms = PLATFORMS
        .iter()
        .map(|p| format!("- {p}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Bibliotheken:\n{branches}\n\nPlattformen:\n{platforms}")
}

fn help_text() -> String {
    "Unbekannter Befehl. Verfügbar sind /start und /list.".to_string()
}

/// Reply to a message, `None` when the bot should stay silent
pub fn reply_for(text: &str, directory: &dyn BranchDirectory) -> Option<String> {
    let reply = match Command::parse(text)? {
        Command::Start => welcome_text(),
        Command::List => list_text(directory),
        Command::Unknown => help_text(),
    };
    Some(reply)
}
