use std::path::PathBuf;

/// Slash commands offered for completion.
pub const COMMANDS: [&str; 9] = [
    "/key", "/login", "/upload", "/unload", "/preview", "/history", "/reset", "/help", "/quit",
];

/// One parsed line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A question for the model.
    Ask(String),
    /// Set (or clear, with `None`) the API key typed in by the user.
    SetKey(Option<String>),
    Login(String),
    Upload(PathBuf),
    Unload,
    Preview,
    History,
    Reset,
    Help,
    Quit,
    /// A known command used with the wrong arguments.
    Usage(&'static str),
    Unknown(String),
}

impl Command {
    /// Lines that may carry secrets are kept out of readline history.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Command::SetKey(_) | Command::Login(_))
    }
}

/// Parses a line. Returns `None` for blank input.
pub fn parse(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed == "quit" || trimmed == "exit" {
        return Some(Command::Quit);
    }

    if !trimmed.starts_with('/') {
        return Some(Command::Ask(trimmed.to_string()));
    }

    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (trimmed, ""),
    };

    let command = match name {
        "/key" => Command::SetKey((!rest.is_empty()).then(|| rest.to_string())),
        "/login" => Command::Login(rest.to_string()),
        "/upload" if rest.is_empty() => Command::Usage("/upload <PATH>"),
        "/upload" => Command::Upload(PathBuf::from(rest)),
        "/unload" => Command::Unload,
        "/preview" => Command::Preview,
        "/history" => Command::History,
        "/reset" => Command::Reset,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    };
    Some(command)
}
