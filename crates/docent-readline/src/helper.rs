use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use unicode_width::UnicodeWidthStr;

use crate::command::COMMANDS;

/// Commands whose argument is a secret and is masked while typing. The mask
/// keeps the argument's column width so the cursor stays in place.
const MASKED: [&str; 2] = ["/key", "/login"];

fn argument_placeholder(command: &str) -> Option<&'static str> {
    match command {
        "/key" => Some(" [KEY]"),
        "/login" => Some(" <PASSWORD>"),
        "/upload" => Some(" <PATH>"),
        _ => None,
    }
}

/// Readline helper: slash-command completion, hints with argument
/// placeholders, and masking of typed credentials.
#[derive(Clone, Default)]
pub struct CliHelper;

impl CliHelper {
    pub fn new() -> Self {
        Self
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let typed = &line[..pos];
        if !typed.starts_with('/') || typed.contains(' ') {
            return Ok((0, Vec::new()));
        }

        let candidates = COMMANDS
            .iter()
            .filter(|name| name.starts_with(typed))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !line.starts_with('/') {
            return Borrowed(line);
        }

        match line.split_once(' ') {
            Some((name, secret)) if MASKED.contains(&name) => Owned(format!(
                "{} {}",
                name.bright_cyan(),
                "*".repeat(secret.width())
            )),
            _ => Owned(line.bright_cyan().to_string()),
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let typed = &line[..pos];
        if !typed.starts_with('/') || typed.contains(' ') {
            return None;
        }

        let name = COMMANDS.iter().find(|name| name.starts_with(typed))?;
        let rest = &name[typed.len()..];
        let placeholder = argument_placeholder(name).unwrap_or("");
        let hint = format!("{rest}{placeholder}");
        (!hint.is_empty()).then_some(hint)
    }
}

impl Validator for CliHelper {}
