mod command;
mod display;
mod helper;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use docent_application::ChatUseCase;
use docent_core::gate::AccessGate;
use docent_core::session::{ConversationMessage, SessionState};
use docent_infrastructure::upload::read_upload;
use docent_infrastructure::{
    ConfigStorage, CredentialResolver, FileDocumentLoader, SecretServiceImpl,
};
use docent_interaction::GeminiGatewayFactory;

use command::Command;
use helper::CliHelper;

/// `--verbose` wins, then `RUST_LOG`, then warnings only.
fn log_directive(verbose: bool, rust_log: Option<String>) -> String {
    if verbose {
        return "debug".to_string();
    }
    rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "warn".to_string())
}

/// Notice shown instead of reading the file when upload is locked.
fn upload_refusal(state: &SessionState) -> Option<&'static str> {
    (!AccessGate::upload_allowed(state)).then_some(display::UPLOAD_ADMIN_ONLY)
}

#[derive(Parser)]
#[command(name = "docent")]
#[command(about = "Chat with an assistant that answers only from one reference document")]
#[command(version)]
struct Args {
    /// Default context document (overrides config.toml)
    #[arg(short, long, value_name = "PATH")]
    document: Option<PathBuf>,

    /// Gemini model identifier (overrides config.toml)
    #[arg(short, long)]
    model: Option<String>,

    /// Settings file (defaults to ~/.config/docent/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the docent REPL.
///
/// Every input line is one interaction: the context document is re-read and
/// questions run one blocking model call each.
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // .env may carry RUST_LOG, so it is read before the filter is built
    let dotenv = dotenvy::dotenv();

    let directive = log_directive(args.verbose, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match dotenv {
        Ok(path) => tracing::debug!("[Bootstrap] Loaded environment from {:?}", path),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("[Bootstrap] Ignoring unreadable .env: {}", e),
    }

    // ===== Backend Initialization =====
    let config_storage = match args.config {
        Some(path) => ConfigStorage::with_path(path),
        None => ConfigStorage::new()?,
    };
    let mut settings = config_storage.load().await?;
    if let Some(model) = args.model {
        settings.model = model;
    }
    if let Some(document) = args.document {
        settings.default_document = document.display().to_string();
    }
    tracing::info!(
        "[Bootstrap] model={} default_document={}",
        settings.model,
        settings.default_document
    );

    let mut gateways = GeminiGatewayFactory::new(settings.model.clone());
    if let Some(secs) = settings.request_timeout_secs {
        gateways = gateways.with_timeout(Duration::from_secs(secs))?;
    }

    let default_document = PathBuf::from(&settings.default_document);
    let credentials = CredentialResolver::new(Arc::new(SecretServiceImpl::new()));
    let chat = ChatUseCase::new(
        Arc::new(FileDocumentLoader::new(default_document.clone())),
        Arc::new(gateways),
        credentials,
    );
    let mut state = SessionState::new();

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    display::header();
    display::status(&chat.render(&state).await, &state, &default_document);

    // ===== Main REPL Loop =====
    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                display::error("Error", &err);
                break;
            }
        };

        let Some(command) = command::parse(&line) else {
            continue;
        };
        if !command.is_sensitive() {
            let _ = rl.add_history_entry(line.as_str());
        }

        match command {
            Command::Ask(question) => {
                display::message(&ConversationMessage::user(question.as_str()));
                println!("{}", display::GENERATING.bright_black());
                match chat.submit(&mut state, &question).await {
                    Ok(outcome) => display::reply(&outcome),
                    Err(err) => display::turn_error(&err),
                }
            }
            Command::SetKey(key) => {
                let cleared = key.is_none();
                chat.set_api_key(&mut state, key);
                let notice = if cleared {
                    "입력한 API 키를 삭제했습니다."
                } else {
                    "API 키가 설정되었습니다."
                };
                println!("{}", notice.green());
            }
            Command::Login(password) => {
                if !chat.login(&mut state, &password).await {
                    println!("{}", "관리자 암호가 올바르지 않습니다.".red());
                }
                display::status(&chat.render(&state).await, &state, &default_document);
            }
            Command::Upload(path) => {
                if let Some(notice) = upload_refusal(&state) {
                    println!("{}", notice.yellow());
                    continue;
                }
                match read_upload(&path).await {
                    Ok(upload) => match chat.attach_upload(&mut state, upload) {
                        Ok(()) => display::status(
                            &chat.render(&state).await,
                            &state,
                            &default_document,
                        ),
                        Err(err) => display::error("문서 업로드 실패", &err),
                    },
                    Err(err) => display::error("문서 업로드 실패", &err),
                }
            }
            Command::Unload => {
                if chat.remove_upload(&mut state) {
                    display::status(&chat.render(&state).await, &state, &default_document);
                } else {
                    println!("{}", "업로드된 문서가 없습니다.".bright_black());
                }
            }
            Command::Preview => display::preview(&chat.render(&state).await),
            Command::History => display::history(state.conversation.messages()),
            Command::Reset => {
                chat.reset(&mut state);
                println!("{}", "대화 기록을 초기화했습니다.".green());
            }
            Command::Help => display::help(),
            Command::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Command::Usage(usage) => println!("{}", format!("Usage: {usage}").yellow()),
            Command::Unknown(name) => {
                println!("{}", format!("Unknown command: {name}").bright_black())
            }
        }
    }

    Ok(())
}
