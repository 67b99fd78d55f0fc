//! Terminal rendering of status, messages and errors.

use std::path::Path;

use colored::Colorize;
use docent_application::{RenderView, TurnOutcome};
use docent_core::DocentError;
use docent_core::document::DocumentSource;
use docent_core::session::{ConversationMessage, MessageRole, SessionState};

pub const TITLE: &str = "LOGOS 조명팀 chatbot";
pub const GENERATING: &str = "생성 중...";
pub const ADMIN_CONFIRMED: &str = "관리자 확인됨";
pub const UPLOAD_ADMIN_ONLY: &str = "파일 업로드는 관리자만 가능합니다. (기본 문서 사용)";
pub const NEED_DOCUMENT_HINT: &str = "문서를 업로드하면 대화를 시작할 수 있습니다.";

pub fn header() {
    println!("{}", format!("=== {TITLE} ===").bright_magenta().bold());
    println!(
        "{}",
        "Type a question, '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();
}

pub fn help() {
    let rows = [
        ("/key [KEY]", "Google API Key 입력 (생략하면 입력값 삭제)"),
        ("/login <PASSWORD>", "관리자 암호 (파일 업로드용)"),
        ("/upload <PATH>", "문서 업로드 (PDF/TXT/MD, 관리자 전용)"),
        ("/unload", "업로드 문서 제거 (기본 문서 사용)"),
        ("/preview", "로드된 텍스트 확인"),
        ("/history", "대화 기록 보기"),
        ("/reset", "대화 기록 초기화"),
        ("quit", "종료"),
    ];
    for (command, description) in rows {
        println!("  {} {}", format!("{command:<20}").bright_cyan(), description);
    }
}

/// Sidebar-equivalent status block for one render cycle.
pub fn status(view: &RenderView, state: &SessionState, default_document: &Path) {
    if state.admin_authenticated {
        println!("{}", ADMIN_CONFIRMED.green());
    } else {
        println!("{}", UPLOAD_ADMIN_ONLY.bright_black());
    }

    if let Some(err) = &view.load_error {
        let label = if state.upload.is_some() {
            "업로드 문서 로드 실패"
        } else {
            "기본 문서 로드 실패"
        };
        println!("{}", format!("{label}: {err}").red());
    }

    match &view.document {
        Some(doc) if !doc.is_empty() => match doc.source {
            DocumentSource::Uploaded => {
                println!(
                    "{}",
                    format!("새로운 문서 로드 완료! ({} 자)", doc.char_count()).green()
                );
            }
            DocumentSource::DefaultFile if state.admin_authenticated => {
                println!(
                    "{}",
                    format!(
                        "기본 문서 '{}'가 로드되었습니다. ({} 자)",
                        default_document.display(),
                        doc.char_count()
                    )
                    .bright_blue()
                );
            }
            DocumentSource::DefaultFile => {}
        },
        _ => println!("{}", NEED_DOCUMENT_HINT.yellow()),
    }

    if !view.api_key_present {
        println!("{}", "API 키가 필요합니다. '/key <KEY>'로 입력하세요.".yellow());
    }
    println!();
}

pub fn preview(view: &RenderView) {
    match &view.document {
        Some(doc) if !doc.is_empty() => {
            println!("{}", "로드된 텍스트 확인".bright_magenta());
            println!("{}", doc.preview());
        }
        _ => println!("{}", NEED_DOCUMENT_HINT.yellow()),
    }
}

pub fn message(message: &ConversationMessage) {
    match message.role {
        MessageRole::User => println!("{}", format!("> {}", message.content).green()),
        MessageRole::Assistant => {
            for line in message.content.lines() {
                println!("{}", line.bright_blue());
            }
        }
    }
}

pub fn history(messages: &[ConversationMessage]) {
    if messages.is_empty() {
        println!("{}", "(대화 기록 없음)".bright_black());
        return;
    }
    for entry in messages {
        message(entry);
        println!();
    }
}

pub fn reply(outcome: &TurnOutcome) {
    if outcome.error.is_some() {
        println!("{}", outcome.reply.red());
    } else {
        for line in outcome.reply.lines() {
            println!("{}", line.bright_blue());
        }
    }
    println!();
}

/// Maps a turn that never reached the model to a user-facing message.
pub fn turn_error(err: &DocentError) {
    let text = match err {
        DocentError::MissingCredential(_) => "API 키가 필요합니다.".to_string(),
        DocentError::MissingDocument => "먼저 문서를 업로드해주세요.".to_string(),
        other => format!("에러가 발생했습니다: {other}"),
    };
    eprintln!("{}", text.red());
}

pub fn error(context: &str, err: &dyn std::fmt::Display) {
    eprintln!("{}", format!("{context}: {err}").red());
}
