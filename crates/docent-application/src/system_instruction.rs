//! System instruction assembly.
//!
//! Renders the fixed grounding template around the context text. The output
//! is a pure function of the text and is rebuilt on every turn.

use docent_core::{DocentError, Result};
use minijinja::Environment;
use serde::Serialize;

/// Exact reply the model must give when the document lacks the answer.
pub const REFUSAL_SENTENCE: &str = "제공된 문서에 해당 내용이 없어 답변할 수 없습니다.";

const TEMPLATE_NAME: &str = "system_instruction.txt";

// `.txt` keeps minijinja's auto-escaping off so the reference text is embedded verbatim.
const TEMPLATE: &str = r#"You are a specialized assistant designed to answer questions solely based on the provided Reference Text.

*** INSTRUCTIONS ***
1.  **Reference Text Only**: You must strictly base your answer ONLY on the "Reference Text" provided below.
2.  **No Outside Knowledge**: Do not use any internal knowledge, common sense, or information not present in the Reference Text.
3.  **Admit Ignorance**: If the answer is not explicitly stated in the Reference Text, you MUST say "{{ refusal }}" (I cannot answer as the information is not in the provided document).
4.  **No Hallucinations**: Do not make up facts or attempt to infer information that is not clearly supported by the text.
5.  **Language**: Answer in {{ language }} unless requested otherwise by the user.

*** REFERENCE TEXT ***
{{ context_text }}

*** END OF REFERENCE TEXT ***
"#;

/// Typed input for the grounding template.
#[derive(Debug, Clone, Serialize)]
struct SystemInstructionRequest<'a> {
    context_text: &'a str,
    refusal: &'a str,
    language: &'a str,
}

/// Builds the system instruction that grounds the model in `context_text`.
pub fn assemble_system_instruction(context_text: &str) -> Result<String> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_template(TEMPLATE_NAME, TEMPLATE)
        .map_err(|e| DocentError::Template(e.to_string()))?;

    let request = SystemInstructionRequest {
        context_text,
        refusal: REFUSAL_SENTENCE,
        language: "Korean",
    };

    env.get_template(TEMPLATE_NAME)
        .and_then(|template| template.render(&request))
        .map_err(|e| DocentError::Template(e.to_string()))
}
