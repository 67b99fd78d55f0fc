pub mod chat_usecase;
pub mod system_instruction;

pub use chat_usecase::{ChatUseCase, REMOTE_ERROR_PREFIX, RenderView, TurnOutcome};
pub use system_instruction::{REFUSAL_SENTENCE, assemble_system_instruction};
