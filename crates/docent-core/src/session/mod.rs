//! Session domain module.
//!
//! # Module Structure
//!
//! - `message`: Conversation message types (`MessageRole`, `ConversationMessage`)
//! - `store`: Append-only conversation history (`ConversationStore`)
//! - `state`: Per-session context object (`SessionState`)
//!
//! # Usage
//!
//! ```ignore
//! use docent_core::session::{ConversationMessage, ConversationStore, SessionState};
//! ```

mod message;
mod state;
mod store;

// Re-export public API
pub use message::{ConversationMessage, MessageRole};
pub use state::SessionState;
pub use store::ConversationStore;
