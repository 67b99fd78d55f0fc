//! Session-scoped conversation history.

use super::message::ConversationMessage;

/// Ordered, append-only sequence of conversation messages.
///
/// Insertion order is chat order. Individual messages are never reordered or
/// removed; the only way to drop messages is [`ConversationStore::clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationStore {
    messages: Vec<ConversationMessage>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message to the end of the sequence.
    pub fn append(&mut self, message: ConversationMessage) {
        self.messages.push(message);
    }

    /// Empties the sequence. Cleared messages are not recoverable.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Returns every message except the most recently appended one.
    ///
    /// The newest user message travels to the gateway as the separate
    /// "current input", so it must not also appear in the replayed history.
    pub fn history_excluding_last(&self) -> &[ConversationMessage] {
        match self.messages.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ConversationMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
