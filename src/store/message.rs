use crate::model::message::{Conversation, Message};
use crate::store::{StoreError, new_id};
use chrono::Utc;
use std::sync::RwLock;

/// Conversations and messages live under one lock so that appending a
/// message and refreshing the owning conversation's `last_message` happen
/// in a single critical section; no reader can observe one without the
/// other.
#[derive(Default)]
struct Board {
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
}

#[derive(Default)]
pub struct MessageBoard {
    inner: RwLock<Board>,
}

impl MessageBoard {
    pub fn with(conversations: Vec<Conversation>, messages: Vec<Message>) -> Self {
        MessageBoard {
            inner: RwLock::new(Board {
                conversations,
                messages,
            }),
        }
    }

    /// Newest activity first.
    pub fn conversations_for(&self, employee_id: &str) -> Vec<Conversation> {
        let board = self.inner.read().expect("message board poisoned");
        let mut conversations: Vec<Conversation> = board
            .conversations
            .iter()
            .filter(|c| c.involves(employee_id))
            .cloned()
            .collect();
        conversations.sort_by(|a, b| b.last_message.timestamp.cmp(&a.last_message.timestamp));
        conversations
    }

    /// Chronological order.
    pub fn messages_for(&self, conversation_id: &str) -> Vec<Message> {
        let board = self.inner.read().expect("message board poisoned");
        let mut messages: Vec<Message> = board
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        messages
    }

    /// Idempotent over the unordered participant pair: repeated calls with
    /// `(a, b)` or `(b, a)` return the same conversation. A fresh
    /// conversation is born with an opening message that doubles as its
    /// `last_message`.
    pub fn find_or_create(&self, a: &str, b: &str) -> Conversation {
        let mut board = self.inner.write().expect("message board poisoned");
        if let Some(existing) = board
            .conversations
            .iter()
            .find(|c| c.involves(a) && c.involves(b))
        {
            return existing.clone();
        }

        let conversation_id = new_id();
        let opener = Message {
            id: new_id(),
            conversation_id: conversation_id.clone(),
            sender_id: a.to_owned(),
            content: "Conversation started.".to_owned(),
            timestamp: Utc::now(),
        };
        let conversation = Conversation {
            id: conversation_id,
            participant_ids: [a.to_owned(), b.to_owned()],
            last_message: opener.clone(),
        };
        board.messages.push(opener);
        board.conversations.push(conversation.clone());
        conversation
    }

    pub fn send(
        &self,
        conversation_id: &str,
        sender_id: &str,
        content: &str,
    ) -> Result<Message, StoreError> {
        let mut board = self.inner.write().expect("message board poisoned");
        let position = board
            .conversations
            .iter()
            .position(|c| c.id == conversation_id)
            .ok_or(StoreError::NotFound)?;

        let message = Message {
            id: new_id(),
            conversation_id: conversation_id.to_owned(),
            sender_id: sender_id.to_owned(),
            content: content.to_owned(),
            timestamp: Utc::now(),
        };
        board.messages.push(message.clone());
        board.conversations[position].last_message = message.clone();
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_or_create_is_idempotent_over_unordered_pairs() {
        let board = MessageBoard::default();
        let first = board.find_or_create("6", "10");
        let second = board.find_or_create("10", "6");
        assert_eq!(first.id, second.id);
        assert_eq!(board.conversations_for("6").len(), 1);
        assert_eq!(board.conversations_for("10").len(), 1);
    }

    #[test]
    fn fresh_conversation_opens_with_its_last_message() {
        let board = MessageBoard::default();
        let conversation = board.find_or_create("6", "10");
        let messages = board.messages_for(&conversation.id);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, conversation.last_message.id);
    }

    #[test]
    fn send_refreshes_last_message() {
        let board = MessageBoard::default();
        let conversation = board.find_or_create("6", "10");

        let sent = board
            .send(&conversation.id, "6", "I wanted to ask about the timeline.")
            .unwrap();

        let listed = board.conversations_for("6");
        assert_eq!(listed[0].last_message.id, sent.id);
        let messages = board.messages_for(&conversation.id);
        assert_eq!(messages.last().unwrap().id, sent.id);
    }

    #[test]
    fn send_into_unknown_conversation_reports_not_found() {
        let board = MessageBoard::default();
        assert_eq!(
            board.send("ghost", "6", "hello?").unwrap_err(),
            StoreError::NotFound
        );
    }
}
