//! URL extraction from Telegram messages.
//!
//! A play request can carry its link in the message itself or in the message
//! it replies to. Which one wins is an explicit parameter: callers pick the
//! scan order instead of relying on an implicit preference.

use teloxide::types::{Message, MessageEntityKind};

/// Order in which a message and its reply target are scanned for a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    /// Only the message itself
    MessageOnly,
    /// The message first, then the message it replies to
    MessageThenReply,
    /// The replied-to message first, then the message itself
    ReplyThenMessage,
}

/// Returns the first URL found in the message (or its reply target).
///
/// Entities are taken from the message's entity list, falling back to the
/// caption entity list when the former is empty. The first `Url` or
/// `TextLink` entity wins: a text link yields its embedded URL, a plain URL
/// entity yields its text slice.
pub fn extract_url(message: &Message, order: SearchOrder) -> Option<String> {
    let candidates: Vec<&Message> = match order {
        SearchOrder::MessageOnly => vec![message],
        SearchOrder::MessageThenReply => match message.reply_to_message() {
            Some(replied) => vec![message, replied],
            None => vec![message],
        },
        SearchOrder::ReplyThenMessage => match message.reply_to_message() {
            Some(replied) => vec![replied, message],
            None => vec![message],
        },
    };

    candidates.into_iter().find_map(first_link)
}

fn first_link(message: &Message) -> Option<String> {
    let entities = match message.parse_entities() {
        Some(entities) if !entities.is_empty() => entities,
        _ => message.parse_caption_entities().unwrap_or_default(),
    };

    for entity in &entities {
        match entity.kind() {
            MessageEntityKind::TextLink { url } => return Some(url.to_string()),
            MessageEntityKind::Url => return Some(entity.text().to_string()),
            _ => {}
        }
    }
    None
}
