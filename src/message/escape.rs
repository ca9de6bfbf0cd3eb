//! Escaping for Telegram's `MarkdownV2` parse mode.
//!
//! The Bot API rejects a `MarkdownV2` message outright when a reserved character appears
//! unescaped outside of the markup it introduces, so every piece of client supplied text must go
//! through [`escape`] exactly once before it is spliced into a message template.

/// Characters that must be preceded by a backslash in `MarkdownV2` text.
pub const RESERVED: [char; 19] = [
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

/// Escape `raw` for literal display in a `MarkdownV2` message.
///
/// Only apply this to raw client text. Escaping already escaped text produces visible
/// backslashes in the delivered message.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len() + raw.len() / 4);
    for c in raw.chars() {
        if RESERVED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
