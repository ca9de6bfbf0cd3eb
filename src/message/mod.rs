//! Message formatting.
//!
//! Turns a classified [`Payload`] into the text handed to a
//! [`Notifier`][crate::notifier::Notifier]. In [`ParseMode::MarkdownV2`] every client supplied
//! value is [escaped][escape::escape] on its own immediately before it is inserted, while the
//! template around it (labels, emoji, code-span backticks) is written as-is.
//!
//! A DDNS update such as:
//!
//! ```json
//! { "location": "Singapore", "ipv4": { "addr": "1.2.3.4", "domains": "a.example" } }
//! ```
//!
//! is rendered as:
//!
//! ```text
//! 📶 DDNS update 📶
//! 🕒 `2024\-05\-01 20:00:00`
//!
//! 📍 Location: Singapore
//!
//! 🌐 IPv4
//! 📡 Address: `1\.2\.3\.4`
//! 🌍 Domains: a\.example
//! ```

pub mod escape;
pub mod payload;

pub use escape::escape;
pub use payload::{AddressInfo, DdnsUpdate, Payload};

use lazy_static::lazy_static;
use serde::Deserialize;
use std::borrow::Cow;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

lazy_static! {
    static ref TIMESTAMP_FORMATTER: &'static [time::format_description::FormatItem<'static>] =
        format_description!(version = 2, "[year]-[month]-[day] [hour]:[minute]:[second]");
}

const UPDATE_HEADER: &str = "📶 DDNS update 📶";

/// The Telegram parse mode messages are formatted for.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Strict markup. Client text is escaped and addresses are shown as code spans.
    #[default]
    MarkdownV2,
    /// Unformatted text, sent without a `parse_mode`.
    Plain,
}

impl ParseMode {
    /// The Bot API `parse_mode` value, if any.
    #[must_use]
    pub fn api_name(self) -> Option<&'static str> {
        match self {
            ParseMode::MarkdownV2 => Some("MarkdownV2"),
            ParseMode::Plain => None,
        }
    }
}

/// Text ready for delivery, along with the parse mode it was formatted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedText {
    pub text: String,
    pub parse_mode: ParseMode,
}

/// Renders [`Payload`]s as message text for one parse mode.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    parse_mode: ParseMode,
    timestamp: bool,
    utc_offset: UtcOffset,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            parse_mode: ParseMode::default(),
            timestamp: true,
            utc_offset: UtcOffset::UTC,
        }
    }
}

impl Formatter {
    /// A formatter for `parse_mode`, stamping DDNS updates in `utc_offset` when `timestamp` is set.
    #[must_use]
    pub fn new(parse_mode: ParseMode, timestamp: bool, utc_offset: UtcOffset) -> Self {
        Self {
            parse_mode,
            timestamp,
            utc_offset,
        }
    }

    /// Format `payload` using the current time for any timestamp line.
    #[must_use]
    pub fn format_now(&self, payload: &Payload) -> FormattedText {
        self.format(payload, OffsetDateTime::now_utc())
    }

    /// Format `payload`, stamping DDNS updates with `now` when timestamps are enabled.
    #[must_use]
    pub fn format(&self, payload: &Payload, now: OffsetDateTime) -> FormattedText {
        let text = match payload {
            Payload::Message(text) | Payload::Raw(text) => self.field(text).into_owned(),
            Payload::Update(update) => self.update_block(update, now),
            Payload::Opaque(value) => {
                let dump = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
                self.field(&dump).into_owned()
            }
        };
        FormattedText {
            text,
            parse_mode: self.parse_mode,
        }
    }

    // Sections are separated by one blank line; the block has no trailing newline.
    fn update_block(&self, update: &DdnsUpdate, now: OffsetDateTime) -> String {
        let mut heading = vec![UPDATE_HEADER.to_string()];
        if let Some(stamp) = self.timestamp(now) {
            heading.push(format!("🕒 {}", self.code(&stamp)));
        }

        let mut sections = vec![heading];
        if let Some(location) = non_empty(update.location.as_ref()) {
            sections.push(vec![format!("📍 Location: {}", self.field(location))]);
        }
        sections.extend(self.address_section("IPv4", update.ipv4.as_ref()));
        sections.extend(self.address_section("IPv6", update.ipv6.as_ref()));

        sections
            .iter()
            .map(|lines| lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn address_section(&self, family: &str, info: Option<&AddressInfo>) -> Option<Vec<String>> {
        let info = info?;
        let addr = non_empty(info.addr.as_ref())?;
        let mut lines = vec![
            format!("🌐 {family}"),
            format!("📡 Address: {}", self.code(addr)),
        ];
        if let Some(domains) = non_empty(info.domains.as_ref()) {
            lines.push(format!("🌍 Domains: {}", self.field(domains)));
        }
        if let Some(result) = non_empty(info.result.as_ref()) {
            lines.push(format!("✅ Result: {}", self.field(result)));
        }
        Some(lines)
    }

    fn timestamp(&self, now: OffsetDateTime) -> Option<String> {
        if !self.timestamp {
            return None;
        }
        now.to_offset(self.utc_offset)
            .format(&TIMESTAMP_FORMATTER)
            .map_err(|err| tracing::warn!("unable to format timestamp: {err}"))
            .ok()
    }

    fn field<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        match self.parse_mode {
            ParseMode::MarkdownV2 => Cow::Owned(escape(raw)),
            ParseMode::Plain => Cow::Borrowed(raw),
        }
    }

    fn code(&self, raw: &str) -> String {
        match self.parse_mode {
            ParseMode::MarkdownV2 => format!("`{}`", escape(raw)),
            ParseMode::Plain => raw.to_string(),
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}
