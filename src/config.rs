use crate::error::Error;
use crate::message::{Formatter, ParseMode};
use crate::notifier::{DynNotifier, InMemoryNotifier, TelegramNotifier};
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use time::UtcOffset;

pub type SharedConfig = Arc<Config>;

/// Environment variables that replace the matching config file value when set.
pub const SECRET_KEY_ENV: &str = "SECRET_KEY";
pub const BOT_TOKEN_ENV: &str = "BOT_TOKEN";
pub const CHAT_ID_ENV: &str = "CHAT_ID";

const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub api_bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub api_timeout: Duration,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: String,
    #[serde(default = "default_telegram_api_base")]
    pub telegram_api_base: String,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_upstream_timeout")]
    pub upstream_timeout: Duration,
    #[serde(default)]
    pub parse_mode: ParseMode,
    #[serde(default = "default_timestamp")]
    pub timestamp: bool,
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i8,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_telegram_api_base() -> String {
    DEFAULT_TELEGRAM_API_BASE.to_string()
}

fn default_upstream_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_timestamp() -> bool {
    true
}

fn default_utc_offset_hours() -> i8 {
    8
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

impl Config {
    /// Load a [`Config`] from the JSON file at the given path, apply environment overrides and
    /// validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the path can't be opened, [`Error::InvalidJSON`] if the content
    /// isn't a valid config, and [`Error::InvalidConfig`] if validation fails.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        Self::try_from_file_with(p, |key| std::env::var(key).ok())
    }

    /// Like [`Config::try_from_file`], taking overrides from `lookup` instead of the process
    /// environment.
    ///
    /// # Errors
    ///
    /// As [`Config::try_from_file`].
    pub fn try_from_file_with(
        p: impl AsRef<Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        let conf = conf.with_overrides(lookup);
        conf.validate()?;
        Ok(conf)
    }

    /// Replace the credentials and chat ID with any non-empty values returned by `lookup` for
    /// [`SECRET_KEY_ENV`], [`BOT_TOKEN_ENV`] and [`CHAT_ID_ENV`].
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        for (key, field) in [
            (SECRET_KEY_ENV, &mut self.secret_key),
            (BOT_TOKEN_ENV, &mut self.bot_token),
            (CHAT_ID_ENV, &mut self.chat_id),
        ] {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                tracing::debug!("{key} set from environment");
                *field = value;
            }
        }
        self
    }

    /// Check the config is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when the secret key is empty, when the bot token or chat
    /// ID is empty outside of dry run mode, or when the UTC offset is out of range.
    pub fn validate(&self) -> Result<(), Error> {
        // An empty secret would make a bare "Bearer " header a valid credential.
        if self.secret_key.is_empty() {
            return Err(Error::InvalidConfig("secret_key must not be empty".to_string()));
        }
        if !self.dry_run {
            if self.bot_token.is_empty() {
                return Err(Error::InvalidConfig(
                    "bot_token must not be empty unless dry_run is set".to_string(),
                ));
            }
            if self.chat_id.is_empty() {
                return Err(Error::InvalidConfig(
                    "chat_id must not be empty unless dry_run is set".to_string(),
                ));
            }
        }
        self.utc_offset()?;
        Ok(())
    }

    /// The timestamp offset from UTC.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `utc_offset_hours` is outside of -23..=23.
    pub fn utc_offset(&self) -> Result<UtcOffset, Error> {
        let hours = self.utc_offset_hours;
        if !(-23..=23).contains(&hours) {
            return Err(Error::InvalidConfig(format!(
                "utc_offset_hours {hours} out of range"
            )));
        }
        UtcOffset::from_hms(hours, 0, 0)
            .map_err(|err| Error::InvalidConfig(format!("utc_offset_hours {hours}: {err}")))
    }

    /// The [`Formatter`] described by this config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the UTC offset is out of range.
    pub fn formatter(&self) -> Result<Formatter, Error> {
        Ok(Formatter::new(
            self.parse_mode,
            self.timestamp,
            self.utc_offset()?,
        ))
    }

    /// The notifier messages should be delivered through: an [`InMemoryNotifier`] in dry run
    /// mode, a [`TelegramNotifier`] otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the HTTP client can't be built.
    pub fn notifier(&self) -> Result<DynNotifier, Error> {
        if self.dry_run {
            tracing::warn!("dry run: messages will be logged, not delivered");
            return Ok(Arc::new(InMemoryNotifier::default()));
        }
        Ok(Arc::new(TelegramNotifier::new(
            &self.telegram_api_base,
            &self.bot_token,
            &self.chat_id,
            self.upstream_timeout,
        )?))
    }
}
