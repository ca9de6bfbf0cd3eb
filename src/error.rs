//! Error types.

/// Error enumerates the possible relay error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a client uses any HTTP method other than `POST` on the
    /// [relay endpoint][crate::api#relay-post].
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Returned when the `Authorization` header is missing, or isn't exactly
    /// `Bearer <secret_key>` for the configured
    /// [`Config::secret_key`][`crate::config::Config::secret_key`].
    #[error("unauthorized")]
    Unauthorized,

    /// Returned when an authorized request body is larger than
    /// [`Config::max_body_bytes`][`crate::config::Config::max_body_bytes`].
    #[error("request body exceeds {0} bytes")]
    BodyTooLarge(usize),

    /// Returned when an authorized request body is not valid JSON.
    #[error("{0}")]
    MalformedBody(#[source] serde_json::Error),

    /// Returned when the Telegram Bot API answers a delivery with a non-success status. The
    /// status and description are passed back to the caller unchanged.
    #[error("Telegram API error: {description}")]
    UpstreamDelivery { status: u16, description: String },

    /// Returned when the outbound request to the Telegram Bot API could not be completed.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Returned when a loaded [`Config`][`crate::config::Config`] fails validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when [trying to load a `Config`][crate::config::Config::try_from_file] fails
    /// due to invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}
