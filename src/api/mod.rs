//! HTTP API for relaying notifications to Telegram.
//!
//! # API Endpoints
//!
//! ## `/healthcheck` (GET)
//!
//!   Returns HTTP 200 (OK) and the JSON body `{"ok":"healthy"}` when the service is operational.
//!   No authorization is required.
//!
//! ## Relay (POST)
//!
//!   Every other path relays. Requests must use `POST`, otherwise HTTP 405 (Method Not Allowed)
//!   is returned. The `Authorization` header must be exactly `Bearer <secret_key>`, otherwise
//!   HTTP 401 (Unauthorized) is returned. Both checks happen before the body is read.
//!
//!   The body is JSON, for example a free-form message:
//!
//!   ```json
//!   { "message": "backup finished" }
//!   ```
//!
//!   or a DDNS update:
//!
//!   ```json
//!   {
//!     "location": "Singapore",
//!     "ipv4": { "addr": "1.2.3.4", "domains": "a.example", "result": "success" },
//!     "ipv6": { "addr": "2001:db8::1", "domains": "a.example" }
//!   }
//!   ```
//!
//!   A bare JSON string is relayed as-is, and any other JSON is relayed as a pretty-printed dump.
//!   See [`Payload`][crate::message::Payload] for the precedence between these shapes.
//!
//!   On delivery returns HTTP 200 (OK) with the body `Message sent successfully`. When Telegram
//!   refuses the message its status is returned with the body
//!   `Telegram API error: <description>`. Any other failure, including a body that isn't JSON,
//!   returns HTTP 500 with the body `Internal Server Error: <error>`.
//!
//!   ```bash
//!   ❯ curl -H 'Authorization: Bearer s3cret' --json '{"message":"hi"}' http://localhost:8787/
//!   Message sent successfully
//!   ```

mod api_error;
mod guard;
mod routes;
pub mod server;

pub use server::{from_listener, new};
