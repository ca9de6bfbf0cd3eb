use crate::api::api_error::APIError;
use crate::api::guard::{self, Verdict};
use crate::api::server::AppState;
use crate::error::Error;
use crate::message::Payload;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use http_body::{LengthLimitError, Limited};
use serde_json::{json, Value};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(health_check))
        .fallback(relay)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .with_state(state)
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    Json(json!({"ok":"healthy"}))
}

async fn relay(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<&'static str, APIError> {
    match guard::validate(request.method(), request.headers(), &state.config.secret_key) {
        Verdict::Accepted => {}
        Verdict::MethodRejected => {
            tracing::debug!("rejected {} {}", request.method(), request.uri());
            return Err(Error::MethodNotAllowed.into());
        }
        Verdict::Unauthorized => {
            tracing::debug!("rejected unauthorized request for {}", request.uri());
            return Err(Error::Unauthorized.into());
        }
    }

    let limit = state.config.max_body_bytes;
    let body = match hyper::body::to_bytes(Limited::new(request.into_body(), limit)).await {
        Ok(body) => body,
        Err(err) if err.is::<LengthLimitError>() => {
            tracing::debug!("rejected request body over {limit} bytes");
            return Err(Error::BodyTooLarge(limit).into());
        }
        Err(err) => return Err(anyhow::anyhow!(err).into()),
    };
    let value: Value = serde_json::from_slice(&body).map_err(Error::MalformedBody)?;
    let payload = Payload::from(value);
    let message = state.formatter.format_now(&payload);

    if let Err(err) = state.notifier.deliver(&message).await {
        tracing::warn!("{} delivery failed: {err}", payload.kind());
        return Err(err.into());
    }
    tracing::info!("delivered {} message", payload.kind());
    Ok("Message sent successfully")
}
