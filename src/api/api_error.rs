use crate::error::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub(crate) struct APIError(anyhow::Error);

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let any_err = self.0;
        let (status, body) = match any_err.downcast_ref::<Error>() {
            Some(Error::MethodNotAllowed) => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
            }
            Some(Error::Unauthorized) => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            Some(Error::BodyTooLarge(_)) => (StatusCode::PAYLOAD_TOO_LARGE, any_err.to_string()),
            Some(Error::UpstreamDelivery { status, .. }) => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                any_err.to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal Server Error: {any_err}"),
            ),
        };
        (status, body).into_response()
    }
}

impl<E> From<E> for APIError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
