use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Method};

/// The outcome of checking a request before its body is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    Accepted,
    MethodRejected,
    Unauthorized,
}

/// Accept only `POST` requests whose `Authorization` header is exactly `Bearer <secret>`.
///
/// The comparison is case sensitive on both the scheme and the token.
pub(crate) fn validate(method: &Method, headers: &HeaderMap, secret: &str) -> Verdict {
    if *method != Method::POST {
        return Verdict::MethodRejected;
    }
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    match token {
        Some(token) if token == secret => Verdict::Accepted,
        _ => Verdict::Unauthorized,
    }
}
