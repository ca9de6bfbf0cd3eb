//! Integration tests: deliver through `TelegramNotifier` to a fake Bot API served locally.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use notify_relay::error::Error;
use notify_relay::{Config, FormattedText, Notifier, ParseMode, TelegramNotifier};
use serde_json::{json, Value};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const TOKEN: &str = "123456-test";
const CHAT_ID: &str = "-100200300";

/// What the fake Bot API answers with, and what it has been sent.
#[derive(Clone)]
struct FakeBotApi {
    reply: (StatusCode, String),
    received: Arc<Mutex<Vec<Value>>>,
}

async fn send_message(State(api): State<FakeBotApi>, Json(body): Json<Value>) -> impl IntoResponse {
    api.received.lock().await.push(body);
    api.reply.clone()
}

fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let addr = listener.local_addr().expect("local_addr");
    let server = axum::Server::from_tcp(listener)
        .expect("from_tcp")
        .serve(router.into_make_service());
    tokio::spawn(server);
    addr
}

fn spawn_fake_api(status: StatusCode, body: &str) -> (String, Arc<Mutex<Vec<Value>>>) {
    let api = FakeBotApi {
        reply: (status, body.to_string()),
        received: Arc::default(),
    };
    let received = api.received.clone();
    let router = Router::new()
        .route(&format!("/bot{TOKEN}/sendMessage"), post(send_message))
        .with_state(api);
    (format!("http://{}", serve(router)), received)
}

fn notifier(api_base: &str) -> TelegramNotifier {
    TelegramNotifier::new(api_base, TOKEN, CHAT_ID, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn sends_chat_text_and_parse_mode() {
    let (api_base, received) = spawn_fake_api(StatusCode::OK, r#"{"ok":true,"result":{}}"#);
    let notifier = notifier(&api_base);

    notifier
        .deliver(&FormattedText {
            text: "hi\\!".to_string(),
            parse_mode: ParseMode::MarkdownV2,
        })
        .await
        .unwrap();
    notifier
        .deliver(&FormattedText {
            text: "hi!".to_string(),
            parse_mode: ParseMode::Plain,
        })
        .await
        .unwrap();

    assert_eq!(
        *received.lock().await,
        vec![
            json!({ "chat_id": CHAT_ID, "text": "hi\\!", "parse_mode": "MarkdownV2" }),
            json!({ "chat_id": CHAT_ID, "text": "hi!" }),
        ]
    );
}

#[tokio::test]
async fn upstream_error_is_surfaced() {
    let (api_base, received) = spawn_fake_api(
        StatusCode::BAD_REQUEST,
        r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
    );
    let err = notifier(&api_base)
        .deliver(&FormattedText {
            text: "hi".to_string(),
            parse_mode: ParseMode::MarkdownV2,
        })
        .await
        .unwrap_err();
    match err {
        Error::UpstreamDelivery {
            status,
            description,
        } => {
            assert_eq!(status, 400);
            assert_eq!(description, "Bad Request: chat not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(received.lock().await.len(), 1);
}

#[tokio::test]
async fn non_json_error_body_is_used_verbatim() {
    let (api_base, _) = spawn_fake_api(StatusCode::BAD_GATEWAY, "upstream unavailable");
    let err = notifier(&api_base)
        .deliver(&FormattedText {
            text: "hi".to_string(),
            parse_mode: ParseMode::Plain,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::UpstreamDelivery { status: 502, ref description } if description == "upstream unavailable"
    ));
}

#[tokio::test]
async fn relay_passes_upstream_status_through() {
    let (api_base, received) = spawn_fake_api(
        StatusCode::FORBIDDEN,
        r#"{"ok":false,"error_code":403,"description":"Forbidden: bot was blocked by the user"}"#,
    );
    let config: Config = serde_json::from_value(json!({
        "api_bind_addr": "127.0.0.1:0",
        "api_timeout": 5,
        "secret_key": "s3cret",
        "bot_token": TOKEN,
        "chat_id": CHAT_ID,
        "telegram_api_base": api_base,
        "timestamp": false,
    }))
    .unwrap();
    let config = Arc::new(config);
    let notifier = config.notifier().unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(notify_relay::api::from_listener(listener, config, notifier).unwrap());

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .bearer_auth("s3cret")
        .json(&json!({ "text": "ping" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::FORBIDDEN);
    assert_eq!(
        resp.text().await.unwrap(),
        "Telegram API error: Forbidden: bot was blocked by the user"
    );
    assert_eq!(
        *received.lock().await,
        vec![json!({ "chat_id": CHAT_ID, "text": "ping", "parse_mode": "MarkdownV2" })]
    );
}

#[tokio::test]
async fn unreachable_api_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let err = notifier(&format!("http://{addr}"))
        .deliver(&FormattedText {
            text: "hi".to_string(),
            parse_mode: ParseMode::Plain,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert!(!err.to_string().contains(TOKEN));
}
