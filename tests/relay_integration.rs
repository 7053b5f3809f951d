//! End-to-end tests for the WebSocket turn relay
//!
//! Each test binds an ephemeral listener, connects a real WebSocket client
//! and drives the wire protocol.

use std::time::{Duration, Instant};

use axum::{body::Body, http::Request};
use futures_util::{SinkExt, StreamExt};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};
use tower::ServiceExt;

use profcode::core::{create_router, RelayConfig};
use profcode::types::ServerEnvelope;

const GREETING_REPLIES: &[&str] = &[
    "Hello there, brilliant student! 🎓 I'm Professor Code, your enthusiastic programming mentor!",
    "Welcome to the world of code! I'm Professor Code, and I'm absolutely thrilled to help you learn!",
    "Greetings, future programmer! Professor Code here, ready to make coding an adventure!",
];

type Ws = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Spawn a server on an ephemeral port; returns the ws URL and a router
/// clone sharing the same state for HTTP assertions.
async fn spawn_server(config: RelayConfig) -> (String, axum::Router) {
    let app = create_router(config);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let serve_app = app.clone();
    tokio::spawn(async move {
        axum::serve(listener, serve_app).await.unwrap();
    });
    (format!("ws://{}/ws", addr), app)
}

fn fast_config() -> RelayConfig {
    RelayConfig {
        response_delay: Duration::from_millis(20),
    }
}

async fn connect(url: &str) -> Ws {
    let (ws, _) = connect_async(url).await.unwrap();
    ws
}

async fn next_envelope(ws: &mut Ws) -> ServerEnvelope {
    loop {
        match ws.next().await.expect("stream ended").unwrap() {
            Message::Text(text) => return serde_json::from_str(&text).unwrap(),
            _ => continue,
        }
    }
}

async fn send_chat(ws: &mut Ws, content: &str) {
    let payload = format!(r#"{{"type":"chat","content":"{}"}}"#, content);
    ws.send(Message::Text(payload)).await.unwrap();
}

#[tokio::test]
async fn test_connection_envelope_arrives_first() {
    let (url, _) = spawn_server(fast_config()).await;
    let mut ws = connect(&url).await;

    match next_envelope(&mut ws).await {
        ServerEnvelope::Connection {
            message,
            personality,
            ..
        } => {
            assert_eq!(message, "Connected to Professor Code's Local Soul Engine!");
            assert_eq!(personality.name, "Professor Code");
        }
        other => panic!("expected connection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_chat_emits_monologue_then_greeting_reply() {
    let (url, _) = spawn_server(fast_config()).await;
    let mut ws = connect(&url).await;
    next_envelope(&mut ws).await; // connection

    send_chat(&mut ws, "hello professor").await;

    match next_envelope(&mut ws).await {
        ServerEnvelope::InternalMonologue { thought, .. } => assert!(!thought.is_empty()),
        other => panic!("expected internal_monologue first, got {:?}", other),
    }
    match next_envelope(&mut ws).await {
        ServerEnvelope::Response { message, .. } => {
            assert!(
                GREETING_REPLIES.contains(&message.as_str()),
                "reply not from the greeting bucket: {}",
                message
            );
        }
        other => panic!("expected response second, got {:?}", other),
    }
}

#[tokio::test]
async fn test_default_delay_separates_monologue_and_response() {
    let (url, _) = spawn_server(RelayConfig::default()).await;
    let mut ws = connect(&url).await;
    next_envelope(&mut ws).await;

    send_chat(&mut ws, "hello").await;

    let envelope = next_envelope(&mut ws).await;
    assert_eq!(envelope.kind(), "internal_monologue");
    let monologue_at = Instant::now();

    let envelope = next_envelope(&mut ws).await;
    assert_eq!(envelope.kind(), "response");
    let elapsed = monologue_at.elapsed();

    assert!(
        elapsed >= Duration::from_millis(1000),
        "response arrived after only {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_malformed_json_yields_one_error_and_keeps_connection() {
    let (url, _) = spawn_server(fast_config()).await;
    let mut ws = connect(&url).await;
    next_envelope(&mut ws).await;

    ws.send(Message::Text("this is not json".to_string()))
        .await
        .unwrap();

    match next_envelope(&mut ws).await {
        ServerEnvelope::Error { message } => assert_eq!(message, "Error processing message"),
        other => panic!("expected error, got {:?}", other),
    }

    // Exactly one envelope for the bad frame: nothing else shows up.
    let nothing = tokio::time::timeout(Duration::from_millis(300), next_envelope(&mut ws)).await;
    assert!(nothing.is_err(), "unexpected extra envelope: {:?}", nothing);

    // Connection still processes valid messages.
    send_chat(&mut ws, "hello again").await;
    assert_eq!(next_envelope(&mut ws).await.kind(), "internal_monologue");
    assert_eq!(next_envelope(&mut ws).await.kind(), "response");
}

#[tokio::test]
async fn test_get_state_returns_last_five_exchanges() {
    let (url, _) = spawn_server(fast_config()).await;
    let mut ws = connect(&url).await;
    next_envelope(&mut ws).await;

    for n in 0..7 {
        send_chat(&mut ws, &format!("message {}", n)).await;
        next_envelope(&mut ws).await; // monologue
        next_envelope(&mut ws).await; // response
    }

    ws.send(Message::Text(r#"{"type":"get_state"}"#.to_string()))
        .await
        .unwrap();

    match next_envelope(&mut ws).await {
        ServerEnvelope::State {
            current_thought,
            conversation_history,
            personality,
        } => {
            assert_eq!(personality.name, "Professor Code");
            assert!(!current_thought.is_empty());
            assert_eq!(conversation_history.len(), 5);
            assert_eq!(conversation_history[0].user, "message 2");
            assert_eq!(conversation_history[4].user, "message 6");
        }
        other => panic!("expected state, got {:?}", other),
    }
}

#[tokio::test]
async fn test_sessions_are_isolated_but_archive_is_shared() {
    let (url, app) = spawn_server(fast_config()).await;

    let mut a = connect(&url).await;
    let mut b = connect(&url).await;
    next_envelope(&mut a).await;
    next_envelope(&mut b).await;

    send_chat(&mut a, "hello from a").await;
    next_envelope(&mut a).await;
    next_envelope(&mut a).await;

    send_chat(&mut b, "code question from b").await;
    next_envelope(&mut b).await;
    next_envelope(&mut b).await;

    // B's state only contains B's exchange.
    b.send(Message::Text(r#"{"type":"get_state"}"#.to_string()))
        .await
        .unwrap();
    match next_envelope(&mut b).await {
        ServerEnvelope::State {
            conversation_history,
            ..
        } => {
            assert_eq!(conversation_history.len(), 1);
            assert_eq!(conversation_history[0].user, "code question from b");
        }
        other => panic!("expected state, got {:?}", other),
    }

    // The HTTP archive saw both conversations.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/history")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let history: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(history.as_array().unwrap().len(), 2);
}
