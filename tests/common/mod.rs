#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    routing::post,
    Json, Router,
};
use http_body_util::BodyExt;
use learnchat::{
    openai::OpenAiClient,
    prompt::Variant,
    services::{chat::ChatService, remote::RemoteChat, ChatBackend},
    AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const QUIZ_ARGS: &str = r#"{
    "title": "Rust basics",
    "questions": [
        {"title": "Q1", "answers": [{"title": "A1", "feedback": "F1", "isCorrect": true}, {"title": "B1", "feedback": "G1", "isCorrect": false}]},
        {"title": "Q2", "answers": [{"title": "A2", "feedback": "F2", "isCorrect": true}, {"title": "B2", "feedback": "G2", "isCorrect": false}]},
        {"title": "Q3", "answers": [{"title": "A3", "feedback": "F3", "isCorrect": true}, {"title": "B3", "feedback": "G3", "isCorrect": false}]}
    ]
}"#;

pub const CHALLENGE_ARGS: &str = r#"{
    "title": "Adder",
    "description": "implement add",
    "files": [{"name": "index.js", "language": "javascript", "content": "function add(a,b){}"}]
}"#;

/// An OpenAI-compatible provider that answers every request with the same scripted reply
/// and records the request bodies it received.
#[derive(Clone)]
pub struct FakeProvider {
    pub url: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl FakeProvider {
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Value {
        self.requests().pop().expect("provider received no request")
    }
}

#[derive(Clone)]
struct Script {
    status: StatusCode,
    body: Value,
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn completions(
    State(script): State<Script>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    script.requests.lock().unwrap().push(body);
    (script.status, Json(script.body))
}

pub async fn spawn_provider(status: StatusCode, body: Value) -> FakeProvider {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(Script {
            status,
            body,
            requests: requests.clone(),
        });

    FakeProvider {
        url: format!("{}/v1", serve(app).await),
        requests,
    }
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("test server address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server crashed");
    });
    format!("http://{addr}")
}

pub fn text_completion(text: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [{
            "index": 0,
            "finish_reason": "stop",
            "message": {"role": "assistant", "content": text}
        }]
    })
}

pub fn tool_completion(name: &str, arguments: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [{
            "index": 0,
            "finish_reason": "tool_calls",
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": name, "arguments": arguments}
                }]
            }
        }]
    })
}

pub fn app(provider: &FakeProvider, variant: Variant) -> Router {
    let client = OpenAiClient::new("sk-test".to_string()).with_base_url(provider.url.clone());
    learnchat::router(AppState::new(
        ChatBackend::Local(ChatService::new(client, variant)),
        false,
    ))
}

/// An app whose UI forwards chat requests to `endpoint` over HTTP.
pub fn remote_app(endpoint: String) -> Router {
    learnchat::router(AppState::new(
        ChatBackend::Remote(RemoteChat::new(endpoint)),
        false,
    ))
}

/// An app whose UI forwards to an endpoint nobody listens on.
pub async fn unreachable_app() -> Router {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);

    remote_app(format!("http://{addr}/api/chat"))
}

pub async fn call(
    app: &Router,
    req: Request<Body>,
) -> (StatusCode, axum::http::HeaderMap, String) {
    let resp = app
        .clone()
        .oneshot(req)
        .await
        .expect("router should respond");
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    (status, headers, String::from_utf8_lossy(&bytes).into_owned())
}

pub fn json_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request build should succeed")
}

/// A UI request as htmx would send it for the given browser session.
pub fn htmx_post(uri: &str, session: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("HX-Request", "true")
        .header("cookie", format!("chat_session={session}"))
        .body(Body::from(body.to_string()))
        .expect("request build should succeed")
}
