use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::models::SubmissionForm;

use super::{
    error::{user_err, ApiError, VALIDATION_FAILED},
    AppState,
};

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    success: bool,
    message: String,
    id: String,
}

/// Handles `POST /submissions` and `POST /api/submit`.
///
/// The body is read raw so that anything which is not a JSON object ends up as the
/// same client error as a form with missing fields.
pub async fn submit(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SubmitResponse>, ApiError> {
    let form = parse_form(&body)?;
    let accepted = state.intake.submit(&form).await?;

    Ok(Json(SubmitResponse {
        success: true,
        message: accepted.message.to_string(),
        id: accepted.id.to_string(),
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn parse_form(body: &[u8]) -> Result<SubmissionForm, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|err| {
        debug!("Unparseable submission body: {err}");
        user_err(VALIDATION_FAILED)
    })?;

    if !value.is_object() {
        debug!("Submission body is not an object");
        return Err(user_err(VALIDATION_FAILED));
    }

    serde_json::from_value(value).map_err(|err| {
        debug!("Unusable submission body: {err}");
        user_err(VALIDATION_FAILED)
    })
}

#[cfg(test)]
mod tests {
    use std::{net::SocketAddr, sync::Arc};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Bytes},
        extract::State,
        http::StatusCode,
        response::IntoResponse,
    };
    use serde_json::{json, Value};
    use test_log::test;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{TcpListener, TcpStream},
    };
    use tracing::debug;
    use uuid::Uuid;

    use super::submit;
    use crate::{
        http::{
            build_router,
            error::{PROCESSING_FAILED, VALIDATION_FAILED},
            AppState,
        },
        intake_service::{SubmissionIntake, ACCEPTED_MESSAGE},
        models::{Submission, SubmissionStatus},
        repository::{MemoryStore, StorageError, SubmissionRepository, SubmissionStore},
        utils::{SystemClock, UuidGenerator},
    };

    struct BrokenStore;

    #[async_trait]
    impl SubmissionStore for BrokenStore {
        async fn load(&self) -> Result<Vec<Submission>, StorageError> {
            Err(StorageError::Io {
                path: "/nowhere/submissions.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }

        async fn save(&self, _submissions: &[Submission]) -> Result<(), StorageError> {
            unreachable!("load always fails")
        }
    }

    fn state(store: Arc<dyn SubmissionStore>) -> AppState {
        AppState {
            intake: Arc::new(SubmissionIntake::new(
                Arc::new(SubmissionRepository::new(store)),
                Arc::new(SystemClock),
                Arc::new(UuidGenerator),
            )),
        }
    }

    async fn call(state: AppState, body: impl Into<Bytes>) -> (StatusCode, Value) {
        let response = submit(State(state), body.into()).await.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn example() -> Value {
        json!({
            "artistName": "DJ X",
            "trackTitle": "Night",
            "genre": "Jazz",
            "trackLink": "https://x.co/t",
            "email": "a@b.com",
        })
    }

    #[test(tokio::test)]
    async fn accepted_submission() {
        let store = Arc::new(MemoryStore::default());

        let (status, body) = call(state(store.clone()), example().to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["message"], json!(ACCEPTED_MESSAGE));

        let id = Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();
        let stored = store.snapshot().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id.0, id);
        assert_eq!(stored[0].status, SubmissionStatus::Pending);
    }

    #[test(tokio::test)]
    async fn missing_field() {
        let store = Arc::new(MemoryStore::default());
        let mut payload = example();
        payload["email"] = json!("");

        let (status, body) = call(state(store.clone()), payload.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": VALIDATION_FAILED }));
        assert!(store.snapshot().await.is_empty());
    }

    #[test(tokio::test)]
    async fn malformed_bodies_are_client_errors() {
        let store = Arc::new(MemoryStore::default());

        for body in ["", "{ nope", "[]", "\"DJ X\"", "null"] {
            let (status, response) = call(state(store.clone()), body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
            assert_eq!(response, json!({ "error": VALIDATION_FAILED }));
        }

        assert!(store.snapshot().await.is_empty());
    }

    #[test(tokio::test)]
    async fn storage_failure_is_opaque() {
        let (status, body) = call(state(Arc::new(BrokenStore)), example().to_string()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": PROCESSING_FAILED }));
    }

    async fn raw_request(addr: SocketAddr, method: &str, path: &str, body: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!(
            "{method} {path} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(request.as_bytes()).await.unwrap();

        // The server may reset the connection right after answering a refused request.
        let mut response = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            match stream.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => response.extend_from_slice(&buf[..n]),
                Err(err) if !response.is_empty() => {
                    debug!("Connection ended with {err}");
                    break;
                }
                Err(err) => panic!("Could not read response: {err}"),
            }
        }
        String::from_utf8(response).unwrap()
    }

    async fn serve(store: Arc<MemoryStore>, max_body_bytes: usize) -> SocketAddr {
        let app = build_router(state(store), max_body_bytes);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });
        addr
    }

    #[test(tokio::test)]
    async fn routes_over_http() {
        let store = Arc::new(MemoryStore::default());
        let addr = serve(store.clone(), 1024).await;

        let payload = example().to_string();

        let response = raw_request(addr, "POST", "/submissions", &payload).await;
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");

        let response = raw_request(addr, "POST", "/api/submit", &payload).await;
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");

        let response = raw_request(addr, "GET", "/health", "").await;
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(response.ends_with(r#"{"status":"ok"}"#), "{response}");

        assert_eq!(store.snapshot().await.len(), 2);
    }

    #[test(tokio::test)]
    async fn oversized_body_is_refused() {
        let store = Arc::new(MemoryStore::default());
        let addr = serve(store.clone(), 1024).await;

        let mut payload = example();
        payload["trackLink"] = json!(format!("https://x.co/{}", "t".repeat(2048)));
        let payload = payload.to_string();
        assert!(payload.len() > 1024);

        let response = raw_request(addr, "POST", "/submissions", &payload).await;

        assert!(response.starts_with("HTTP/1.1 413"), "{response}");
        assert!(store.snapshot().await.is_empty());
    }
}
