//! HTTP client adapters against live loopback servers.
//!
//! Each test binds an axum router on 127.0.0.1:0 and points a reqwest-based
//! adapter at it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use secrecy::Secret;
use serde_json::{json, Value};

use kabiraj_assistant::adapters::ai::{HttpAIResponder, HttpAIResponderConfig};
use kabiraj_assistant::adapters::search::{HttpDoctorSearch, HttpDoctorSearchConfig};
use kabiraj_assistant::adapters::web_search::{TravilyConfig, TravilyWebSearch};
use kabiraj_assistant::domain::conversation::ConversationTurn;
use kabiraj_assistant::domain::location::Coordinates;
use kabiraj_assistant::domain::specialty::Specialty;
use kabiraj_assistant::ports::{
    AIError, AIRequest, AIResponder, DoctorSearch, SearchError, SearchQuery, WebSearchError,
    WebSearchProvider,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Serves `router` on an ephemeral port and returns its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[derive(Clone, Default)]
struct Recorder {
    requests: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
    hits: Arc<AtomicUsize>,
}

impl Recorder {
    fn record(&self, headers: HeaderMap, body: Value) -> usize {
        self.requests.lock().unwrap().push((headers, body));
        self.hits.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn last(&self) -> (HeaderMap, Value) {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

/// Router answering every POST with the response `reply` builds from the
/// 1-based attempt number.
fn scripted<F>(path: &str, recorder: Recorder, reply: F) -> Router
where
    F: Fn(usize) -> axum::response::Response + Clone + Send + Sync + 'static,
{
    Router::new().route(
        path,
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let recorder = recorder.clone();
            let reply = reply.clone();
            async move { reply(recorder.record(headers, body)) }
        }),
    )
}

fn ai_request() -> AIRequest {
    AIRequest::new(
        "I have a headache",
        vec![
            ConversationTurn::bot("Hello!"),
            ConversationTurn::user("I have a headache"),
        ],
    )
}

fn fast_responder(base: &str, max_retries: u32) -> HttpAIResponder {
    let config = HttpAIResponderConfig::new(format!("{}/ai-chat", base))
        .with_api_key(Secret::new("anon-key".to_string()))
        .with_max_retries(max_retries)
        .with_backoff_base(Duration::from_millis(5));
    HttpAIResponder::new(config).unwrap()
}

// =============================================================================
// HttpAIResponder
// =============================================================================

#[tokio::test]
async fn ai_request_carries_history_and_keys() {
    let recorder = Recorder::default();
    let base = serve(scripted("/ai-chat", recorder.clone(), |_| {
        Json(json!({"response": "Please see a Neurologist."})).into_response()
    }))
    .await;

    let reply = fast_responder(&base, 0).respond(ai_request()).await.unwrap();

    assert_eq!(reply, "Please see a Neurologist.");
    let (headers, body) = recorder.last();
    assert_eq!(headers["authorization"], "Bearer anon-key");
    assert_eq!(headers["apikey"], "anon-key");
    assert_eq!(
        body,
        json!({
            "message": "I have a headache",
            "conversation": [
                {"text": "Hello!", "sender": "bot"},
                {"text": "I have a headache", "sender": "user"}
            ]
        })
    );
}

#[tokio::test]
async fn ai_server_errors_are_retried() {
    let recorder = Recorder::default();
    let base = serve(scripted("/ai-chat", recorder.clone(), |attempt| {
        if attempt < 3 {
            (StatusCode::SERVICE_UNAVAILABLE, "warming up").into_response()
        } else {
            Json(json!({"response": "Drink water."})).into_response()
        }
    }))
    .await;

    let reply = fast_responder(&base, 2).respond(ai_request()).await.unwrap();

    assert_eq!(reply, "Drink water.");
    assert_eq!(recorder.hits(), 3);
}

#[tokio::test]
async fn ai_gives_up_after_max_retries() {
    let recorder = Recorder::default();
    let base = serve(scripted("/ai-chat", recorder.clone(), |_| {
        (StatusCode::BAD_GATEWAY, "down").into_response()
    }))
    .await;

    let err = fast_responder(&base, 1).respond(ai_request()).await.unwrap_err();

    assert!(matches!(err, AIError::Unavailable { .. }));
    assert_eq!(recorder.hits(), 2);
}

#[tokio::test]
async fn ai_auth_failure_is_not_retried() {
    let recorder = Recorder::default();
    let base = serve(scripted("/ai-chat", recorder.clone(), |_| {
        StatusCode::UNAUTHORIZED.into_response()
    }))
    .await;

    let err = fast_responder(&base, 3).respond(ai_request()).await.unwrap_err();

    assert!(matches!(err, AIError::AuthenticationFailed));
    assert_eq!(recorder.hits(), 1);
}

#[tokio::test]
async fn ai_rate_limit_reads_retry_after() {
    let base = serve(scripted("/ai-chat", Recorder::default(), |_| {
        (StatusCode::TOO_MANY_REQUESTS, [("retry-after", "7")], "slow down").into_response()
    }))
    .await;

    let err = fast_responder(&base, 0).respond(ai_request()).await.unwrap_err();

    assert!(matches!(err, AIError::RateLimited { retry_after_secs: 7 }));
}

#[tokio::test]
async fn ai_client_error_is_rejected() {
    let base = serve(scripted("/ai-chat", Recorder::default(), |_| {
        (StatusCode::BAD_REQUEST, "bad message").into_response()
    }))
    .await;

    let err = fast_responder(&base, 2).respond(ai_request()).await.unwrap_err();

    assert!(matches!(err, AIError::Rejected { status: 400, .. }));
}

#[tokio::test]
async fn ai_blank_reply_is_a_parse_error() {
    let base = serve(scripted("/ai-chat", Recorder::default(), |_| {
        Json(json!({"response": "   "})).into_response()
    }))
    .await;

    let err = fast_responder(&base, 0).respond(ai_request()).await.unwrap_err();

    assert!(matches!(err, AIError::Parse(_)));
}

// =============================================================================
// HttpDoctorSearch
// =============================================================================

fn search_client(base: &str) -> HttpDoctorSearch {
    HttpDoctorSearch::new(HttpDoctorSearchConfig::new(format!("{}/search-doctors", base))).unwrap()
}

fn neurologist_query() -> SearchQuery {
    SearchQuery::new(Specialty::Neurologist, Coordinates::new(12.9, 77.6).unwrap())
}

#[tokio::test]
async fn doctor_search_posts_query_and_fills_missing_images() {
    let recorder = Recorder::default();
    let base = serve(scripted("/search-doctors", recorder.clone(), |_| {
        Json(json!({
            "doctors": [
                {
                    "id": "k3x9a1zq",
                    "name": "Asha Rao",
                    "specialty": "Neurologist",
                    "address": "221 MG Road, Ashok Nagar, Bangalore",
                    "distance": "Nearby"
                },
                {
                    "id": "p0m2b7cc",
                    "name": "Vikram Shah",
                    "specialty": "Neurologist",
                    "image": "https://img.example/vikram.png"
                }
            ]
        }))
        .into_response()
    }))
    .await;

    let doctors = search_client(&base).search(neurologist_query()).await.unwrap();

    let (_, body) = recorder.last();
    assert_eq!(
        body,
        json!({"specialty": "Neurologist", "location": {"latitude": 12.9, "longitude": 77.6}})
    );
    assert_eq!(doctors.len(), 2);
    assert!(doctors[0].image.contains("name=Asha%20Rao"));
    assert_eq!(doctors[1].image, "https://img.example/vikram.png");
}

#[tokio::test]
async fn doctor_search_without_doctors_field_is_empty() {
    let base = serve(scripted("/search-doctors", Recorder::default(), |_| {
        Json(json!({})).into_response()
    }))
    .await;

    let doctors = search_client(&base).search(neurologist_query()).await.unwrap();

    assert!(doctors.is_empty());
}

#[tokio::test]
async fn doctor_search_surfaces_service_error_message() {
    let base = serve(scripted("/search-doctors", Recorder::default(), |_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing required parameters: specialty and location"})),
        )
            .into_response()
    }))
    .await;

    let err = search_client(&base).search(neurologist_query()).await.unwrap_err();

    assert!(matches!(
        err,
        SearchError::Service { ref message } if message == "Missing required parameters: specialty and location"
    ));
}

#[tokio::test]
async fn doctor_search_gateway_error_without_body_is_unavailable() {
    let base = serve(scripted("/search-doctors", Recorder::default(), |_| {
        (StatusCode::BAD_GATEWAY, "upstream timeout").into_response()
    }))
    .await;

    let err = search_client(&base).search(neurologist_query()).await.unwrap_err();

    assert!(matches!(err, SearchError::Unavailable { .. }));
}

#[tokio::test]
async fn doctor_search_connection_refused_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = search_client(&base).search(neurologist_query()).await.unwrap_err();

    assert!(matches!(err, SearchError::Network(_)));
}

// =============================================================================
// TravilyWebSearch
// =============================================================================

fn travily(base: &str) -> TravilyWebSearch {
    let config = TravilyConfig::new(Secret::new("tv-key".to_string()))
        .with_endpoint(format!("{}/search/web", base));
    TravilyWebSearch::new(config).unwrap()
}

#[tokio::test]
async fn travily_sends_bearer_query_and_parses_results() {
    let recorder = Recorder::default();
    let base = serve(scripted("/search/web", recorder.clone(), |_| {
        Json(json!({
            "results": [
                {"title": "Dr. Asha Rao - Practo", "description": "221 MG Road, Ashok Nagar, Bangalore", "url": "https://practo.example/asha"},
                {"title": "Clinic list"}
            ]
        }))
        .into_response()
    }))
    .await;

    let hits = travily(&base)
        .search("Neurologist doctors near 12.9,77.6", 5)
        .await
        .unwrap();

    let (headers, body) = recorder.last();
    assert_eq!(headers["authorization"], "Bearer tv-key");
    assert_eq!(body, json!({"query": "Neurologist doctors near 12.9,77.6", "num_results": 5}));
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].url, "https://practo.example/asha");
    assert_eq!(hits[1].description, "");
}

#[tokio::test]
async fn travily_unauthorized() {
    let base = serve(scripted("/search/web", Recorder::default(), |_| {
        StatusCode::FORBIDDEN.into_response()
    }))
    .await;

    let err = travily(&base).search("q", 5).await.unwrap_err();

    assert_eq!(err, WebSearchError::Unauthorized);
}

#[tokio::test]
async fn travily_other_status_keeps_body() {
    let base = serve(scripted("/search/web", Recorder::default(), |_| {
        (StatusCode::INTERNAL_SERVER_ERROR, "quota exceeded").into_response()
    }))
    .await;

    let err = travily(&base).search("q", 5).await.unwrap_err();

    assert_eq!(
        err,
        WebSearchError::Status {
            status: 500,
            body: "quota exceeded".to_string()
        }
    );
}
