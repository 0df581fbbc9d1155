//! In-process stand-in for the Kubernetes API server.
//!
//! Records every request and answers with just enough
//! data for the client to deserialize the response.

use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct FakeState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    allowed: bool,
}

pub struct FakeApiServer {
    pub client: kube::Client,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeApiServer {
    /// Start the server. Every access review is answered with `allowed`.
    pub async fn start(allowed: bool) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let router = axum::Router::new().fallback(handle).with_state(FakeState {
            requests: requests.clone(),
            allowed,
        });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        let config = kube::Config::new(format!("http://{addr}").parse().unwrap());
        let client = kube::Client::try_from(config).unwrap();
        Self { client, requests }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: path.clone(),
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from),
        body: body.clone(),
    });
    if path.ends_with("/selfsubjectaccessreviews") {
        return Json(json!({
            "apiVersion": "authorization.k8s.io/v1",
            "kind": "SelfSubjectAccessReview",
            "spec": body["spec"].clone(),
            "status": { "allowed": state.allowed },
        }))
        .into_response();
    }
    if path.ends_with("/approval") {
        return Json(body).into_response();
    }
    if let Some(name) = path.strip_prefix("/api/v1/nodes/") {
        return Json(json!({
            "apiVersion": "v1",
            "kind": "Node",
            "metadata": { "name": name },
        }))
        .into_response();
    }
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "apiVersion": "v1",
            "kind": "Status",
            "status": "Failure",
            "message": format!("{path} not found"),
            "reason": "NotFound",
            "code": 404,
        })),
    )
        .into_response()
}
