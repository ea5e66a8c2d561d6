//! Mock prediction service - canned replies and a request journal

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::error::{E2eError, E2eResult};

/// Fields the real service requires on `/predict`
pub const PREDICT_FIELDS: [&str; 5] = ["company", "car_model", "year", "fuel_type", "kilo_driven"];

/// How the mock answers an endpoint
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with a JSON body
    Json(Value),
    /// Bare status code with an empty body
    Status(u16),
    /// 200 with a raw, possibly malformed, body
    Raw(String),
    /// Never answer
    Hang,
}

impl Reply {
    async fn respond(self) -> Response {
        match self {
            Reply::Json(body) => Json(body).into_response(),
            Reply::Status(code) => StatusCode::from_u16(code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
            Reply::Raw(body) => (StatusCode::OK, body).into_response(),
            Reply::Hang => std::future::pending::<Response>().await,
        }
    }
}

/// One request as seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: &'static str,
    /// Multipart fields in arrival order
    pub fields: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

struct MockState {
    options: Mutex<Reply>,
    predict: Mutex<Reply>,
    journal: Mutex<Vec<RecordedRequest>>,
}

/// Handle to a running mock service
pub struct MockService {
    pub base_url: String,
    pub addr: SocketAddr,
    state: Arc<MockState>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl MockService {
    /// Serve with the sample catalogue and a fixed price
    pub async fn spawn_default() -> E2eResult<Self> {
        Self::spawn(
            Reply::Json(sample_options()),
            Reply::Json(json!({ "predicted_price": 425000 })),
        )
        .await
    }

    /// Bind an ephemeral port and start serving
    pub async fn spawn(options: Reply, predict: Reply) -> E2eResult<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let base_url = format!("http://{}", addr);

        let state = Arc::new(MockState {
            options: Mutex::new(options),
            predict: Mutex::new(predict),
            journal: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/", get(options_handler))
            .route("/predict", post(predict_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state.clone());

        let (tx, rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = rx.await;
            });
            if let Err(e) = server.await {
                tracing::error!("Mock service error: {}", e);
            }
        });

        if task.is_finished() {
            return Err(E2eError::ServerStartup(format!("listener on {} closed", addr)));
        }

        info!("Mock prediction service on {}", base_url);
        Ok(Self {
            base_url,
            addr,
            state,
            shutdown: Some(tx),
            task,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_options(&self, reply: Reply) {
        *self.state.options.lock() = reply;
    }

    pub fn set_predict(&self, reply: Reply) {
        *self.state.predict.lock() = reply;
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.journal.lock().clone()
    }

    /// Requests received on one path
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// Stop the service
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.task.abort();
    }
}

impl Drop for MockService {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Options body matching the two-of-each catalogue used throughout the tests
pub fn sample_options() -> Value {
    json!({
        "companies": ["Maruti", "Hyundai"],
        "car_models": ["Swift", "i20"],
        "years": [2018, 2019],
        "fuel_types": ["Petrol", "Diesel"],
    })
}

async fn options_handler(State(state): State<Arc<MockState>>) -> Response {
    state.journal.lock().push(RecordedRequest {
        method: "GET",
        path: "/",
        fields: Vec::new(),
    });
    let reply = state.options.lock().clone();
    reply.respond().await
}

async fn predict_handler(State(state): State<Arc<MockState>>, mut multipart: Multipart) -> Response {
    let mut fields = Vec::new();
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field.name().unwrap_or_default().to_string();
                match field.text().await {
                    Ok(value) => fields.push((name, value)),
                    Err(e) => return e.into_response(),
                }
            }
            Ok(None) => break,
            Err(e) => return e.into_response(),
        }
    }
    debug!(?fields, "POST /predict");

    let missing = PREDICT_FIELDS
        .iter()
        .any(|key| !fields.iter().any(|(k, v)| k == key && !v.is_empty()));

    state.journal.lock().push(RecordedRequest {
        method: "POST",
        path: "/predict",
        fields,
    });

    // Incomplete forms get a 400 before the canned reply.
    if missing {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "missing field" }))).into_response();
    }

    let reply = state.predict.lock().clone();
    reply.respond().await
}
