//! carprice E2E Test Framework
//!
//! Runs an in-process mock of the prediction service so the client can be
//! exercised over real HTTP:
//!
//! ```text
//! ┌──────────────────────────┐   GET  /          ┌────────────────────────┐
//! │ PredictorForm            │ ────────────────► │ MockService (axum)     │
//! │   └── HttpBackend        │   POST /predict   │   ├── canned replies   │
//! │                          │ ────────────────► │   └── request journal  │
//! └──────────────────────────┘   (multipart)     └────────────────────────┘
//! ```

pub mod error;
pub mod server;

pub use error::{E2eError, E2eResult};
pub use server::{MockService, RecordedRequest, Reply};

/// Install a test subscriber once; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
