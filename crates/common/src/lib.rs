//! carprice Common Library
//!
//! Form state, the prediction service backend and the presentation model
//! shared by the carprice front-ends.

pub mod backend;
pub mod config;
pub mod currency;
pub mod error;
pub mod form;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use backend::{HttpBackend, PredictionBackend};
pub use config::{default_config_path, ClientConfig};
pub use currency::format_inr;
pub use error::{Error, FormError, Result};
pub use form::{FormState, LoadOutcome, PredictorForm, Submission};
pub use types::*;
pub use view::FormView;

/// carprice version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
