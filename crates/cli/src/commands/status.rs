//! Status Command

use carprice_common::HttpBackend;

use crate::output::{print_error, print_success};

/// Report whether the prediction service answers the options read
pub async fn execute(backend: HttpBackend) -> bool {
    let url = backend.config().api_url.clone();
    if backend.health_check().await {
        print_success(&format!("Prediction service is running at {}", url));
        true
    } else {
        print_error(&format!("Prediction service is not responding at {}", url));
        false
    }
}
