//! Prediction form controller
//!
//! [`PredictorForm`] owns the form's state and runs its two network phases:
//! the options load at startup and one prediction per submit. Clones share
//! the same state, so a front-end can render from one handle while another
//! task awaits a submission.
//!
//! State transitions:
//!
//! ```text
//! Idle|Error --submit--> Loading --ok--> Idle (+ price)
//!                                --err--> Error(submit message)
//!                                --teardown--> Idle
//! Idle|Error --load failure--> Error(load message)
//! Loading --load failure--> Loading
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::backend::PredictionBackend;
use crate::error::FormError;
use crate::types::{FormField, FormInput, OptionSet, RequestStatus};
use crate::view::FormView;

/// Banner shown when the dropdown options cannot be fetched
pub const LOAD_ERROR_MESSAGE: &str =
    "Could not load car data. Please ensure the backend is running.";

/// Banner shown when a prediction request fails
pub const SUBMIT_ERROR_MESSAGE: &str =
    "Prediction failed. Please check your inputs and try again.";

/// Everything the form displays.
///
/// Status and result are only reachable through the transition methods, so a
/// loading form never carries a price and a settled submission carries
/// either a price or an error, never both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    options: OptionSet,
    input: FormInput,
    status: RequestStatus,
    result: Option<f64>,
}

impl FormState {
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    /// Price from the last successful submission
    pub fn result(&self) -> Option<f64> {
        self.result
    }

    fn apply_options(&mut self, options: OptionSet) {
        self.options = options;
    }

    /// A pending submission keeps `Loading`; its own outcome settles the status.
    fn fail_load(&mut self) {
        if !self.status.is_loading() {
            self.status = RequestStatus::Error(LOAD_ERROR_MESSAGE.to_string());
        }
    }

    fn begin_submission(&mut self) {
        self.result = None;
        self.status = RequestStatus::Loading;
    }

    fn finish_submission(&mut self, price: f64) {
        self.result = Some(price);
        self.status = RequestStatus::Idle;
    }

    fn fail_submission(&mut self) {
        self.result = None;
        self.status = RequestStatus::Error(SUBMIT_ERROR_MESSAGE.to_string());
    }

    fn abandon_submission(&mut self) {
        if self.status.is_loading() {
            self.status = RequestStatus::Idle;
        }
    }
}

/// How an options load settled
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded,
    Failed(String),
    /// The form was torn down before the response arrived
    Cancelled,
}

/// How a submission settled
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Predicted(f64),
    Failed(String),
    /// The form was torn down before the response arrived
    Cancelled,
}

/// Form controller bound to a prediction backend
#[derive(Clone)]
pub struct PredictorForm {
    backend: Arc<dyn PredictionBackend>,
    state: Arc<RwLock<FormState>>,
    cancel: CancellationToken,
}

impl PredictorForm {
    pub fn new(backend: Arc<dyn PredictionBackend>) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(FormState::default())),
            cancel: CancellationToken::new(),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> FormState {
        self.state.read().clone()
    }

    /// Presentation model of the current state
    pub fn view(&self) -> FormView {
        FormView::new(&self.state.read())
    }

    /// Update one field, leaving the others untouched
    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        debug!(field = %field, value = %value, "Field changed");
        self.state.write().input.set(field, value);
    }

    /// Fetch the dropdown options. Run once when the form starts.
    pub async fn load_options(&self) -> LoadOutcome {
        if self.cancel.is_cancelled() {
            return LoadOutcome::Cancelled;
        }

        let response = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            res = self.backend.fetch_options() => Some(res),
        };

        let mut state = self.state.write();
        match response {
            None => {
                debug!("Options load discarded after teardown");
                LoadOutcome::Cancelled
            }
            Some(Ok(options)) => {
                info!(
                    companies = options.companies.len(),
                    car_models = options.car_models.len(),
                    years = options.years.len(),
                    fuel_types = options.fuel_types.len(),
                    "Loaded car data"
                );
                state.apply_options(options);
                LoadOutcome::Loaded
            }
            Some(Err(e)) => {
                error!("Failed to fetch dropdown options: {}", e);
                state.fail_load();
                LoadOutcome::Failed(LOAD_ERROR_MESSAGE.to_string())
            }
        }
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.state.read().status.is_loading() && !self.cancel.is_cancelled()
    }

    /// Submit the form and wait for the prediction.
    ///
    /// Refused without any request when a field is empty or another
    /// submission is in flight. Once a request is issued the status always
    /// leaves `Loading`, including when this future is dropped.
    pub async fn submit(&self) -> Result<Submission, FormError> {
        if self.cancel.is_cancelled() {
            return Ok(Submission::Cancelled);
        }

        let input = {
            let mut state = self.state.write();
            if state.status.is_loading() {
                return Err(FormError::SubmissionInFlight);
            }
            if let Some(field) = state.input.first_missing() {
                return Err(FormError::MissingField(field));
            }
            state.begin_submission();
            state.input.clone()
        };

        let mut guard = SettleGuard {
            state: &self.state,
            armed: true,
        };

        let response = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            res = self.backend.predict(&input) => Some(res),
        };

        guard.armed = false;
        let mut state = self.state.write();
        let outcome = match response {
            None => {
                debug!("Prediction discarded after teardown");
                state.abandon_submission();
                Submission::Cancelled
            }
            Some(Ok(price)) => {
                info!(price, "Prediction received");
                state.finish_submission(price);
                Submission::Predicted(price)
            }
            Some(Err(e)) => {
                error!("Failed to get prediction: {}", e);
                state.fail_submission();
                Submission::Failed(SUBMIT_ERROR_MESSAGE.to_string())
            }
        };
        Ok(outcome)
    }

    /// Stop applying responses to this form.
    ///
    /// In-flight requests resolve as cancelled and later calls do nothing.
    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Returns the form to `Idle` if a submission future is dropped mid-flight
struct SettleGuard<'a> {
    state: &'a RwLock<FormState>,
    armed: bool,
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.write().abandon_submission();
        }
    }
}
