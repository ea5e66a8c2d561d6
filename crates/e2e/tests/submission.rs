use std::sync::Arc;
use std::time::Duration;

use carprice_common::form::SUBMIT_ERROR_MESSAGE;
use carprice_common::{
    ClientConfig, FormError, FormField, HttpBackend, PredictorForm, RequestStatus, Submission,
};
use carprice_e2e::{init_tracing, MockService, Reply};
use serde_json::json;

fn form_with(config: ClientConfig) -> PredictorForm {
    PredictorForm::new(Arc::new(HttpBackend::new(config).expect("backend")))
}

async fn loaded_form(mock: &MockService) -> PredictorForm {
    let form = form_with(ClientConfig::new(mock.base_url()));
    form.load_options().await;
    form
}

fn fill(form: &PredictorForm) {
    form.set_field(FormField::Company, "Maruti");
    form.set_field(FormField::CarModel, "Swift");
    form.set_field(FormField::Year, "2018");
    form.set_field(FormField::FuelType, "Petrol");
    form.set_field(FormField::KiloDriven, "50000");
}

/// Submission Controller: successful prediction
///
/// The multipart body carries the five snake_case keys, and the result
/// panel shows the price in en-IN format with no banner.
#[tokio::test]
async fn predict_success_renders_rupee_amount() {
    init_tracing();
    let mock = MockService::spawn_default().await.unwrap();
    let form = loaded_form(&mock).await;
    fill(&form);

    let outcome = form.submit().await.unwrap();
    assert_eq!(outcome, Submission::Predicted(425000.0));

    let view = form.view();
    assert!(view.banner.is_none());
    assert_eq!(view.result.unwrap().amount, "₹ 4,25,000");
    assert!(view.submit.enabled);
    assert_eq!(view.submit.label, "Predict Price");

    let posts = mock.requests_to("/predict");
    assert_eq!(posts.len(), 1);
    assert_eq!(
        posts[0].fields,
        vec![
            ("company".to_string(), "Maruti".to_string()),
            ("car_model".to_string(), "Swift".to_string()),
            ("year".to_string(), "2018".to_string()),
            ("fuel_type".to_string(), "Petrol".to_string()),
            ("kilo_driven".to_string(), "50000".to_string()),
        ]
    );
}

#[tokio::test]
async fn predict_server_error_shows_banner_and_reenables_submit() {
    let mock = MockService::spawn_default().await.unwrap();
    mock.set_predict(Reply::Status(500));
    let form = loaded_form(&mock).await;
    fill(&form);

    let outcome = form.submit().await.unwrap();
    assert_eq!(outcome, Submission::Failed(SUBMIT_ERROR_MESSAGE.to_string()));

    let state = form.state();
    assert_eq!(state.result(), None);
    assert_eq!(state.status(), &RequestStatus::Error(SUBMIT_ERROR_MESSAGE.to_string()));

    let view = form.view();
    assert_eq!(view.banner.as_deref(), Some(SUBMIT_ERROR_MESSAGE));
    assert!(view.result.is_none());
    assert!(view.submit.enabled);
    assert!(form.can_submit());
}

#[tokio::test]
async fn predict_malformed_body_is_a_submission_error() {
    let mock = MockService::spawn_default().await.unwrap();
    let form = loaded_form(&mock).await;
    fill(&form);

    for reply in [
        Reply::Raw("not json".into()),
        Reply::Json(json!({ "price": 1 })),
        Reply::Json(json!({ "predicted_price": "a lot" })),
    ] {
        mock.set_predict(reply);
        let outcome = form.submit().await.unwrap();
        assert_eq!(outcome, Submission::Failed(SUBMIT_ERROR_MESSAGE.to_string()));
        assert_eq!(form.state().result(), None);
    }
}

#[tokio::test]
async fn empty_field_issues_no_request() {
    let mock = MockService::spawn_default().await.unwrap();
    let form = loaded_form(&mock).await;

    for field in FormField::ALL {
        fill(&form);
        form.set_field(field, "");
        assert_eq!(form.submit().await, Err(FormError::MissingField(field)));
    }

    assert!(mock.requests_to("/predict").is_empty());
    assert_eq!(form.state().status(), &RequestStatus::Idle);
}

#[tokio::test]
async fn resubmit_after_failure_clears_banner() {
    let mock = MockService::spawn_default().await.unwrap();
    mock.set_predict(Reply::Status(422));
    let form = loaded_form(&mock).await;
    fill(&form);

    form.submit().await.unwrap();
    assert!(form.view().banner.is_some());

    mock.set_predict(Reply::Json(json!({ "predicted_price": 312500.75 })));
    form.set_field(FormField::KiloDriven, "42000");
    let outcome = form.submit().await.unwrap();

    assert_eq!(outcome, Submission::Predicted(312500.75));
    let view = form.view();
    assert!(view.banner.is_none());
    assert_eq!(view.result.unwrap().amount, "₹ 3,12,500.75");

    let posts = mock.requests_to("/predict");
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1].field("kilo_driven"), Some("42000"));
}

#[tokio::test]
async fn trailing_slash_base_still_hits_predict() {
    let mock = MockService::spawn_default().await.unwrap();
    let form = form_with(ClientConfig::new(format!("{}/", mock.base_url())));
    form.load_options().await;
    fill(&form);

    assert_eq!(form.submit().await.unwrap(), Submission::Predicted(425000.0));
    assert_eq!(mock.requests_to("/predict").len(), 1);
}

#[tokio::test]
async fn teardown_discards_hanging_prediction() {
    let mock = MockService::spawn_default().await.unwrap();
    mock.set_predict(Reply::Hang);
    let form = loaded_form(&mock).await;
    fill(&form);

    let pending = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });

    // Wait for the request to reach the mock.
    tokio::time::timeout(Duration::from_secs(5), async {
        while mock.requests_to("/predict").is_empty() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("request reached the mock");
    assert!(!form.can_submit());
    assert_eq!(form.submit().await, Err(FormError::SubmissionInFlight));

    form.teardown();
    assert_eq!(pending.await.unwrap(), Ok(Submission::Cancelled));

    let state = form.state();
    assert_eq!(state.status(), &RequestStatus::Idle);
    assert_eq!(state.result(), None);
    assert_eq!(mock.requests_to("/predict").len(), 1);
}

#[tokio::test]
async fn request_timeout_settles_as_failure() {
    let mock = MockService::spawn_default().await.unwrap();
    mock.set_predict(Reply::Hang);
    let form = form_with(ClientConfig {
        api_url: mock.base_url().to_string(),
        request_timeout_secs: Some(1),
    });
    form.load_options().await;
    fill(&form);

    let outcome = form.submit().await.unwrap();

    assert_eq!(outcome, Submission::Failed(SUBMIT_ERROR_MESSAGE.to_string()));
    assert!(form.can_submit());
}
