use std::sync::Arc;

use carprice_common::form::LOAD_ERROR_MESSAGE;
use carprice_common::{
    ClientConfig, FormField, HttpBackend, LoadOutcome, OptionValue, PredictionBackend, PredictorForm,
};
use carprice_e2e::{init_tracing, MockService, Reply};
use serde_json::json;

fn form_for(mock: &MockService) -> PredictorForm {
    let backend = HttpBackend::new(ClientConfig::new(mock.base_url())).expect("backend");
    PredictorForm::new(Arc::new(backend))
}

/// Options Loader: successful read
///
/// Each dropdown holds exactly the served list, in served order, behind a
/// `Select …` placeholder.
#[tokio::test]
async fn options_populate_dropdowns_in_order() {
    init_tracing();
    let mock = MockService::spawn_default().await.unwrap();
    let form = form_for(&mock);

    assert_eq!(form.load_options().await, LoadOutcome::Loaded);

    let state = form.state();
    let options = state.options();
    assert_eq!(options.companies, vec!["Maruti", "Hyundai"]);
    assert_eq!(options.car_models, vec!["Swift", "i20"]);
    assert_eq!(
        options.years,
        vec![OptionValue::from(2018i64), OptionValue::from(2019i64)]
    );
    assert_eq!(options.fuel_types, vec!["Petrol", "Diesel"]);

    let view = form.view();
    assert!(view.banner.is_none());
    let expected = [
        (FormField::Company, ["Select Company", "Maruti", "Hyundai"]),
        (FormField::CarModel, ["Select Model", "Swift", "i20"]),
        (FormField::Year, ["Select Year", "2018", "2019"]),
        (FormField::FuelType, ["Select Fuel Type", "Petrol", "Diesel"]),
    ];
    for (field, labels) in expected {
        let dropdown = view.dropdown(field).unwrap();
        let actual: Vec<&str> = dropdown.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(actual, labels);
        assert_eq!(dropdown.options[0].value, "");
    }

    assert_eq!(mock.requests_to("/").len(), 1);
    assert!(mock.requests_to("/predict").is_empty());
}

#[tokio::test]
async fn options_keep_duplicates_and_server_order() {
    let mock = MockService::spawn(
        Reply::Json(json!({
            "companies": ["Tata", "Audi", "Tata"],
            "car_models": ["Nexon"],
            "years": ["2021", 2015],
            "fuel_types": ["CNG"],
        })),
        Reply::Status(500),
    )
    .await
    .unwrap();
    let form = form_for(&mock);

    form.load_options().await;

    let options = form.state().options().clone();
    assert_eq!(options.companies, vec!["Tata", "Audi", "Tata"]);
    assert_eq!(options.values_for(FormField::Year), vec!["2021", "2015"]);
}

#[tokio::test]
async fn options_server_error_leaves_dropdowns_empty() {
    let mock = MockService::spawn(Reply::Status(500), Reply::Status(500))
        .await
        .unwrap();
    let form = form_for(&mock);

    let outcome = form.load_options().await;

    assert_eq!(outcome, LoadOutcome::Failed(LOAD_ERROR_MESSAGE.to_string()));
    assert!(form.state().options().is_empty());
    let view = form.view();
    assert_eq!(view.banner.as_deref(), Some(LOAD_ERROR_MESSAGE));
    for dropdown in &view.dropdowns {
        assert_eq!(dropdown.options.len(), 1, "only the placeholder remains");
    }
}

#[tokio::test]
async fn options_malformed_body_is_a_load_error() {
    let mock = MockService::spawn(Reply::Raw("<html>oops</html>".into()), Reply::Status(500))
        .await
        .unwrap();
    let form = form_for(&mock);

    assert!(matches!(form.load_options().await, LoadOutcome::Failed(_)));
    assert!(form.state().options().is_empty());
}

#[tokio::test]
async fn options_missing_list_is_a_load_error() {
    let mock = MockService::spawn(
        Reply::Json(json!({ "companies": ["Maruti"] })),
        Reply::Status(500),
    )
    .await
    .unwrap();
    let form = form_for(&mock);

    assert!(matches!(form.load_options().await, LoadOutcome::Failed(_)));
    assert!(form.state().options().is_empty());
}

#[tokio::test]
async fn options_unreachable_service_is_a_load_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let backend = HttpBackend::new(ClientConfig::new(format!("http://127.0.0.1:{}", port))).unwrap();
    assert!(!backend.health_check().await);

    let form = PredictorForm::new(Arc::new(backend));
    assert!(matches!(form.load_options().await, LoadOutcome::Failed(_)));
    assert_eq!(form.view().banner.as_deref(), Some(LOAD_ERROR_MESSAGE));
}

#[tokio::test]
async fn reload_replaces_options_wholesale() {
    let mock = MockService::spawn_default().await.unwrap();
    let backend = HttpBackend::new(ClientConfig::new(mock.base_url())).unwrap();
    assert!(backend.health_check().await);

    let first = backend.fetch_options().await.unwrap();
    assert_eq!(first.companies.len(), 2);

    mock.set_options(Reply::Json(json!({
        "companies": ["Honda"],
        "car_models": [],
        "years": [],
        "fuel_types": [],
    })));
    let form = PredictorForm::new(Arc::new(backend));
    form.load_options().await;
    assert_eq!(form.state().options().companies, vec!["Honda"]);
    assert!(form.state().options().car_models.is_empty());
}
