//! Core types for carprice

use serde::{Deserialize, Serialize};

/// A single dropdown entry as served by the prediction service.
///
/// Years come back either as JSON strings or as JSON numbers depending on
/// how the backend encoded its training data, so both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Number(serde_json::Number),
}

impl OptionValue {
    /// Text submitted for this option.
    pub fn as_form_value(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Text(s) => write!(f, "{}", s),
            OptionValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Number(value.into())
    }
}

/// Categorical option lists for the form's dropdowns.
///
/// Replaced wholesale on every successful load, never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionSet {
    pub companies: Vec<String>,
    pub car_models: Vec<String>,
    pub years: Vec<OptionValue>,
    pub fuel_types: Vec<String>,
}

impl OptionSet {
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
            && self.car_models.is_empty()
            && self.years.is_empty()
            && self.fuel_types.is_empty()
    }

    /// Display values offered for a field, in server order.
    ///
    /// Kilometers driven is free text and has no option list.
    pub fn values_for(&self, field: FormField) -> Vec<String> {
        match field {
            FormField::Company => self.companies.clone(),
            FormField::CarModel => self.car_models.clone(),
            FormField::Year => self.years.iter().map(OptionValue::as_form_value).collect(),
            FormField::FuelType => self.fuel_types.clone(),
            FormField::KiloDriven => Vec::new(),
        }
    }
}

/// The five inputs of the prediction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Company,
    CarModel,
    Year,
    FuelType,
    KiloDriven,
}

impl FormField {
    /// Fields in display order.
    pub const ALL: [FormField; 5] = [
        FormField::Company,
        FormField::CarModel,
        FormField::Year,
        FormField::FuelType,
        FormField::KiloDriven,
    ];

    /// Multipart key expected by the `/predict` endpoint.
    pub fn wire_key(self) -> &'static str {
        match self {
            FormField::Company => "company",
            FormField::CarModel => "car_model",
            FormField::Year => "year",
            FormField::FuelType => "fuel_type",
            FormField::KiloDriven => "kilo_driven",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Company => "Company",
            FormField::CarModel => "Car Model",
            FormField::Year => "Year of Purchase",
            FormField::FuelType => "Fuel Type",
            FormField::KiloDriven => "Kilometers Driven",
        }
    }

    /// Placeholder shown before a value is chosen.
    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Company => "Select Company",
            FormField::CarModel => "Select Model",
            FormField::Year => "Select Year",
            FormField::FuelType => "Select Fuel Type",
            FormField::KiloDriven => "e.g., 50000",
        }
    }

    /// Whether the field is picked from a server-provided list.
    pub fn is_dropdown(self) -> bool {
        !matches!(self, FormField::KiloDriven)
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_key())
    }
}

impl std::str::FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|f| f.wire_key() == s)
            .ok_or_else(|| format!("unknown form field: {}", s))
    }
}

/// User-entered form values. Every field starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub company: String,
    pub car_model: String,
    pub year: String,
    pub fuel_type: String,
    pub kilo_driven: String,
}

impl FormInput {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Company => &self.company,
            FormField::CarModel => &self.car_model,
            FormField::Year => &self.year,
            FormField::FuelType => &self.fuel_type,
            FormField::KiloDriven => &self.kilo_driven,
        }
    }

    /// Overwrite exactly one field.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Company => &mut self.company,
            FormField::CarModel => &mut self.car_model,
            FormField::Year => &mut self.year,
            FormField::FuelType => &mut self.fuel_type,
            FormField::KiloDriven => &mut self.kilo_driven,
        };
        *slot = value.into();
    }

    /// First field left empty, in display order.
    pub fn first_missing(&self) -> Option<FormField> {
        FormField::ALL.into_iter().find(|f| self.get(*f).is_empty())
    }

    /// `(wire key, value)` pairs in display order.
    pub fn wire_fields(&self) -> Vec<(&'static str, String)> {
        FormField::ALL
            .into_iter()
            .map(|f| (f.wire_key(), self.get(f).to_string()))
            .collect()
    }
}

/// Body returned by `POST /predict`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predicted_price: f64,
}

/// Feedback state of the form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
}

impl RequestStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Idle => write!(f, "idle"),
            RequestStatus::Loading => write!(f, "loading"),
            RequestStatus::Error(msg) => write!(f, "error: {}", msg),
        }
    }
}
