//! Predict Command

use anyhow::Result;
use clap::Args;
use tracing::warn;

use carprice_common::{FormError, FormField, LoadOutcome, PredictorForm, Submission};

use crate::output::{print_item, OutputFormat, PredictionDisplay};

#[derive(Args, Debug, Default)]
pub struct PredictArgs {
    /// Car manufacturer, e.g. Maruti
    #[arg(long)]
    pub company: Option<String>,

    /// Car model, e.g. Swift
    #[arg(long)]
    pub car_model: Option<String>,

    /// Year of purchase
    #[arg(long)]
    pub year: Option<String>,

    /// Fuel type, e.g. Petrol
    #[arg(long)]
    pub fuel_type: Option<String>,

    /// Kilometers driven
    #[arg(long, value_parser = parse_kilometers)]
    pub kilo_driven: Option<String>,
}

impl PredictArgs {
    /// Flag values keyed by field; absent flags stay empty
    pub fn values(&self) -> Vec<(FormField, String)> {
        vec![
            (FormField::Company, self.company.clone().unwrap_or_default()),
            (FormField::CarModel, self.car_model.clone().unwrap_or_default()),
            (FormField::Year, self.year.clone().unwrap_or_default()),
            (FormField::FuelType, self.fuel_type.clone().unwrap_or_default()),
            (FormField::KiloDriven, self.kilo_driven.clone().unwrap_or_default()),
        ]
    }
}

/// Accept finite numeric text and pass it through as typed, trimmed
pub(crate) fn parse_kilometers(value: &str) -> Result<String, String> {
    let value = value.trim();
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(value.to_string()),
        _ => Err(format!("'{}' is not a number", value)),
    }
}

/// Flag spelling of a field for error messages
fn flag_name(field: FormField) -> String {
    format!("--{}", field.wire_key().replace('_', "-"))
}

pub async fn execute(args: PredictArgs, form: PredictorForm, format: OutputFormat) -> Result<()> {
    // The form starts by loading its options even though flags bypass the
    // dropdowns; a failed load only warns here.
    if let LoadOutcome::Failed(message) = form.load_options().await {
        warn!("{}", message);
    }

    for (field, value) in args.values() {
        form.set_field(field, value);
    }

    match form.submit().await {
        Ok(Submission::Predicted(price)) => {
            let display = PredictionDisplay::new(form.state().input().clone(), price);
            print_item(&display, format);
            Ok(())
        }
        Ok(Submission::Failed(message)) => anyhow::bail!(message),
        Ok(Submission::Cancelled) => anyhow::bail!("Prediction cancelled"),
        Err(FormError::MissingField(field)) => {
            anyhow::bail!("{} is required ({})", field.label(), flag_name(field))
        }
        Err(e) => Err(e.into()),
    }
}
