//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use carprice_common::{format_inr, FormField, FormInput, OptionSet};

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Plain text format
    Plain,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn print_serialized<T: Serialize + ?Sized>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(value).unwrap_or_default()),
        _ => println!("{}", serde_json::to_string_pretty(value).unwrap_or_default()),
    }
}

/// Print a single item
pub fn print_item<T: Serialize + TableDisplay>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let mut table = new_table();
            table.set_header(T::headers());
            table.add_row(item.row());
            println!("{table}");
        }
        OutputFormat::Json | OutputFormat::Yaml => print_serialized(item, format),
        OutputFormat::Plain => {
            for (header, value) in T::headers().iter().zip(item.row()) {
                println!("{}: {}", header, value);
            }
        }
    }
}

/// One dropdown's option list
#[derive(Serialize)]
pub struct OptionRow {
    pub field: &'static str,
    pub values: Vec<String>,
}

impl TableDisplay for OptionRow {
    fn headers() -> Vec<&'static str> {
        vec!["Field", "Count", "Options"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.field.to_string(),
            self.values.len().to_string(),
            self.values.join(", "),
        ]
    }
}

/// Print the four option lists.
///
/// JSON and YAML keep the service's own shape so the output can be fed back
/// to tools expecting it.
pub fn print_options(options: &OptionSet, format: OutputFormat) {
    if options.is_empty() && matches!(format, OutputFormat::Table | OutputFormat::Plain) {
        println!("No options found.");
        return;
    }

    let rows: Vec<OptionRow> = FormField::ALL
        .into_iter()
        .filter(|f| f.is_dropdown())
        .map(|f| OptionRow {
            field: f.label(),
            values: options.values_for(f),
        })
        .collect();

    match format {
        OutputFormat::Table => {
            let mut table = new_table();
            table.set_header(OptionRow::headers());
            for row in &rows {
                table.add_row(row.row());
            }
            println!("{table}");
        }
        OutputFormat::Json | OutputFormat::Yaml => print_serialized(options, format),
        OutputFormat::Plain => {
            for row in &rows {
                println!("{}:", row.field);
                for value in &row.values {
                    println!("  {}", value);
                }
            }
        }
    }
}

/// Submitted form together with its prediction
#[derive(Serialize)]
pub struct PredictionDisplay {
    #[serde(flatten)]
    pub input: FormInput,
    pub predicted_price: f64,
    pub formatted_price: String,
}

impl PredictionDisplay {
    pub fn new(input: FormInput, price: f64) -> Self {
        Self {
            input,
            predicted_price: price,
            formatted_price: format_inr(price),
        }
    }
}

impl TableDisplay for PredictionDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Company", "Model", "Year", "Fuel", "Km Driven", "Predicted Price"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.input.company.clone(),
            self.input.car_model.clone(),
            self.input.year.clone(),
            self.input.fuel_type.clone(),
            self.input.kilo_driven.clone(),
            self.formatted_price.clone(),
        ]
    }
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.red());
}

/// Print warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow(), message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{} {}", "i".cyan(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_row_uses_rupee_format() {
        let input = FormInput {
            company: "Maruti".into(),
            car_model: "Swift".into(),
            year: "2018".into(),
            fuel_type: "Petrol".into(),
            kilo_driven: "50000".into(),
        };
        let display = PredictionDisplay::new(input, 425000.0);
        let row = display.row();
        assert_eq!(row.len(), PredictionDisplay::headers().len());
        assert_eq!(row[5], "₹ 4,25,000");
    }

    #[test]
    fn test_prediction_json_is_flat() {
        let display = PredictionDisplay::new(FormInput::default(), 1.5);
        let value = serde_json::to_value(&display).unwrap();
        assert_eq!(value["predicted_price"], 1.5);
        assert_eq!(value["kilo_driven"], "");
    }

    #[test]
    fn test_option_row() {
        let row = OptionRow {
            field: "Company",
            values: vec!["Maruti".into(), "Hyundai".into()],
        };
        assert_eq!(row.row(), vec!["Company", "2", "Maruti, Hyundai"]);
    }
}
