//! Presentation model
//!
//! A [`FormView`] is a pure function of [`FormState`]: dropdowns with their
//! placeholder entry, the submit control, the error banner and the result
//! panel. Front-ends render it without looking at the state directly.

use serde::Serialize;

use crate::currency::format_inr;
use crate::form::FormState;
use crate::types::FormField;

/// One selectable entry. The placeholder has an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dropdown {
    pub field: FormField,
    pub label: &'static str,
    /// Placeholder first, then the server's options in order
    pub options: Vec<DropdownOption>,
    /// Currently selected value, empty when nothing is chosen
    pub selected: String,
}

impl Dropdown {
    pub fn placeholder(&self) -> &DropdownOption {
        &self.options[0]
    }

    /// Index of the selected entry; 0 (the placeholder) when the value is not offered
    pub fn selected_index(&self) -> usize {
        self.options
            .iter()
            .position(|o| o.value == self.selected)
            .unwrap_or(0)
    }
}

/// Free numeric input for kilometers driven
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberInput {
    pub field: FormField,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitButton {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub heading: &'static str,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub dropdowns: Vec<Dropdown>,
    pub kilo_driven: NumberInput,
    pub submit: SubmitButton,
    pub banner: Option<String>,
    pub result: Option<ResultView>,
}

impl FormView {
    pub fn new(state: &FormState) -> Self {
        let dropdowns = FormField::ALL
            .into_iter()
            .filter(|f| f.is_dropdown())
            .map(|field| {
                let mut options = vec![DropdownOption {
                    value: String::new(),
                    label: field.placeholder().to_string(),
                }];
                // Models are offered regardless of the chosen company.
                options.extend(
                    state
                        .options()
                        .values_for(field)
                        .into_iter()
                        .map(|v| DropdownOption {
                            label: v.clone(),
                            value: v,
                        }),
                );
                Dropdown {
                    field,
                    label: field.label(),
                    options,
                    selected: state.input().get(field).to_string(),
                }
            })
            .collect();

        let loading = state.status().is_loading();
        Self {
            dropdowns,
            kilo_driven: NumberInput {
                field: FormField::KiloDriven,
                label: FormField::KiloDriven.label(),
                placeholder: FormField::KiloDriven.placeholder(),
                value: state.input().kilo_driven.clone(),
            },
            submit: SubmitButton {
                label: if loading { "Predicting..." } else { "Predict Price" },
                enabled: !loading,
            },
            banner: state.status().error().map(str::to_string),
            result: state.result().map(|price| ResultView {
                heading: "Predicted Price:",
                amount: format_inr(price),
            }),
        }
    }

    pub fn dropdown(&self, field: FormField) -> Option<&Dropdown> {
        self.dropdowns.iter().find(|d| d.field == field)
    }
}
