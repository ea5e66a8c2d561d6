//! Interactive Form Command
//!
//! Walks the user through the four dropdowns and the kilometers input, then
//! submits and shows the banner or the predicted price. The form can be
//! edited and resubmitted until the user quits.

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use carprice_common::view::{Dropdown, FormView};
use carprice_common::{FormError, LoadOutcome, PredictorForm, Submission};

use crate::commands::predict::parse_kilometers;
use crate::output::{print_error, print_info, print_warning};

pub async fn execute(form: PredictorForm) -> Result<()> {
    println!("{}", "🚗 Car Price Predictor".bold());
    println!("Fill in the details below to get an estimated price for a used car.");
    println!();

    // Without options every dropdown holds only its placeholder.
    if !options_ready(form.load_options().await)? {
        return Ok(());
    }

    let theme = ColorfulTheme::default();
    loop {
        fill_form(&form, &theme)?;

        let outcome = submit_with_spinner(&form).await;
        match outcome {
            Ok(Submission::Cancelled) => {
                print_warning("Interrupted");
                return Ok(());
            }
            Ok(_) => render_outcome(&form.view()),
            Err(FormError::MissingField(field)) => {
                print_warning(&format!("Please fill out {}", field.label()));
                continue;
            }
            Err(e) => print_error(&e.to_string()),
        }

        let again = Confirm::with_theme(&theme)
            .with_prompt("Edit the form and predict again?")
            .default(true)
            .interact()?;
        if !again {
            break;
        }
    }

    form.teardown();
    Ok(())
}

/// Whether prompting can start; a failed load ends the session with its banner
fn options_ready(outcome: LoadOutcome) -> Result<bool> {
    match outcome {
        LoadOutcome::Loaded => Ok(true),
        LoadOutcome::Cancelled => Ok(false),
        LoadOutcome::Failed(message) => anyhow::bail!(message),
    }
}

fn fill_form(form: &PredictorForm, theme: &ColorfulTheme) -> Result<()> {
    let view = form.view();
    for dropdown in &view.dropdowns {
        let value = pick(dropdown, theme)?;
        form.set_field(dropdown.field, value);
    }

    let kilo = &view.kilo_driven;
    let value: String = Input::with_theme(theme)
        .with_prompt(format!("{} ({})", kilo.label, kilo.placeholder))
        .with_initial_text(kilo.value.clone())
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), &'static str> {
            if input.is_empty() || parse_kilometers(input).is_ok() {
                Ok(())
            } else {
                Err("Enter a number")
            }
        })
        .interact_text()?;
    form.set_field(kilo.field, value.trim());
    Ok(())
}

/// Prompt one dropdown; choosing the placeholder leaves the field empty
fn pick(dropdown: &Dropdown, theme: &ColorfulTheme) -> Result<String> {
    if dropdown.options.len() == 1 {
        print_info(&format!("No {} options available", dropdown.label));
    }
    let labels: Vec<&str> = dropdown.options.iter().map(|o| o.label.as_str()).collect();
    let index = Select::with_theme(theme)
        .with_prompt(dropdown.label)
        .items(&labels)
        .default(dropdown.selected_index())
        .interact()?;
    Ok(dropdown.options[index].value.clone())
}

async fn submit_with_spinner(form: &PredictorForm) -> Result<Submission, FormError> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = {
        let submission = form.submit();
        tokio::pin!(submission);

        spinner.set_message("Predicting...");
        tokio::select! {
            res = &mut submission => res,
            _ = tokio::signal::ctrl_c() => {
                form.teardown();
                submission.await
            }
        }
    };

    spinner.finish_and_clear();
    outcome
}

fn render_outcome(view: &FormView) {
    if let Some(banner) = &view.banner {
        print_error(banner);
    }
    if let Some(result) = &view.result {
        println!();
        println!("{}", result.heading.bold());
        println!("  {}", result.amount.green().bold());
        println!();
    }
}
