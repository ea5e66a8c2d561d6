//! Options Commands

use anyhow::Result;

use carprice_common::{LoadOutcome, PredictorForm};

use crate::output::{print_options, OutputFormat};

/// Fetch and print the dropdown options
pub async fn execute(form: PredictorForm, format: OutputFormat) -> Result<()> {
    match form.load_options().await {
        LoadOutcome::Loaded => {
            print_options(form.state().options(), format);
            Ok(())
        }
        LoadOutcome::Failed(message) => anyhow::bail!(message),
        LoadOutcome::Cancelled => anyhow::bail!("Options load cancelled"),
    }
}
