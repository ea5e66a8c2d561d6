//! Prediction service client setup

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use carprice_common::{default_config_path, ClientConfig, HttpBackend, PredictorForm};

/// Connection settings gathered from flags and the environment
#[derive(Debug, Clone, Default)]
pub struct ConnectArgs {
    pub api_url: Option<String>,
    pub config_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl ConnectArgs {
    pub fn config_path(&self) -> PathBuf {
        self.config_path.clone().unwrap_or_else(default_config_path)
    }

    /// Effective configuration: flags and env over the config file over defaults
    pub fn resolve(&self) -> Result<ClientConfig> {
        let path = self.config_path();
        let mut config = load_config(&path)?;
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout_secs = Some(secs);
        }
        debug!("Using prediction service at {}", config.api_url);
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<ClientConfig> {
    ClientConfig::load(path).with_context(|| format!("reading config {}", path.display()))
}

/// Build an HTTP backend from resolved configuration
pub fn connect(config: ClientConfig) -> Result<HttpBackend> {
    Ok(HttpBackend::new(config)?)
}

/// Fresh form bound to the HTTP backend
pub fn new_form(backend: HttpBackend) -> PredictorForm {
    PredictorForm::new(Arc::new(backend))
}
