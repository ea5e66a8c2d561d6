//! Prediction service backends
//!
//! [`PredictionBackend`] is the seam between the form controller and the
//! network. [`HttpBackend`] talks to the real service:
//!
//! - `GET {base}` returns the dropdown [`OptionSet`]
//! - `POST {base}/predict` takes the form as multipart fields and returns
//!   `{ "predicted_price": number }`

use async_trait::async_trait;
use reqwest::multipart::Form;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{FormInput, OptionSet, PredictResponse};

/// Source of dropdown options and price predictions
#[async_trait]
pub trait PredictionBackend: Send + Sync {
    /// Fetch the categorical option lists
    async fn fetch_options(&self) -> Result<OptionSet>;

    /// Submit a filled form and return the predicted price
    async fn predict(&self, input: &FormInput) -> Result<f64>;
}

/// HTTP client for the prediction service
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check that the service answers the options read
    pub async fn health_check(&self) -> bool {
        match self.client.get(self.config.options_url()).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
        url: String,
    ) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { status, url });
        }
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Encode the form as the multipart body expected by `/predict`
pub fn encode_form(input: &FormInput) -> Form {
    input
        .wire_fields()
        .into_iter()
        .fold(Form::new(), |form, (key, value)| form.text(key, value))
}

#[async_trait]
impl PredictionBackend for HttpBackend {
    async fn fetch_options(&self) -> Result<OptionSet> {
        let url = self.config.options_url();
        debug!("GET {}", url);
        let resp = self.client.get(&url).send().await?;
        Self::read_json(resp, url).await
    }

    async fn predict(&self, input: &FormInput) -> Result<f64> {
        let url = self.config.predict_url();
        debug!("POST {}", url);
        let resp = self
            .client
            .post(&url)
            .multipart(encode_form(input))
            .send()
            .await?;
        let body: PredictResponse = Self::read_json(resp, url).await?;
        Ok(body.predicted_price)
    }
}
