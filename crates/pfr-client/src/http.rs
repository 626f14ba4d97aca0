//! JSON-over-HTTP simulation backend.

use std::time::Instant;

use pfr_params::SimulationRequest;
use pfr_results::SimulationResult;
use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use crate::backend::SimulationBackend;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::wire::{self, ServiceInfo};

/// Error bodies longer than this are cut before they reach the user.
const MAX_ERROR_BODY_CHARS: usize = 300;

pub struct HttpBackend {
    client: Client,
    simulate_url: String,
    info_url: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let simulate_url = config.simulate_url();
        reqwest::Url::parse(&simulate_url).map_err(|e| ClientError::InvalidUrl {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            client,
            simulate_url,
            info_url: config.info_url(),
        })
    }
}

impl SimulationBackend for HttpBackend {
    fn simulate(&self, request: &SimulationRequest) -> ClientResult<SimulationResult> {
        let started = Instant::now();
        debug!(url = %self.simulate_url, ?request, "dispatching simulation request");

        let response = self.client.post(&self.simulate_url).json(request).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), "simulation service rejected request");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: truncate(body.trim(), MAX_ERROR_BODY_CHARS),
            });
        }

        let text = response.text()?;
        let result = wire::parse_simulate_response(&text)?;
        info!(
            samples = result.sample_count(),
            elapsed_s = started.elapsed().as_secs_f64(),
            "simulation response received"
        );
        Ok(result)
    }

    fn service_info(&self) -> ClientResult<ServiceInfo> {
        let response = self.client.get(&self.info_url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: truncate(response.text().unwrap_or_default().trim(), MAX_ERROR_BODY_CHARS),
            });
        }
        let text = response.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    fn describe(&self) -> String {
        self.simulate_url.clone()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max_chars).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_base_url() {
        let config = ClientConfig::with_base_url("not a url");
        assert!(matches!(
            HttpBackend::new(&config),
            Err(ClientError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn describe_is_simulate_endpoint() {
        let backend = HttpBackend::new(&ClientConfig::with_base_url("http://127.0.0.1:8000")).unwrap();
        assert_eq!(backend.describe(), "http://127.0.0.1:8000/simulate");
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("boom", 10), "boom");
        assert_eq!(truncate("abcdef", 3), "abc…");
    }
}
