//! HTTP client for the primary → secondary provider chain.
//!
//! Each prompt gets at most one request per provider. Failures are logged and
//! absorbed; callers only ever see [`Enrichment::Unavailable`].
use super::provider::Provider;
use super::{Enrichment, Unavailable};
use crate::error::ProviderError;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Anything that can turn a prompt into generated text.
pub trait Enricher {
    fn generate(&self, prompt: &str) -> Enrichment;
}

/// Blocking client over the configured providers.
pub struct EnrichmentClient {
    agent: ureq::Agent,
    providers: Vec<Provider>,
}

impl EnrichmentClient {
    /// Providers are tried in the given order, primary first.
    pub fn new(providers: Vec<Provider>, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent, providers }
    }

    /// Names of providers that have a credential.
    pub fn configured_providers(&self) -> Vec<&str> {
        self.providers
            .iter()
            .filter(|provider| provider.is_configured())
            .map(|provider| provider.name.as_str())
            .collect()
    }

    /// True when no provider has a credential and every prompt will fall back.
    pub fn is_fallback_only(&self) -> bool {
        !self.providers.iter().any(Provider::is_configured)
    }

    fn request(
        &self,
        provider: &Provider,
        credential: &str,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let body = provider.schema.request_body(&provider.model, prompt);
        let mut request = self.agent.post(provider.url.as_str());
        for (name, value) in provider.schema.auth_headers(credential) {
            request = request.header(name, value);
        }
        let mut response = request.send_json(&body)?;
        let value: Value = response.body_mut().read_json()?;
        provider
            .schema
            .extract_text(&value)
            .ok_or_else(|| ProviderError::Malformed("missing completion text".to_string()))
    }
}

impl Enricher for EnrichmentClient {
    fn generate(&self, prompt: &str) -> Enrichment {
        if self.is_fallback_only() {
            return Enrichment::Unavailable(Unavailable::NoProvider);
        }
        for provider in &self.providers {
            let Some(credential) = provider.credential.as_deref() else {
                continue;
            };
            let start = Instant::now();
            match self.request(provider, credential, prompt) {
                Ok(text) => {
                    tracing::debug!(
                        provider = %provider.name,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        response_chars = text.chars().count(),
                        "provider call complete"
                    );
                    return Enrichment::Generated {
                        text,
                        provider: provider.name.clone(),
                    };
                }
                Err(err) => {
                    tracing::warn!(
                        provider = %provider.name,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        error = %err,
                        "provider call failed"
                    );
                }
            }
        }
        Enrichment::Unavailable(Unavailable::AllProvidersFailed)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
