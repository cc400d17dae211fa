//! LM-backed enrichment of reviews: reply, summary, and follow-up actions.
//!
//! Providers are optional. With no credential configured the client reports
//! every prompt as unavailable without touching the network, and callers fill
//! in the deterministic fallbacks from [`fallback`].
mod client;
pub mod fallback;
mod prompts;
mod provider;

#[cfg(test)]
pub(crate) mod mock_server;

pub use client::{Enricher, EnrichmentClient, DEFAULT_TIMEOUT};
pub use prompts::PromptBook;
pub use provider::{ApiSchema, Provider, ProviderConfig};

/// Outcome of one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment {
    Generated { text: String, provider: String },
    Unavailable(Unavailable),
}

/// Why no provider produced text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    /// No provider has a credential; nothing was sent.
    NoProvider,
    /// Every configured provider was tried once and failed.
    AllProvidersFailed,
}
