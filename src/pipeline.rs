//! Submission intake: validate, enrich, assemble, persist.
//!
//! A submission is only reported as saved once the store has rewritten the
//! backing file. Nothing is written for a rejected review.
use crate::enrich::{fallback, Enricher, Enrichment, PromptBook};
use crate::error::SubmitError;
use crate::store::Store;
use crate::submission::{now_timestamp, Rating, Submission};
use serde::Serialize;

/// Where an enrichment's text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    Provider { name: String },
    Fallback,
}

impl Source {
    pub fn label(&self) -> &str {
        match self {
            Source::Provider { name } => name,
            Source::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sources {
    pub ai_response: Source,
    pub summary: Source,
    pub actions: Source,
}

/// A persisted submission and the provenance of its enrichments.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub record: Submission,
    pub sources: Sources,
}

/// Runs the intake steps against one store and one enricher.
pub struct Pipeline<'a, E: Enricher> {
    store: &'a Store,
    enricher: &'a E,
    prompts: &'a PromptBook,
}

impl<'a, E: Enricher> Pipeline<'a, E> {
    pub fn new(store: &'a Store, enricher: &'a E, prompts: &'a PromptBook) -> Self {
        Self {
            store,
            enricher,
            prompts,
        }
    }

    pub fn submit(&self, rating: Rating, review: &str) -> Result<SubmissionOutcome, SubmitError> {
        let review = validate_review(review)?;

        let (ai_response, reply_source) = resolve(
            self.enricher.generate(&self.prompts.reply(rating, review)),
            fallback::reply,
        );
        let (summary, summary_source) = resolve(
            self.enricher.generate(&self.prompts.summary(review)),
            || fallback::summary(review),
        );
        let (actions, actions_source) = resolve(
            self.enricher.generate(&self.prompts.actions(rating, review)),
            fallback::actions,
        );

        let record = Submission {
            timestamp: now_timestamp(),
            rating,
            review: review.to_string(),
            ai_response,
            summary,
            actions,
        };
        self.store.append(record.clone())?;
        tracing::info!(
            rating = rating.value(),
            reply = reply_source.label(),
            summary = summary_source.label(),
            actions = actions_source.label(),
            "submission persisted"
        );
        Ok(SubmissionOutcome {
            record,
            sources: Sources {
                ai_response: reply_source,
                summary: summary_source,
                actions: actions_source,
            },
        })
    }
}

/// Trimmed review text, or a validation error when nothing is left.
pub fn validate_review(review: &str) -> Result<&str, SubmitError> {
    let trimmed = review.trim();
    if trimmed.is_empty() {
        return Err(SubmitError::EmptyReview);
    }
    Ok(trimmed)
}

fn resolve(enrichment: Enrichment, fallback: impl FnOnce() -> String) -> (String, Source) {
    match enrichment {
        Enrichment::Generated { text, provider } => (text, Source::Provider { name: provider }),
        Enrichment::Unavailable(_) => (fallback(), Source::Fallback),
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
