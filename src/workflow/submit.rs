//! Workflow submit step: the user-facing intake.
use super::FALLBACK_ONLY_NOTICE;
use crate::cli::SubmitArgs;
use crate::config::Settings;
use crate::output::render_outcome;
use crate::pipeline::Pipeline;
use anyhow::{Context, Result};
use std::io::Read;

/// Validate, enrich, and persist one review, then print the reply.
pub fn run_submit(settings: &Settings, args: &SubmitArgs) -> Result<()> {
    let review = match &args.review {
        Some(review) => review.clone(),
        None => read_review_from_stdin()?,
    };

    let client = settings.enrichment_client();
    if client.is_fallback_only() {
        eprintln!("{FALLBACK_ONLY_NOTICE}");
    } else {
        tracing::info!(providers = ?client.configured_providers(), "live enrichment enabled");
    }
    let store = settings.store();
    let prompts = settings.prompts();
    let outcome = Pipeline::new(&store, &client, &prompts)
        .submit(args.rating, &review)
        .context("submission was not saved")?;

    if args.json {
        let text = serde_json::to_string_pretty(&outcome).context("serialize submission")?;
        println!("{text}");
    } else {
        println!("{}", render_outcome(&outcome));
    }
    Ok(())
}

fn read_review_from_stdin() -> Result<String> {
    let mut review = String::new();
    std::io::stdin()
        .read_to_string(&mut review)
        .context("read review from stdin")?;
    Ok(review)
}
