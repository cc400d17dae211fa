//! Workflow status step.
//!
//! Status reports where data lives and whether live enrichment is possible.
//! A broken table is reported in the summary rather than aborting it.
use super::FALLBACK_ONLY_NOTICE;
use crate::cli::StatusArgs;
use crate::config::Settings;
use crate::enrich::ApiSchema;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub data_path: String,
    pub config_path: Option<String>,
    pub rows: Option<usize>,
    pub load_error: Option<String>,
    pub business: String,
    pub timeout_secs: u64,
    pub providers: Vec<ProviderStatus>,
    pub fallback_only: bool,
}

#[derive(Debug, Serialize)]
pub struct ProviderStatus {
    pub name: String,
    pub url: String,
    pub model: String,
    pub schema: ApiSchema,
    pub api_key_env: String,
    pub configured: bool,
}

pub fn run_status(settings: &Settings, args: &StatusArgs) -> Result<()> {
    let summary = status_summary(settings);
    if args.json {
        let text = serde_json::to_string_pretty(&summary).context("serialize status")?;
        println!("{text}");
    } else {
        println!("{}", render_status(&summary));
    }
    Ok(())
}

pub fn status_summary(settings: &Settings) -> StatusSummary {
    let (rows, load_error) = match settings.store().load() {
        Ok(rows) => (Some(rows.len()), None),
        Err(err) => (None, Some(err.to_string())),
    };
    let providers: Vec<ProviderStatus> = [&settings.config.primary, &settings.config.secondary]
        .into_iter()
        .map(|config| ProviderStatus {
            name: config.name.clone(),
            url: config.url.clone(),
            model: config.model.clone(),
            schema: config.schema,
            api_key_env: config.api_key_env.clone(),
            configured: config.resolve().is_configured(),
        })
        .collect();
    let fallback_only = !providers.iter().any(|provider| provider.configured);
    StatusSummary {
        data_path: settings.data_path.display().to_string(),
        config_path: settings
            .config_path
            .as_ref()
            .map(|path| path.display().to_string()),
        rows,
        load_error,
        business: settings.config.business.clone(),
        timeout_secs: settings.config.timeout_secs,
        providers,
        fallback_only,
    }
}

fn render_status(summary: &StatusSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "data:     {}", summary.data_path);
    let _ = writeln!(
        out,
        "config:   {}",
        summary.config_path.as_deref().unwrap_or("(built-in defaults)")
    );
    match (&summary.rows, &summary.load_error) {
        (Some(rows), _) => {
            let _ = writeln!(out, "rows:     {rows}");
        }
        (None, Some(err)) => {
            let _ = writeln!(out, "rows:     unreadable ({err})");
        }
        (None, None) => {}
    }
    let _ = writeln!(out, "business: {}", summary.business);
    let _ = writeln!(out, "timeout:  {}s", summary.timeout_secs);
    let _ = write!(out, "providers:");
    for (idx, provider) in summary.providers.iter().enumerate() {
        let role = if idx == 0 { "primary" } else { "secondary" };
        let state = if provider.configured {
            "configured".to_string()
        } else {
            format!("missing {}", provider.api_key_env)
        };
        let _ = write!(
            out,
            "\n  {role:<9} {} ({}) {state}",
            provider.name, provider.model
        );
    }
    if summary.fallback_only {
        let _ = write!(out, "\n{FALLBACK_ONLY_NOTICE}");
    }
    out
}
