//! Feedback desk CLI.
//!
//! Customers submit a rating and review; each submission gets an LM-drafted
//! reply, summary, and action list (or fixed fallbacks) and lands in a CSV
//! table that the admin commands summarize, filter, export, and clear.
use anyhow::Result;
use clap::Parser;

mod analytics;
mod cli;
mod config;
mod enrich;
mod error;
mod output;
mod pipeline;
mod store;
mod submission;
mod util;
mod workflow;

use cli::{AdminCommand, Command, RootArgs};
use config::Settings;

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.global.verbose);

    let global = &args.global;
    let settings = || Settings::load(global.config.as_deref(), global.data.as_deref());
    match &args.command {
        Command::Submit(submit_args) => workflow::run_submit(&settings()?, submit_args),
        Command::Admin(admin) => match admin {
            AdminCommand::Stats(stats_args) => workflow::run_stats(&settings()?, stats_args),
            AdminCommand::List(list_args) => workflow::run_list(&settings()?, list_args),
            AdminCommand::Export(export_args) => workflow::run_export(&settings()?, export_args),
            AdminCommand::DeleteAll(delete_args) => {
                workflow::run_delete_all(&settings()?, delete_args)
            }
        },
        Command::Status(status_args) => workflow::run_status(&settings()?, status_args),
        Command::InitConfig(init_args) => workflow::run_init_config(init_args),
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or info with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
