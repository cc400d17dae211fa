//! CLI argument parsing for the feedback desk.
//!
//! The CLI only wires arguments to workflow steps; storage, enrichment, and
//! analytics know nothing about it.
use crate::submission::Rating;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "fdesk",
    version,
    about = "Collect reviews, draft replies with an LM, and review the results",
    after_help = "Examples:\n  fdesk submit --rating 5 --review \"Lovely staff\"\n  echo \"Slow service\" | fdesk submit --rating 2\n  fdesk admin stats\n  fdesk admin list --rating 1,2 --search slow\n  fdesk admin export --rating 4,5 --out good.csv\n  fdesk admin delete-all --acknowledge\n  fdesk status",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Submission table (CSV); overrides FDESK_DATA and the config file
    #[arg(long, value_name = "PATH", global = true)]
    pub data: Option<PathBuf>,

    /// Config file (JSON); overrides FDESK_CONFIG
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Submit(SubmitArgs),
    /// Analytics, listing, export, and bulk delete
    #[command(subcommand)]
    Admin(AdminCommand),
    Status(StatusArgs),
    InitConfig(InitConfigArgs),
}

/// Submit command inputs.
#[derive(Parser, Debug)]
#[command(about = "Submit a rating and review")]
pub struct SubmitArgs {
    /// Star rating from 1 to 5
    #[arg(long, value_parser = parse_rating)]
    pub rating: Rating,

    /// Review text; read from stdin when omitted
    #[arg(long)]
    pub review: Option<String>,

    /// Emit the saved record as JSON
    #[arg(long)]
    pub json: bool,
}

/// Admin view commands.
#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    Stats(StatsArgs),
    List(ListArgs),
    Export(ExportArgs),
    DeleteAll(DeleteAllArgs),
}

#[derive(Parser, Debug)]
#[command(about = "Show totals, mean rating, and per-rating counts")]
pub struct StatsArgs {
    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Row selection shared by list and export.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Ratings to keep (comma separated); pass the flag with no value to select none
    #[arg(
        long = "rating",
        value_name = "R",
        value_delimiter = ',',
        num_args = 0..,
        value_parser = parse_rating
    )]
    pub ratings: Option<Vec<Rating>>,

    /// Case-insensitive substring to look for in the review text
    #[arg(long, default_value = "")]
    pub search: String,
}

#[derive(Parser, Debug)]
#[command(about = "List submissions matching the filters")]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Export submissions matching the filters as CSV")]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output file, or `-` for stdout (default: submissions_filtered.csv)
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(about = "Delete every submission (two-step confirmation)")]
pub struct DeleteAllArgs {
    /// Acknowledge that all submissions will be removed
    #[arg(long)]
    pub acknowledge: bool,

    /// Confirm without the interactive prompt
    #[arg(long, requires = "acknowledge")]
    pub yes: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Show data location, row count, and provider availability")]
pub struct StatusArgs {
    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Write a default config file")]
pub struct InitConfigArgs {
    /// Destination (default: the user config dir)
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

fn parse_rating(raw: &str) -> Result<Rating, String> {
    raw.trim()
        .parse::<u8>()
        .map_err(|_| format!("not a rating: {raw:?}"))
        .and_then(Rating::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        RootArgs::command().debug_assert();
    }

    #[test]
    fn rating_flag_without_values_selects_none() {
        let args = RootArgs::try_parse_from(["fdesk", "admin", "list", "--rating"]).unwrap();
        let Command::Admin(AdminCommand::List(list)) = args.command else {
            panic!("expected admin list");
        };
        assert_eq!(list.filter.ratings, Some(Vec::new()));
    }

    #[test]
    fn rating_list_is_comma_separated() {
        let args = RootArgs::try_parse_from([
            "fdesk", "admin", "export", "--rating", "4,5", "--search", "slow",
        ])
        .unwrap();
        let Command::Admin(AdminCommand::Export(export)) = args.command else {
            panic!("expected admin export");
        };
        let values: Vec<u8> = export
            .filter
            .ratings
            .unwrap()
            .into_iter()
            .map(Rating::value)
            .collect();
        assert_eq!(values, vec![4, 5]);
        assert_eq!(export.filter.search, "slow");
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        assert!(RootArgs::try_parse_from(["fdesk", "submit", "--rating", "6"]).is_err());
    }

    #[test]
    fn yes_requires_acknowledge() {
        assert!(RootArgs::try_parse_from(["fdesk", "admin", "delete-all", "--yes"]).is_err());
    }
}
