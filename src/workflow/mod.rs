//! Workflow steps behind each CLI command.
//!
//! Each step resolves settings, calls into the core modules, and prints. The
//! core modules never print.
mod admin;
mod init;
mod status;
mod submit;

pub(crate) use admin::{run_delete_all, run_export, run_list, run_stats};
pub(crate) use init::run_init_config;
pub(crate) use status::run_status;
pub(crate) use submit::run_submit;

use crate::analytics::Filter;
use crate::cli::FilterArgs;
use crate::submission::Rating;

/// Omitted `--rating` selects every rating; an empty list selects none.
pub(crate) fn filter_from_args(args: &FilterArgs) -> Filter {
    match &args.ratings {
        Some(ratings) => Filter::new(ratings.iter().copied(), &args.search),
        None => Filter::new(Rating::all(), &args.search),
    }
}

/// Printed whenever enrichment will run without any provider.
pub(crate) const FALLBACK_ONLY_NOTICE: &str = "note: no LM credential set \
(OPENAI_API_KEY / OPENROUTER_API_KEY or the variables named in the config); \
replies, summaries, and actions use fallback text";
