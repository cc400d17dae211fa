//! Human-readable rendering for CLI output.
//!
//! JSON output is produced by serializing the same structs directly; this
//! module only covers the text forms.
use crate::analytics::Analytics;
use crate::pipeline::SubmissionOutcome;
use crate::submission::Submission;
use crate::util::{one_line, truncate_chars};
use std::fmt::Write as _;

const REVIEW_WIDTH: usize = 48;
const SUMMARY_WIDTH: usize = 40;
const TIMESTAMP_WIDTH: usize = 20;

/// Reply, summary, and actions shown to the submitting user.
pub fn render_outcome(outcome: &SubmissionOutcome) -> String {
    let record = &outcome.record;
    let sources = &outcome.sources;
    let mut out = String::new();
    let _ = writeln!(out, "Submitted! Here is our reply:");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", record.ai_response);
    let _ = writeln!(out);
    let _ = writeln!(out, "Summary ({}):", sources.summary.label());
    let _ = writeln!(out, "  {}", record.summary);
    let _ = writeln!(out, "Recommended actions ({}):", sources.actions.label());
    for line in record.actions.lines().filter(|line| !line.trim().is_empty()) {
        let _ = writeln!(out, "  {}", line.trim());
    }
    let _ = write!(out, "Reply source: {}", sources.ai_response.label());
    out
}

pub fn render_stats(stats: &Analytics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total submissions: {}", stats.total);
    match stats.mean_rating {
        Some(mean) => {
            let _ = writeln!(out, "Average rating:    {mean:.2}");
        }
        None => {
            let _ = writeln!(out, "Average rating:    n/a");
        }
    }
    let _ = write!(out, "Ratings:");
    for (rating, count) in &stats.counts {
        let _ = write!(out, "\n  {rating}★  {count}");
    }
    out
}

/// Fixed-width table of rows; long cells are flattened and truncated.
pub fn render_table(rows: &[Submission]) -> String {
    if rows.is_empty() {
        return "No submissions match.".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<ts$}  {:<6}  {:<rw$}  {}",
        "TIMESTAMP",
        "RATING",
        "REVIEW",
        "SUMMARY",
        ts = TIMESTAMP_WIDTH,
        rw = REVIEW_WIDTH
    );
    for row in rows {
        let timestamp = row.timestamp.format("%Y-%m-%d %H:%M:%SZ").to_string();
        let _ = writeln!(
            out,
            "{:<ts$}  {:<6}  {:<rw$}  {}",
            timestamp,
            row.rating,
            truncate_chars(&one_line(&row.review), REVIEW_WIDTH),
            truncate_chars(&one_line(&row.summary), SUMMARY_WIDTH),
            ts = TIMESTAMP_WIDTH,
            rw = REVIEW_WIDTH
        );
    }
    let _ = write!(out, "{} row(s)", rows.len());
    out
}
