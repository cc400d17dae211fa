//! Workflow admin steps: stats, list, export, and bulk delete.
//!
//! A table that fails to load is an error for every admin step; an
//! unreadable file is never shown as an empty table.
use super::filter_from_args;
use crate::analytics::{analyze, export};
use crate::cli::{DeleteAllArgs, ExportArgs, ListArgs, StatsArgs};
use crate::config::Settings;
use crate::error::StoreError;
use crate::output::{render_stats, render_table};
use crate::store::Store;
use crate::submission::Submission;
use crate::util::display_path;
use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, Write};
use std::path::Path;

const CONFIRM_WORD: &str = "delete";

pub fn run_stats(settings: &Settings, args: &StatsArgs) -> Result<()> {
    let rows = load_rows(&settings.store())?;
    let stats = analyze(&rows);
    if args.json {
        let text = serde_json::to_string_pretty(&stats).context("serialize stats")?;
        println!("{text}");
    } else {
        println!("{}", render_stats(&stats));
    }
    Ok(())
}

pub fn run_list(settings: &Settings, args: &ListArgs) -> Result<()> {
    let rows = load_rows(&settings.store())?;
    let filtered = filter_from_args(&args.filter).apply(&rows);
    if args.json {
        let text = serde_json::to_string_pretty(&filtered).context("serialize rows")?;
        println!("{text}");
    } else {
        println!("{}", render_table(&filtered));
    }
    Ok(())
}

pub fn run_export(settings: &Settings, args: &ExportArgs) -> Result<()> {
    let rows = load_rows(&settings.store())?;
    let filtered = filter_from_args(&args.filter).apply(&rows);
    let artifact = export(&filtered).map_err(|reason| anyhow!("export failed: {reason}"))?;

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| artifact.file_name.into());
    if out.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&artifact.bytes).context("write export to stdout")?;
        stdout.flush().context("flush stdout")?;
        return Ok(());
    }
    std::fs::write(&out, &artifact.bytes).with_context(|| format!("write {}", out.display()))?;
    let cwd = std::env::current_dir().ok();
    eprintln!(
        "wrote {} row(s) to {} ({})",
        artifact.rows,
        display_path(&out, cwd.as_deref()),
        artifact.mime
    );
    Ok(())
}

pub fn run_delete_all(settings: &Settings, args: &DeleteAllArgs) -> Result<()> {
    let store = settings.store();
    let Some(acknowledged) = DeleteRequest::new(&store).acknowledge(args.acknowledge) else {
        return Err(anyhow!(
            "refusing to delete all submissions in {} without --acknowledge",
            store.path().display()
        ));
    };

    let confirmed = args.yes || {
        let stdin = std::io::stdin();
        prompt_confirmation(store.path(), &mut stdin.lock(), &mut std::io::stderr())?
    };
    if !acknowledged.confirm(confirmed).context("delete all submissions")? {
        return Err(anyhow!("delete-all not confirmed; nothing was removed"));
    }
    eprintln!("deleted all submissions in {}", store.path().display());
    Ok(())
}

fn load_rows(store: &Store) -> Result<Vec<Submission>> {
    store
        .load()
        .context("cannot show admin data: the submission table is unreadable")
}

/// Bulk delete that has not been acknowledged yet.
pub(crate) struct DeleteRequest<'a> {
    store: &'a Store,
}

/// Bulk delete whose intent was acknowledged and now awaits confirmation.
pub(crate) struct AcknowledgedDelete<'a> {
    store: &'a Store,
}

impl<'a> DeleteRequest<'a> {
    pub(crate) fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// `None` unless the caller acknowledged the intent to delete.
    pub(crate) fn acknowledge(self, acknowledged: bool) -> Option<AcknowledgedDelete<'a>> {
        acknowledged.then_some(AcknowledgedDelete { store: self.store })
    }
}

impl AcknowledgedDelete<'_> {
    /// Delete only when confirmed. Returns whether anything was attempted.
    pub(crate) fn confirm(self, confirmed: bool) -> Result<bool, StoreError> {
        if !confirmed {
            return Ok(false);
        }
        self.store.delete_all()?;
        Ok(true)
    }
}

/// Ask for the confirmation word; anything else declines.
fn prompt_confirmation<R: BufRead, W: Write>(
    path: &Path,
    input: &mut R,
    prompt: &mut W,
) -> Result<bool> {
    write!(
        prompt,
        "This permanently removes {}. Type '{CONFIRM_WORD}' to confirm: ",
        path.display()
    )
    .context("write confirmation prompt")?;
    prompt.flush().context("flush confirmation prompt")?;
    let mut answer = String::new();
    input.read_line(&mut answer).context("read confirmation")?;
    Ok(answer.trim().eq_ignore_ascii_case(CONFIRM_WORD))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::{now_timestamp, Rating};

    fn seeded_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = Store::new(dir.path().join("submissions.csv"));
        store
            .append(Submission {
                timestamp: now_timestamp(),
                rating: Rating::new(4).unwrap(),
                review: "Good".to_string(),
                ai_response: "Thanks".to_string(),
                summary: "Good".to_string(),
                actions: "- a".to_string(),
            })
            .expect("seed");
        (dir, store)
    }

    #[test]
    fn confirmation_requires_the_word() {
        let path = Path::new("/tmp/x.csv");
        let mut prompt = Vec::new();
        assert!(prompt_confirmation(path, &mut "delete\n".as_bytes(), &mut prompt).unwrap());
        assert!(String::from_utf8(prompt).unwrap().contains("Type 'delete'"));
        assert!(prompt_confirmation(path, &mut " DELETE \n".as_bytes(), &mut Vec::new()).unwrap());
        assert!(!prompt_confirmation(path, &mut "y\n".as_bytes(), &mut Vec::new()).unwrap());
        assert!(!prompt_confirmation(path, &mut "".as_bytes(), &mut Vec::new()).unwrap());
    }

    #[test]
    fn acknowledged_then_confirmed_delete_clears_table() {
        let (_dir, store) = seeded_store();
        let deleted = DeleteRequest::new(&store)
            .acknowledge(true)
            .expect("acknowledged")
            .confirm(true)
            .expect("delete");
        assert!(deleted);
        assert!(store.load().unwrap().is_empty());
        DeleteRequest::new(&store)
            .acknowledge(true)
            .expect("acknowledged")
            .confirm(true)
            .expect("second delete is a no-op");
    }

    #[test]
    fn unacknowledged_or_unconfirmed_delete_keeps_rows() {
        let (_dir, store) = seeded_store();
        assert!(DeleteRequest::new(&store).acknowledge(false).is_none());
        let deleted = DeleteRequest::new(&store)
            .acknowledge(true)
            .expect("acknowledged")
            .confirm(false)
            .expect("declined");
        assert!(!deleted);
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn unreadable_table_is_an_error_not_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("submissions.csv");
        std::fs::write(&path, "timestamp,rating\nnope,7\n").unwrap();
        let err = load_rows(&Store::new(path)).expect_err("malformed table");
        assert!(format!("{err:#}").contains("unreadable"));
    }
}
