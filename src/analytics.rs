//! Aggregates, filters, and export over a loaded submission table.
//!
//! Everything here is a pure function of the rows it is given.
use crate::store::write_csv;
use crate::submission::{Rating, Submission};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub const EXPORT_FILE_NAME: &str = "submissions_filtered.csv";
pub const EXPORT_MIME: &str = "text/csv";

/// Headline numbers for the admin view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analytics {
    pub total: usize,
    /// Mean rating rounded to two decimals; absent for an empty table.
    pub mean_rating: Option<f64>,
    /// Row count for every rating 1..=5, zero included.
    pub counts: BTreeMap<u8, usize>,
}

pub fn analyze(rows: &[Submission]) -> Analytics {
    let mut counts: BTreeMap<u8, usize> = Rating::all().map(|rating| (rating.value(), 0)).collect();
    let mut sum = 0u64;
    for row in rows {
        *counts.entry(row.rating.value()).or_default() += 1;
        sum += u64::from(row.rating.value());
    }
    let mean_rating = if rows.is_empty() {
        None
    } else {
        Some(round2(sum as f64 / rows.len() as f64))
    };
    Analytics {
        total: rows.len(),
        mean_rating,
        counts,
    }
}

// Ties go to the even neighbour: 2.125 becomes 2.12.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Rating selection plus an optional case-insensitive review search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    ratings: BTreeSet<Rating>,
    search: Option<String>,
}

impl Filter {
    /// An empty rating set matches nothing. A blank search matches everything;
    /// any other term is matched as given, surrounding spaces included.
    pub fn new(ratings: impl IntoIterator<Item = Rating>, search: &str) -> Self {
        let search = (!search.trim().is_empty()).then(|| search.to_lowercase());
        Self {
            ratings: ratings.into_iter().collect(),
            search,
        }
    }

    pub fn matches(&self, row: &Submission) -> bool {
        if !self.ratings.contains(&row.rating) {
            return false;
        }
        match &self.search {
            Some(term) => row.review.to_lowercase().contains(term.as_str()),
            None => true,
        }
    }

    /// Matching rows in table order.
    pub fn apply(&self, rows: &[Submission]) -> Vec<Submission> {
        rows.iter().filter(|row| self.matches(row)).cloned().collect()
    }
}

/// A downloadable file in the backing-file format.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub rows: usize,
    pub bytes: Vec<u8>,
}

pub fn export(rows: &[Submission]) -> Result<ExportArtifact, String> {
    let mut bytes = Vec::new();
    write_csv(rows, &mut bytes)?;
    Ok(ExportArtifact {
        file_name: EXPORT_FILE_NAME,
        mime: EXPORT_MIME,
        rows: rows.len(),
        bytes,
    })
}
