//! Typed submission record shared by the store, pipeline, and admin views.
//!
//! Rows are immutable once written. The pipeline builds each record in one
//! step from validated input and enrichments.
use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column order of the backing file and every export.
pub const COLUMNS: [&str; 6] = [
    "timestamp",
    "rating",
    "review",
    "ai_response",
    "summary",
    "actions",
];

/// Star rating in the inclusive range 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Build a rating, rejecting values outside 1..=5.
    pub fn new(value: u8) -> Result<Self, String> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!(
                "rating must be between {} and {} (got {value})",
                Self::MIN,
                Self::MAX
            ))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Every rating value in ascending order.
    pub fn all() -> impl Iterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl FromStr for Rating {
    type Err = String;

    // Dataframe tools write integer columns as `4.0` once any cell was blank,
    // so integral floats are accepted too.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if let Ok(value) = trimmed.parse::<u8>() {
            return Rating::new(value);
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.fract() == 0.0 && (1.0..=5.0).contains(&value) => {
                Rating::new(value as u8)
            }
            _ => Err(format!("rating must be an integer from 1 to 5 (got {raw:?})")),
        }
    }
}

impl TryFrom<String> for Rating {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

/// One rating + review plus the three enrichments attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(with = "iso_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub rating: Rating,
    pub review: String,
    pub ai_response: String,
    pub summary: String,
    pub actions: String,
}

impl Submission {
    /// Name of the first required text column that is blank, if any.
    pub fn first_blank_field(&self) -> Option<&'static str> {
        [
            ("review", &self.review),
            ("ai_response", &self.ai_response),
            ("summary", &self.summary),
            ("actions", &self.actions),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// Creation time for a new record, truncated so it survives a CSV round trip.
pub fn now_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|err| format!("invalid timestamp {raw:?}: {err}"))
}

mod iso_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
