use chrono::{DateTime, Duration, NaiveDateTime};
use chrono_tz::Tz;
use serde::Serialize;

use super::AnalyticDataQuery;

/// Decoded analytic data report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalyticData {
    pub notes: String,
    /// Headers exactly as the server sent them.
    pub row_headers: Vec<String>,
    pub rows: Vec<AnalyticRow>,
    /// Filters that produced this report, when fetched through the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<AnalyticDataQuery>,
}

/// One report row. A field is `None` when its column was not part of the
/// response (or the cell was null); zero is a real value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyticRow {
    pub date: Option<RowTimestamp>,
    pub rank: Option<u32>,
    pub time_spent_seconds: Option<i64>,
    pub number_of_people: Option<u32>,
    pub person: Option<String>,
    pub activity: Option<String>,
    pub category: Option<String>,
    /// -2 (very distracting) ..= 2 (very productive)
    pub productivity: Option<i8>,
}

impl AnalyticRow {
    pub fn time_spent(&self) -> Option<Duration> {
        self.time_spent_seconds.map(Duration::seconds)
    }
}

/// The `Date` column: wall-clock time, optionally pinned to a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RowTimestamp {
    Naive(NaiveDateTime),
    Zoned(DateTime<Tz>),
}

impl RowTimestamp {
    /// Wall-clock reading, whether or not a zone is attached.
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            Self::Naive(naive) => *naive,
            Self::Zoned(zoned) => zoned.naive_local(),
        }
    }

    pub fn timezone(&self) -> Option<Tz> {
        match self {
            Self::Naive(_) => None,
            Self::Zoned(zoned) => Some(zoned.timezone()),
        }
    }
}
