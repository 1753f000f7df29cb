//! Analytic data decoding.
//!
//! The analytic endpoint describes its own columns: `row_headers` names each
//! position of every row, and which headers appear (and in what order)
//! depends on the query. Headers are canonicalized to a key such as
//! `TimeSpentSeconds`, matched against the known [`Column`]s, and each row is
//! projected positionally into an [`AnalyticRow`].

use std::sync::LazyLock;

use chrono::{Duration, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{AnalyticData, AnalyticRow, RowTimestamp};

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9A-Za-z]+").expect("static pattern"));

/// Columns the decoder knows how to place into an [`AnalyticRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    Rank,
    TimeSpentSeconds,
    NumberOfPeople,
    Person,
    Activity,
    Category,
    Productivity,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Date,
        Column::Rank,
        Column::TimeSpentSeconds,
        Column::NumberOfPeople,
        Column::Person,
        Column::Activity,
        Column::Category,
        Column::Productivity,
    ];

    pub fn canonical_key(self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Rank => "Rank",
            Column::TimeSpentSeconds => "TimeSpentSeconds",
            Column::NumberOfPeople => "NumberOfPeople",
            Column::Person => "Person",
            Column::Activity => "Activity",
            Column::Category => "Category",
            Column::Productivity => "Productivity",
        }
    }

    pub fn from_canonical_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.canonical_key() == key)
    }

    pub fn from_header(header: &str) -> Option<Self> {
        Self::from_canonical_key(&canonicalize_header(header))
    }
}

/// Title-cases every alphanumeric run of `header` and joins them, dropping
/// everything else: `"Time Spent (seconds)"` becomes `"TimeSpentSeconds"`.
/// Only the first letter of a run is touched.
pub fn canonicalize_header(header: &str) -> String {
    WORD_PATTERN
        .find_iter(header)
        .map(|word| {
            let mut chars = word.as_str().chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Positional header index → known column, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    columns: Vec<Option<Column>>,
}

impl ColumnMap {
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let columns: Vec<Option<Column>> = headers
            .iter()
            .map(|h| {
                let column = Column::from_header(h.as_ref());
                if column.is_none() {
                    log::debug!("Ignoring unrecognized column {:?}", h.as_ref());
                }
                column
            })
            .collect();

        for (i, column) in columns.iter().enumerate() {
            let Some(column) = column else { continue };
            if let Some(first) = columns[..i].iter().position(|c| c.as_ref() == Some(column)) {
                log::warn!(
                    "Headers {:?} and {:?} both map to {}; the later column wins",
                    headers[first].as_ref(),
                    headers[i].as_ref(),
                    column.canonical_key()
                );
            }
        }

        Self { columns }
    }

    pub fn get(&self, index: usize) -> Option<Column> {
        self.columns.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Empty or missing identifiers mean "no zone".
pub fn resolve_timezone(timezone: Option<&str>) -> Result<Option<Tz>> {
    match timezone.map(str::trim).filter(|tz| !tz.is_empty()) {
        None => Ok(None),
        Some(name) => name
            .parse::<Tz>()
            .map(Some)
            .map_err(|_| Error::UnknownTimezone(name.to_string())),
    }
}

#[derive(Deserialize)]
struct RawAnalyticData {
    notes: String,
    row_headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Decodes an analytic data body, naming the timezone by IANA identifier.
pub fn decode_analytic_data(body: &[u8], timezone: Option<&str>) -> Result<AnalyticData> {
    let zone = resolve_timezone(timezone)?;
    decode_analytic_data_in(body, zone)
}

/// Decodes an analytic data body with an already resolved zone.
pub fn decode_analytic_data_in(body: &[u8], zone: Option<Tz>) -> Result<AnalyticData> {
    let raw: RawAnalyticData = serde_json::from_slice(body).map_err(|e| {
        api_error(body).unwrap_or_else(|| Error::MalformedResponse(e.to_string()))
    })?;

    let columns = ColumnMap::from_headers(&raw.row_headers);

    let rows = raw
        .rows
        .iter()
        .enumerate()
        .map(|(index, cells)| decode_row(index, cells, &columns, &raw.row_headers, zone))
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "Decoded {} analytic rows across {} columns",
        rows.len(),
        columns.len()
    );

    Ok(AnalyticData {
        notes: raw.notes,
        row_headers: raw.row_headers,
        rows,
        parameters: None,
    })
}

/// The service reports failures as `{"error": "...", "messages": "..."}`.
pub(crate) fn api_error(body: &[u8]) -> Option<Error> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let error = value.get("error")?.as_str()?;
    let message = match value.get("messages").and_then(Value::as_str) {
        Some(detail) if !detail.is_empty() => format!("{}: {}", error, detail),
        _ => error.to_string(),
    };
    Some(Error::Api { message })
}

fn decode_row(
    row: usize,
    cells: &[Value],
    columns: &ColumnMap,
    headers: &[String],
    zone: Option<Tz>,
) -> Result<AnalyticRow> {
    if cells.len() > columns.len() {
        log::warn!(
            "Row {} has {} cells for {} headers; extra cells ignored",
            row,
            cells.len(),
            columns.len()
        );
    }

    let mut decoded = AnalyticRow::default();
    for (index, cell) in cells.iter().enumerate() {
        let Some(column) = columns.get(index) else {
            continue;
        };
        if cell.is_null() {
            continue;
        }
        let cell = Cell {
            row,
            header: &headers[index],
            value: cell,
        };
        match column {
            Column::Date => decoded.date = Some(cell.timestamp(zone)?),
            Column::Rank => decoded.rank = Some(cell.integer()?),
            Column::TimeSpentSeconds => decoded.time_spent_seconds = Some(cell.integer()?),
            Column::NumberOfPeople => decoded.number_of_people = Some(cell.integer()?),
            Column::Person => decoded.person = Some(cell.string()?),
            Column::Activity => decoded.activity = Some(cell.string()?),
            Column::Category => decoded.category = Some(cell.string()?),
            Column::Productivity => decoded.productivity = Some(cell.integer()?),
        }
    }
    Ok(decoded)
}

struct Cell<'a> {
    row: usize,
    header: &'a str,
    value: &'a Value,
}

impl Cell<'_> {
    fn field_error(&self, reason: impl Into<String>) -> Error {
        Error::FieldDecode {
            row: self.row,
            column: self.header.to_string(),
            reason: reason.into(),
        }
    }

    fn integer<T: TryFrom<i64>>(&self) -> Result<T> {
        let n = self
            .value
            .as_i64()
            .ok_or_else(|| self.field_error(format!("expected integer, got {}", self.value)))?;
        T::try_from(n).map_err(|_| self.field_error(format!("{} is out of range", n)))
    }

    fn string(&self) -> Result<String> {
        self.value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.field_error(format!("expected string, got {}", self.value)))
    }

    fn timestamp(&self, zone: Option<Tz>) -> Result<RowTimestamp> {
        let text = self
            .value
            .as_str()
            .ok_or_else(|| self.field_error(format!("expected date string, got {}", self.value)))?;
        let naive = NaiveDateTime::parse_from_str(text, DATE_FORMAT).map_err(|e| {
            Error::BadTimestamp {
                value: text.to_string(),
                reason: e.to_string(),
            }
        })?;
        match zone {
            None => Ok(RowTimestamp::Naive(naive)),
            Some(tz) => localize(tz, naive)
                .map(RowTimestamp::Zoned)
                .ok_or_else(|| Error::BadTimestamp {
                    value: text.to_string(),
                    reason: format!("wall time does not exist in {}", tz.name()),
                }),
        }
    }
}

/// Pins a wall-clock time to `tz`. Ambiguous times take the earlier
/// instant; times inside a forward gap are moved one hour later.
fn localize(tz: Tz, naive: NaiveDateTime) -> Option<chrono::DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest(),
    }
}
