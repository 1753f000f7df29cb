use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Filters for the analytic data endpoint. Unset or blank filters are left
/// off the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticDataQuery {
    pub perspective: Option<String>,
    pub resolution_time: Option<String>,
    pub restrict_group: Option<String>,
    pub restrict_begin: Option<String>,
    pub restrict_end: Option<String>,
    pub restrict_kind: Option<String>,
    pub restrict_thing: Option<String>,
    pub restrict_thingy: Option<String>,
}

impl AnalyticDataQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// `rank` or `interval`.
    pub fn perspective(mut self, value: impl Into<String>) -> Self {
        self.perspective = Some(value.into());
        self
    }

    /// `month`, `week`, `day`, `hour` or `minute`.
    pub fn resolution_time(mut self, value: impl Into<String>) -> Self {
        self.resolution_time = Some(value.into());
        self
    }

    pub fn restrict_group(mut self, value: impl Into<String>) -> Self {
        self.restrict_group = Some(value.into());
        self
    }

    pub fn restrict_begin(mut self, value: impl Into<String>) -> Self {
        self.restrict_begin = Some(value.into());
        self
    }

    pub fn restrict_end(mut self, value: impl Into<String>) -> Self {
        self.restrict_end = Some(value.into());
        self
    }

    /// `category`, `activity`, `productivity`, `document`, `efficiency` or `overview`.
    pub fn restrict_kind(mut self, value: impl Into<String>) -> Self {
        self.restrict_kind = Some(value.into());
        self
    }

    pub fn restrict_thing(mut self, value: impl Into<String>) -> Self {
        self.restrict_thing = Some(value.into());
        self
    }

    pub fn restrict_thingy(mut self, value: impl Into<String>) -> Self {
        self.restrict_thingy = Some(value.into());
        self
    }

    /// Sets `restrict_begin`/`restrict_end` from calendar dates.
    pub fn with_date_range(self, begin: NaiveDate, end: NaiveDate) -> Self {
        self.restrict_begin(begin.format("%Y-%m-%d").to_string())
            .restrict_end(end.format("%Y-%m-%d").to_string())
    }

    /// Sets a filter by its wire name. Returns false for names the endpoint
    /// does not know.
    pub fn set(&mut self, wire_name: &str, value: impl Into<String>) -> bool {
        let slot = match wire_name {
            "perspective" => &mut self.perspective,
            "resolution_time" => &mut self.resolution_time,
            "restrict_group" => &mut self.restrict_group,
            "restrict_begin" => &mut self.restrict_begin,
            "restrict_end" => &mut self.restrict_end,
            "restrict_kind" => &mut self.restrict_kind,
            "restrict_thing" => &mut self.restrict_thing,
            "restrict_thingy" => &mut self.restrict_thingy,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }

    /// Wire name → value pairs for every filter that is set and non-blank.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let fields: [(&'static str, &Option<String>); 8] = [
            ("perspective", &self.perspective),
            ("resolution_time", &self.resolution_time),
            ("restrict_group", &self.restrict_group),
            ("restrict_begin", &self.restrict_begin),
            ("restrict_end", &self.restrict_end),
            ("restrict_kind", &self.restrict_kind),
            ("restrict_thing", &self.restrict_thing),
            ("restrict_thingy", &self.restrict_thingy),
        ];

        fields
            .into_iter()
            .filter_map(|(name, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (name, v.to_string()))
            })
            .collect()
    }
}
