use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One day of the daily summary feed. Hours are decimal, percentages are of
/// the day's total logged time, and `*_duration_formatted` are display
/// strings such as `"2h 5m"`. Missing or null fields read as zero/empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailySummary {
    #[serde(deserialize_with = "whole_number")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub productivity_pulse: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub all_distracting_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub all_distracting_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub all_distracting_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub all_productive_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub all_productive_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub all_productive_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub business_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub business_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub business_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub communication_and_scheduling_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub communication_and_scheduling_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub communication_and_scheduling_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub design_and_composition_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub design_and_composition_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub design_and_composition_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub distracting_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub distracting_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub distracting_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub entertainment_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub entertainment_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub entertainment_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub neutral_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub neutral_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub neutral_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub news_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub news_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub news_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub productive_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub productive_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub productive_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_and_learning_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_and_learning_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub reference_and_learning_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub shopping_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub shopping_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub shopping_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub social_networking_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub social_networking_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub social_networking_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub software_development_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub software_development_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub software_development_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uncategorized_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub uncategorized_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub uncategorized_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub utilities_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub utilities_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub utilities_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub very_distracting_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub very_distracting_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub very_distracting_duration_formatted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub very_productive_hours: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub very_productive_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub very_productive_duration_formatted: String,
}

impl DailySummary {
    /// The summary's calendar day, if `date` is a `YYYY-MM-DD` string.
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ids arrive as JSON numbers that may carry a fractional part (`1.0`).
fn whole_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(n) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(0);
    };
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 {
        Ok(n as u64)
    } else {
        Err(serde::de::Error::custom(format!("invalid id {}", n)))
    }
}
