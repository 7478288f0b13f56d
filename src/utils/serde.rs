/*!
 * Serde utilities for the loosely typed records the backend returns.
 *
 * The backend stores rewards sometimes as numbers and sometimes as strings,
 * and dates sometimes as plain days and sometimes as full timestamps.
 */

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Deserialize a value that may be a string, a number or null into a `String`.
///
/// ```json
/// "task_reward": 50000      -> "50000"
/// "task_reward": "50000"    -> "50000"
/// "task_reward": null       -> ""
/// ```
pub fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(String::new()),
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "Expected string or number, found: {other}"
        ))),
    }
}

/// Parse the calendar day of a backend date field.
///
/// Accepts `2024-06-01` as well as timestamps such as `2024-06-01T00:00:00.000Z`;
/// only the leading day is significant.
pub fn parse_calendar_day(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
