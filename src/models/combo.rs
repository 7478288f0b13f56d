//! Daily Combo Models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::combo::NAME_PREFIX;
use crate::utils::serde::{deserialize_string_or_number, parse_calendar_day};

/// Daily combo record as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCombo {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub combo_name: String,
    #[serde(default)]
    pub item_1: u32,
    #[serde(default)]
    pub item_2: u32,
    #[serde(default)]
    pub item_3: u32,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub combo_reward: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl DailyCombo {
    pub fn start_day(&self) -> Option<NaiveDate> {
        parse_calendar_day(&self.start_date)
    }

    /// Numeric suffix of a "Daily Combo <n>" name, wherever it appears in the name
    pub fn sequence_number(&self) -> Option<u64> {
        parse_sequence_number(&self.combo_name)
    }
}

pub fn parse_sequence_number(name: &str) -> Option<u64> {
    let needle = format!("{NAME_PREFIX} ");
    name.match_indices(&needle).find_map(|(index, _)| {
        let digits: String = name[index + needle.len()..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    })
}

pub fn sequence_name(number: u64) -> String {
    format!("{NAME_PREFIX} {number}")
}

/// Body of `POST /admin/dailycombo/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboDraft {
    pub combo_name: String,
    pub item_1: u32,
    pub item_2: u32,
    pub item_3: u32,
    pub combo_reward: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
