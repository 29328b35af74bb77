use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::catalog_defaults::FilterChoice;
use crate::domain::{CalendarEntry, CalendarView};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentListResponse {
    pub start: String,
    pub end: String,
    pub total: usize,
    pub items: Vec<CalendarEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayResponse {
    pub date: String,
    pub items: Vec<CalendarEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub view: CalendarView,
    pub start: String,
    pub end: String,
    /// Only dates with at least one tournament appear
    pub days: BTreeMap<String, Vec<CalendarEntry>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersResponse {
    pub cities: Vec<FilterChoice>,
    pub games: Vec<FilterChoice>,
}
