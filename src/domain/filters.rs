use std::collections::BTreeMap;

use serde::Deserialize;

use super::models::CalendarEntry;

/// City / game filter; an absent or blank field matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TournamentFilter {
    pub city: Option<String>,
    pub game: Option<String>,
}

impl TournamentFilter {
    pub fn new(city: Option<String>, game: Option<String>) -> Self {
        Self { city, game }
    }

    pub fn matches(&self, entry: &CalendarEntry) -> bool {
        let details = entry.details();
        field_matches(self.city.as_deref(), &details.city)
            && field_matches(self.game.as_deref(), &details.tcg)
    }

    pub fn apply(&self, entries: Vec<CalendarEntry>) -> Vec<CalendarEntry> {
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}

fn field_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted.map(str::trim) {
        None | Some("") => true,
        Some(wanted) => wanted == actual,
    }
}

/// Group entries under their date key, keys in chronological order.
///
/// Entries keep their relative order within a day.
pub fn group_by_date(entries: Vec<CalendarEntry>) -> BTreeMap<String, Vec<CalendarEntry>> {
    let mut groups: BTreeMap<String, Vec<CalendarEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.date().to_string()).or_default().push(entry);
    }
    groups
}

/// Order by date, then start time, then id
pub fn sort_chronologically(entries: &mut [CalendarEntry]) {
    entries.sort_by(|a, b| {
        a.date()
            .cmp(b.date())
            .then_with(|| a.details().time.cmp(&b.details().time))
            .then_with(|| a.id_key().cmp(&b.id_key()))
    });
}
