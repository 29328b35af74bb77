use super::dates::{self, DateWindow};
use super::models::{CalendarEntry, Catalog};
use super::recurrence;
use crate::errors::CalendarError;

/// Flatten a catalog into the entries that fall inside `window`.
///
/// One-off listings come first in catalog order, followed by the expanded
/// occurrences of each recurring listing in catalog order. Nothing is
/// deduplicated or sorted. Any malformed date aborts the whole merge.
pub fn merge(catalog: &Catalog, window: DateWindow) -> Result<Vec<CalendarEntry>, CalendarError> {
    let mut entries = Vec::new();

    for tournament in &catalog.one_off {
        let date = dates::parse_key(&tournament.date)?;
        if window.contains(date) {
            entries.push(CalendarEntry::OneOff(tournament.clone()));
        }
    }

    for definition in &catalog.recurring {
        let instances = recurrence::expand(definition, window)?;
        entries.extend(instances.into_iter().map(CalendarEntry::Instance));
    }

    Ok(entries)
}

/// [`merge`] over a window given as two `YYYY-MM-DD` keys
pub fn merge_keys(
    catalog: &Catalog,
    start: &str,
    end: &str,
) -> Result<Vec<CalendarEntry>, CalendarError> {
    merge(catalog, DateWindow::parse(start, end)?)
}

/// Everything happening on a single day
pub fn tournaments_for_date(
    catalog: &Catalog,
    date: &str,
) -> Result<Vec<CalendarEntry>, CalendarError> {
    merge(catalog, DateWindow::day(dates::parse_key(date)?))
}
