use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::dates;
use crate::domain::filters::{self, TournamentFilter};
use crate::domain::{merge, tournaments_for_date, CalendarEntry, CalendarView, Catalog, DateWindow};
use crate::errors::CalendarError;

/// A merged, filtered and chronologically ordered listing for one window
#[derive(Debug, Clone)]
pub struct CalendarQuery {
    pub window: DateWindow,
    pub filter: TournamentFilter,
}

impl CalendarQuery {
    pub fn new(window: DateWindow, filter: TournamentFilter) -> Self {
        Self { window, filter }
    }

    /// Page of `view` that lies `offset` pages away from the one holding `anchor`
    pub fn for_view(
        view: CalendarView,
        anchor: NaiveDate,
        offset: i32,
        filter: TournamentFilter,
    ) -> Result<Self, CalendarError> {
        let out_of_range = || CalendarError::OutOfRange(dates::to_key(anchor));
        let anchor = view.shift(anchor, offset).ok_or_else(out_of_range)?;
        let window = view.window(anchor).ok_or_else(out_of_range)?;
        Ok(Self::new(window, filter))
    }

    pub fn run(&self, catalog: &Catalog) -> Result<Vec<CalendarEntry>, CalendarError> {
        Ok(finish(&self.filter, merge(catalog, self.window)?))
    }

    /// Like [`CalendarQuery::run`], grouped under date keys
    pub fn run_grouped(
        &self,
        catalog: &Catalog,
    ) -> Result<BTreeMap<String, Vec<CalendarEntry>>, CalendarError> {
        Ok(filters::group_by_date(self.run(catalog)?))
    }
}

/// Entries held on the `YYYY-MM-DD` day `date`, filtered and ordered
pub fn day_listing(
    catalog: &Catalog,
    date: &str,
    filter: &TournamentFilter,
) -> Result<Vec<CalendarEntry>, CalendarError> {
    Ok(finish(filter, tournaments_for_date(catalog, date)?))
}

fn finish(filter: &TournamentFilter, entries: Vec<CalendarEntry>) -> Vec<CalendarEntry> {
    let mut entries = filter.apply(entries);
    filters::sort_chronologically(&mut entries);
    entries
}

/// Calendar year containing `day`
pub fn year_window(day: NaiveDate) -> DateWindow {
    CalendarView::Yearly
        .window(day)
        .unwrap_or_else(|| DateWindow::day(day))
}

/// Window from optional `YYYY-MM-DD` bounds. A single bound is completed to
/// the edge of its own year; with neither, the year containing `today`.
pub fn window_or_year(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> Result<DateWindow, CalendarError> {
    match (start, end) {
        (Some(start), Some(end)) => DateWindow::parse(start, end),
        (Some(start), None) => {
            let start = dates::parse_key(start)?;
            Ok(DateWindow::new(start, year_window(start).end))
        }
        (None, Some(end)) => {
            let end = dates::parse_key(end)?;
            Ok(DateWindow::new(year_window(end).start, end))
        }
        (None, None) => Ok(year_window(today)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        OneOffTournament, RecurrenceRule, RecurringTournament, TournamentDetails, TournamentId,
        WeeklyRecurrence,
    };

    fn details(city: &str, time: &str) -> TournamentDetails {
        TournamentDetails {
            tcg: "Pokemon TCG".to_string(),
            city: city.to_string(),
            store: "Dragon Store".to_string(),
            time: time.to_string(),
            entry_fee: 0.0,
            tournament_type: "Liga".to_string(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                OneOffTournament {
                    id: TournamentId::Number(1),
                    details: details("Puebla", "12:00"),
                    date: "2025-02-13".to_string(),
                },
                OneOffTournament {
                    id: TournamentId::Number(2),
                    details: details("Ciudad de Mexico", "18:00"),
                    date: "2025-02-10".to_string(),
                },
            ],
            vec![RecurringTournament {
                id: TournamentId::from("r1"),
                details: details("Puebla", "18:00"),
                recurrence: RecurrenceRule::Weekly(WeeklyRecurrence {
                    day_of_week: 4,
                    start_date: "2025-01-02".to_string(),
                    end_date: None,
                }),
            }],
        )
    }

    fn date(key: &str) -> NaiveDate {
        dates::parse_key(key).unwrap()
    }

    #[test]
    fn test_run_filters_and_sorts() {
        let query = CalendarQuery::new(
            DateWindow::parse("2025-02-01", "2025-02-14").unwrap(),
            TournamentFilter::new(Some("Puebla".to_string()), None),
        );

        let ids: Vec<String> =
            query.run(&catalog()).unwrap().iter().map(|e| e.id_key()).collect();

        assert_eq!(ids, ["r1_2025-02-06", "1", "r1_2025-02-13"]);
    }

    #[test]
    fn test_weekly_view_grouped() {
        let query = CalendarQuery::for_view(
            CalendarView::Weekly,
            date("2025-02-12"),
            0,
            TournamentFilter::default(),
        )
        .unwrap();
        assert_eq!(query.window, DateWindow::parse("2025-02-09", "2025-02-15").unwrap());

        let groups = query.run_grouped(&catalog()).unwrap();
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();

        assert_eq!(keys, ["2025-02-10", "2025-02-13"]);
        assert_eq!(groups["2025-02-13"].len(), 2);
    }

    #[test]
    fn test_window_or_year_defaults() {
        let today = date("2025-06-15");

        assert_eq!(
            window_or_year(None, None, today).unwrap(),
            DateWindow::parse("2025-01-01", "2025-12-31").unwrap()
        );
        assert_eq!(
            window_or_year(Some("2025-03-01"), None, today).unwrap(),
            DateWindow::parse("2025-03-01", "2025-12-31").unwrap()
        );
        assert!(window_or_year(Some("March"), None, today).is_err());
    }

    #[test]
    fn test_single_bound_completes_within_its_own_year() {
        let today = date("2025-06-15");

        assert_eq!(
            window_or_year(Some("2030-03-01"), None, today).unwrap(),
            DateWindow::parse("2030-03-01", "2030-12-31").unwrap()
        );
        assert_eq!(
            window_or_year(None, Some("2020-05-10"), today).unwrap(),
            DateWindow::parse("2020-01-01", "2020-05-10").unwrap()
        );
    }

    #[test]
    fn test_offset_moves_whole_pages() {
        let anchor = date("2025-01-15");

        let previous =
            CalendarQuery::for_view(CalendarView::Monthly, anchor, -1, TournamentFilter::default())
                .unwrap();
        assert_eq!(previous.window, DateWindow::parse("2024-12-01", "2024-12-31").unwrap());

        let next =
            CalendarQuery::for_view(CalendarView::Weekly, anchor, 2, TournamentFilter::default())
                .unwrap();
        assert_eq!(next.window, DateWindow::parse("2025-01-26", "2025-02-01").unwrap());

        let beyond = CalendarQuery::for_view(
            CalendarView::Yearly,
            anchor,
            i32::MAX,
            TournamentFilter::default(),
        );
        assert!(matches!(beyond, Err(CalendarError::OutOfRange(_))));
    }

    #[test]
    fn test_day_listing_filters_and_orders() {
        let filter = TournamentFilter::new(Some("Puebla".to_string()), None);

        let ids: Vec<String> = day_listing(&catalog(), "2025-02-13", &filter)
            .unwrap()
            .iter()
            .map(|e| e.id_key())
            .collect();
        assert_eq!(ids, ["1", "r1_2025-02-13"]);

        assert!(day_listing(&catalog(), "2025-02-12", &filter).unwrap().is_empty());
        assert!(matches!(
            day_listing(&catalog(), "2025-02-30", &filter),
            Err(CalendarError::MalformedDate(_))
        ));
    }
}
