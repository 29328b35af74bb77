use chrono::NaiveDate;

use super::dates::{self, DateWindow};
use super::models::{RecurrenceRule, RecurringTournament, TournamentInstance, WeeklyRecurrence};
use crate::errors::CalendarError;

const DAYS_PER_WEEK: i64 = 7;

/// Materialize every occurrence of `definition` that falls inside `window`.
///
/// Instances come back in ascending date order. A series that does not
/// overlap the window yields an empty vector.
pub fn expand(
    definition: &RecurringTournament,
    window: DateWindow,
) -> Result<Vec<TournamentInstance>, CalendarError> {
    let dates = match &definition.recurrence {
        RecurrenceRule::Weekly(rule) => weekly_dates(rule, window)?,
    };

    Ok(dates
        .into_iter()
        .map(|date| build_instance(definition, date))
        .collect())
}

fn weekly_dates(
    rule: &WeeklyRecurrence,
    window: DateWindow,
) -> Result<Vec<NaiveDate>, CalendarError> {
    if rule.day_of_week > 6 {
        return Err(CalendarError::InvalidWeekday(rule.day_of_week));
    }

    let span = series_span(&rule.start_date, rule.end_date.as_deref())?;
    let effective = DateWindow::clamp(window, span);
    if effective.is_empty() {
        return Ok(Vec::new());
    }

    let mut dates = Vec::new();
    let mut current = first_on_or_after(effective.start, rule.day_of_week);

    while let Some(date) = current {
        if date > effective.end {
            break;
        }
        dates.push(date);
        current = dates::add_days(date, DAYS_PER_WEEK);
    }

    Ok(dates)
}

/// Dates a series is active on; an open series runs to the end of the calendar
fn series_span(start_date: &str, end_date: Option<&str>) -> Result<DateWindow, CalendarError> {
    let start = dates::parse_key(start_date)?;
    match end_date {
        Some(end) => Ok(DateWindow::new(start, dates::parse_key(end)?)),
        None => Ok(DateWindow::open_ended(start)),
    }
}

/// First date on or after `start` falling on `target` weekday
fn first_on_or_after(start: NaiveDate, target: u8) -> Option<NaiveDate> {
    let weekday = i64::from(dates::weekday_of(start));
    let offset = (i64::from(target) - weekday + DAYS_PER_WEEK) % DAYS_PER_WEEK;
    dates::add_days(start, offset)
}

fn build_instance(definition: &RecurringTournament, date: NaiveDate) -> TournamentInstance {
    let key = dates::to_key(date);
    TournamentInstance {
        id: format!("{}_{}", definition.id, key),
        details: definition.details.clone(),
        date: key,
        is_recurring: true,
        recurring_id: definition.id.clone(),
    }
}
