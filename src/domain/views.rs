use chrono::{Datelike, Months, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::dates::{self, DateWindow};

/// Calendar page sizes the UI can browse by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Weekly,
    Monthly,
    Yearly,
}

impl CalendarView {
    /// The page containing `anchor`: Sunday-started week, calendar month or year
    pub fn window(self, anchor: NaiveDate) -> Option<DateWindow> {
        match self {
            CalendarView::Weekly => {
                let start = dates::add_days(anchor, -i64::from(dates::weekday_of(anchor)))?;
                Some(DateWindow::new(start, dates::add_days(start, 6)?))
            }
            CalendarView::Monthly => {
                let start = anchor.with_day(1)?;
                let next = start.checked_add_months(Months::new(1))?;
                Some(DateWindow::new(start, dates::add_days(next, -1)?))
            }
            CalendarView::Yearly => Some(DateWindow::new(
                NaiveDate::from_ymd_opt(anchor.year(), 1, 1)?,
                NaiveDate::from_ymd_opt(anchor.year(), 12, 31)?,
            )),
        }
    }

    /// Move the anchor by whole pages (negative goes back).
    ///
    /// Month and year steps clamp the day to the target month's length.
    pub fn shift(self, anchor: NaiveDate, steps: i32) -> Option<NaiveDate> {
        match self {
            CalendarView::Weekly => dates::add_days(anchor, i64::from(steps) * 7),
            CalendarView::Monthly => shift_months(anchor, steps),
            CalendarView::Yearly => shift_months(anchor, steps.checked_mul(12)?),
        }
    }
}

fn shift_months(anchor: NaiveDate, months: i32) -> Option<NaiveDate> {
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 {
        anchor.checked_add_months(delta)
    } else {
        anchor.checked_sub_months(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(key: &str) -> NaiveDate {
        dates::parse_key(key).unwrap()
    }

    #[test]
    fn test_weekly_window_starts_on_sunday() {
        let window = CalendarView::Weekly.window(date("2025-01-02")).unwrap();
        assert_eq!(window, DateWindow::new(date("2024-12-29"), date("2025-01-04")));

        let window = CalendarView::Weekly.window(date("2025-01-05")).unwrap();
        assert_eq!(window.start, date("2025-01-05"));
    }

    #[test]
    fn test_monthly_window_handles_leap_february() {
        let window = CalendarView::Monthly.window(date("2024-02-10")).unwrap();
        assert_eq!(window, DateWindow::new(date("2024-02-01"), date("2024-02-29")));

        let window = CalendarView::Monthly.window(date("2025-12-31")).unwrap();
        assert_eq!(window, DateWindow::new(date("2025-12-01"), date("2025-12-31")));
    }

    #[test]
    fn test_yearly_window() {
        let window = CalendarView::Yearly.window(date("2025-06-15")).unwrap();
        assert_eq!(window, DateWindow::new(date("2025-01-01"), date("2025-12-31")));
    }

    #[test]
    fn test_shift_pages() {
        assert_eq!(CalendarView::Weekly.shift(date("2025-01-02"), -1), Some(date("2024-12-26")));
        assert_eq!(CalendarView::Monthly.shift(date("2025-01-31"), 1), Some(date("2025-02-28")));
        assert_eq!(CalendarView::Yearly.shift(date("2024-02-29"), 1), Some(date("2025-02-28")));
    }
}
