use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::dates;
use super::models::{RecurrenceRule, TournamentDetails, WeeklyRecurrence};
use crate::errors::CalendarError;

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("time pattern is valid")
});

/// A listing as a store operator submits it: a date for a one-off, or a
/// recurrence for a repeating tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSubmission {
    #[serde(flatten)]
    pub details: TournamentDetails,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub recurrence: Option<RecurrenceRule>,
}

/// Submission that passed validation, normalized and ready to store
#[derive(Debug, Clone, PartialEq)]
pub enum ValidSubmission {
    OneOff {
        details: TournamentDetails,
        date: String,
    },
    Recurring {
        details: TournamentDetails,
        recurrence: RecurrenceRule,
    },
}

impl TournamentSubmission {
    pub fn validate(self) -> Result<ValidSubmission, CalendarError> {
        let details = validate_details(self.details)?;

        match (self.date, self.recurrence) {
            (Some(_), Some(_)) => Err(CalendarError::submission(
                "date",
                "cannot be combined with a recurrence",
            )),
            (None, None) => Err(missing_date()),
            (Some(date), None) => {
                let date = date.trim();
                if date.is_empty() {
                    return Err(missing_date());
                }
                dates::parse_key(date)?;
                Ok(ValidSubmission::OneOff {
                    details,
                    date: date.to_string(),
                })
            }
            (None, Some(recurrence)) => Ok(ValidSubmission::Recurring {
                details,
                recurrence: validate_recurrence(recurrence)?,
            }),
        }
    }
}

fn validate_details(mut details: TournamentDetails) -> Result<TournamentDetails, CalendarError> {
    details.store = details.store.trim().to_string();
    if details.store.is_empty() {
        return Err(CalendarError::submission("store", "must not be empty"));
    }

    if !TIME_PATTERN.is_match(&details.time) {
        return Err(CalendarError::submission("time", format!("{:?} is not HH:MM", details.time)));
    }

    if !details.entry_fee.is_finite() || details.entry_fee < 0.0 {
        return Err(CalendarError::submission("entryFee", "must be a non-negative amount"));
    }

    Ok(details)
}

fn validate_recurrence(recurrence: RecurrenceRule) -> Result<RecurrenceRule, CalendarError> {
    match recurrence {
        RecurrenceRule::Weekly(rule) => {
            if rule.day_of_week > 6 {
                return Err(CalendarError::InvalidWeekday(rule.day_of_week));
            }

            let start = dates::parse_key(rule.start_date.trim())?;
            // Blank end date from a form means the series is open
            let end_date = rule
                .end_date
                .map(|end| end.trim().to_string())
                .filter(|end| !end.is_empty());

            if let Some(end) = &end_date {
                if dates::parse_key(end)? < start {
                    return Err(CalendarError::submission("endDate", "must not precede startDate"));
                }
            }

            Ok(RecurrenceRule::Weekly(WeeklyRecurrence {
                day_of_week: rule.day_of_week,
                start_date: rule.start_date.trim().to_string(),
                end_date,
            }))
        }
    }
}

fn missing_date() -> CalendarError {
    CalendarError::submission("date", "is required for a one-off tournament")
}
