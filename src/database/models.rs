use anyhow::{bail, Result};
use serde::Serialize;

use crate::domain::{
    OneOffTournament, RecurrenceRule, RecurringTournament, TournamentDetails, TournamentId,
    WeeklyRecurrence,
};

pub const ONE_OFF_ID_PREFIX: &str = "local_";
pub const RECURRING_ID_PREFIX: &str = "local_r_";

pub const WEEKLY_CADENCE: &str = "weekly";

/// Row of `one_off_tournaments`
#[derive(Debug, Clone)]
pub struct OneOffRow {
    pub id: i64,
    pub details: TournamentDetails,
    pub date: String,
}

/// Row of `recurring_tournaments`
#[derive(Debug, Clone)]
pub struct RecurringRow {
    pub id: i64,
    pub details: TournamentDetails,
    pub cadence: String,
    pub day_of_week: u8,
    pub start_date: String,
    pub end_date: Option<String>,
}

impl From<OneOffRow> for OneOffTournament {
    fn from(row: OneOffRow) -> Self {
        OneOffTournament {
            id: LocalId::OneOff(row.id).into(),
            details: row.details,
            date: row.date,
        }
    }
}

impl TryFrom<RecurringRow> for RecurringTournament {
    type Error = anyhow::Error;

    fn try_from(row: RecurringRow) -> Result<Self> {
        let recurrence = match row.cadence.as_str() {
            WEEKLY_CADENCE => RecurrenceRule::Weekly(WeeklyRecurrence {
                day_of_week: row.day_of_week,
                start_date: row.start_date,
                end_date: row.end_date,
            }),
            other => bail!("Unknown cadence {:?} for recurring tournament {}", other, row.id),
        };

        Ok(RecurringTournament {
            id: LocalId::Recurring(row.id).into(),
            details: row.details,
            recurrence,
        })
    }
}

/// Identifier of a tournament held in the local store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalId {
    OneOff(i64),
    Recurring(i64),
}

impl LocalId {
    /// Recognize `local_{n}` / `local_r_{n}`; anything else is not ours
    pub fn parse(id: &str) -> Option<Self> {
        if let Some(n) = id.strip_prefix(RECURRING_ID_PREFIX) {
            return n.parse().ok().map(LocalId::Recurring);
        }
        id.strip_prefix(ONE_OFF_ID_PREFIX)?
            .parse()
            .ok()
            .map(LocalId::OneOff)
    }
}

impl From<LocalId> for TournamentId {
    fn from(id: LocalId) -> Self {
        match id {
            LocalId::OneOff(n) => TournamentId::Text(format!("{}{}", ONE_OFF_ID_PREFIX, n)),
            LocalId::Recurring(n) => TournamentId::Text(format!("{}{}", RECURRING_ID_PREFIX, n)),
        }
    }
}

/// A freshly stored listing, as returned to the submitter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StoredTournament {
    OneOff(OneOffTournament),
    Recurring(RecurringTournament),
}

impl StoredTournament {
    pub fn id(&self) -> &TournamentId {
        match self {
            StoredTournament::OneOff(t) => &t.id,
            StoredTournament::Recurring(t) => &t.id,
        }
    }
}
