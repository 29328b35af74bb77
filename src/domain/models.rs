use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-assigned tournament identifier (server ids may be numbers or strings)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TournamentId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentId::Number(id) => write!(f, "{}", id),
            TournamentId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for TournamentId {
    fn from(id: i64) -> Self {
        TournamentId::Number(id)
    }
}

impl From<&str> for TournamentId {
    fn from(id: &str) -> Self {
        TournamentId::Text(id.to_string())
    }
}

impl From<String> for TournamentId {
    fn from(id: String) -> Self {
        TournamentId::Text(id)
    }
}

/// Fields shared by every listing, one-off or recurring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentDetails {
    /// Game identifier, e.g. "Pokemon TCG"
    pub tcg: String,
    pub city: String,
    /// Venue / store name
    pub store: String,
    /// Local start time, `HH:MM`
    pub time: String,
    pub entry_fee: f64,
    pub tournament_type: String,
}

/// Tournament held on a single date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneOffTournament {
    pub id: TournamentId,
    #[serde(flatten)]
    pub details: TournamentDetails,
    /// `YYYY-MM-DD`
    pub date: String,
}

/// Template for a tournament that repeats; never a schedule entry itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTournament {
    pub id: TournamentId,
    #[serde(flatten)]
    pub details: TournamentDetails,
    pub recurrence: RecurrenceRule,
}

/// How a recurring tournament repeats. New cadences get their own variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecurrenceRule {
    Weekly(WeeklyRecurrence),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRecurrence {
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    pub start_date: String,
    /// Absent means the series never ends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// One concrete dated occurrence of a recurring tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentInstance {
    /// `{definitionId}_{YYYY-MM-DD}`
    pub id: String,
    #[serde(flatten)]
    pub details: TournamentDetails,
    pub date: String,
    pub is_recurring: bool,
    pub recurring_id: TournamentId,
}

/// Element of a merged calendar listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CalendarEntry {
    Instance(TournamentInstance),
    OneOff(OneOffTournament),
}

impl CalendarEntry {
    /// Identifier as the UI keys it (instances already carry a composite string)
    pub fn id_key(&self) -> String {
        match self {
            CalendarEntry::Instance(instance) => instance.id.clone(),
            CalendarEntry::OneOff(tournament) => tournament.id.to_string(),
        }
    }

    pub fn date(&self) -> &str {
        match self {
            CalendarEntry::Instance(instance) => &instance.date,
            CalendarEntry::OneOff(tournament) => &tournament.date,
        }
    }

    pub fn details(&self) -> &TournamentDetails {
        match self {
            CalendarEntry::Instance(instance) => &instance.details,
            CalendarEntry::OneOff(tournament) => &tournament.details,
        }
    }

    pub fn is_recurring(&self) -> bool {
        matches!(self, CalendarEntry::Instance(_))
    }
}

impl From<TournamentInstance> for CalendarEntry {
    fn from(instance: TournamentInstance) -> Self {
        CalendarEntry::Instance(instance)
    }
}

impl From<OneOffTournament> for CalendarEntry {
    fn from(tournament: OneOffTournament) -> Self {
        CalendarEntry::OneOff(tournament)
    }
}

/// Full set of listings handed to the merger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "uniqueTournaments", alias = "oneOff", default)]
    pub one_off: Vec<OneOffTournament>,
    #[serde(rename = "recurringTournaments", alias = "recurring", default)]
    pub recurring: Vec<RecurringTournament>,
}

impl Catalog {
    pub fn new(one_off: Vec<OneOffTournament>, recurring: Vec<RecurringTournament>) -> Self {
        Self { one_off, recurring }
    }

    /// Append another catalog's listings after this one's
    pub fn combine(mut self, other: Catalog) -> Self {
        self.one_off.extend(other.one_off);
        self.recurring.extend(other.recurring);
        self
    }

    pub fn len(&self) -> usize {
        self.one_off.len() + self.recurring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.one_off.is_empty() && self.recurring.is_empty()
    }
}
