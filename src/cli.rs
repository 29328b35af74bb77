use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::resolve_game;
use crate::domain::dates;
use crate::domain::{
    CalendarView, RecurrenceRule, TournamentDetails, TournamentFilter, TournamentSubmission,
    WeeklyRecurrence,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "TCG tournament calendar")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the calendar API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// List tournaments in a date range (defaults to the current year)
    List {
        /// First date, YYYY-MM-DD
        #[arg(long)]
        start: Option<String>,
        /// Last date, YYYY-MM-DD
        #[arg(long)]
        end: Option<String>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show the tournaments held on one date
    Day {
        /// Date, YYYY-MM-DD
        date: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show one calendar page grouped by date
    Calendar {
        #[arg(long, value_enum)]
        view: Option<CalendarView>,
        /// Any date inside the page, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        anchor: Option<String>,
        /// Pages to move from the anchor's page, e.g. -1 for the previous one
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i32,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Submit a one-off (--date) or weekly (--day-of-week) tournament to the local store
    Add(AddArgs),
    /// Remove a tournament from the local store
    Remove {
        /// Local tournament id, e.g. local_3 or local_r_1
        id: String,
    },
    /// Mark or unmark a tournament as interesting
    Interest {
        /// Calendar entry id, e.g. 42 or r1_2025-01-09
        id: String,
    },
    /// List the tournaments marked as interesting
    Interests,
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct FilterArgs {
    /// Only tournaments in this city
    #[arg(long)]
    pub city: Option<String>,
    /// Only tournaments for this game (defaults to Pokemon TCG, "all" shows every game)
    #[arg(long)]
    pub game: Option<String>,
}

impl From<FilterArgs> for TournamentFilter {
    fn from(args: FilterArgs) -> Self {
        TournamentFilter::new(args.city, resolve_game(args.game))
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct AddArgs {
    /// Store or venue name
    #[arg(long)]
    pub store: String,
    #[arg(long, default_value = "Pokemon TCG")]
    pub game: String,
    #[arg(long, default_value = "Puebla")]
    pub city: String,
    /// Start time, HH:MM
    #[arg(long, default_value = "18:00")]
    pub time: String,
    #[arg(long, default_value_t = 0.0)]
    pub entry_fee: f64,
    #[arg(long, default_value = "Torneo de Liga")]
    pub tournament_type: String,
    /// Date of a one-off tournament, YYYY-MM-DD
    #[arg(long, conflicts_with_all = ["day_of_week", "start_date", "end_date"])]
    pub date: Option<String>,
    /// Weekday of a weekly tournament, 0 = Sunday
    #[arg(long)]
    pub day_of_week: Option<u8>,
    /// First possible date of a weekly tournament (defaults to today)
    #[arg(long, requires = "day_of_week")]
    pub start_date: Option<String>,
    /// Last possible date of a weekly tournament (open-ended when omitted)
    #[arg(long, requires = "day_of_week")]
    pub end_date: Option<String>,
}

impl AddArgs {
    pub fn into_submission(self, today: NaiveDate) -> TournamentSubmission {
        let details = TournamentDetails {
            tcg: self.game,
            city: self.city,
            store: self.store,
            time: self.time,
            entry_fee: self.entry_fee,
            tournament_type: self.tournament_type,
        };

        let recurrence = self.day_of_week.map(|day_of_week| {
            RecurrenceRule::Weekly(WeeklyRecurrence {
                day_of_week,
                start_date: self.start_date.unwrap_or_else(|| dates::to_key(today)),
                end_date: self.end_date,
            })
        });

        TournamentSubmission {
            details,
            date: self.date,
            recurrence,
        }
    }
}
