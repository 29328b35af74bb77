pub mod dates;
pub mod filters;
pub mod merge;
pub mod models;
pub mod recurrence;
pub mod submission;
pub mod views;

pub use dates::DateWindow;
pub use filters::TournamentFilter;
pub use merge::{merge, merge_keys, tournaments_for_date};
pub use models::*;
pub use recurrence::expand;
pub use submission::{TournamentSubmission, ValidSubmission};
pub use views::CalendarView;
