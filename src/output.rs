use std::collections::BTreeMap;

use colored::Colorize;

use crate::domain::CalendarEntry;
use crate::interests::InterestSet;

/// One line per entry: date, time, store, game, city, fee, id
pub fn format_entry(entry: &CalendarEntry, interests: &InterestSet) -> String {
    let details = entry.details();
    let id = entry.id_key();
    let marker = if interests.contains(&id) { "★".yellow() } else { " ".normal() };
    let kind = if entry.is_recurring() { "weekly".cyan() } else { "one-off".magenta() };

    format!(
        "{} {} {} {} | {} | {} | ${} | {} [{}]",
        marker,
        entry.date().bold(),
        details.time,
        details.store.green(),
        details.tcg,
        details.city,
        details.entry_fee,
        kind,
        id.dimmed()
    )
}

pub fn print_entries(entries: &[CalendarEntry], interests: &InterestSet) {
    if entries.is_empty() {
        println!("{}", "No tournaments found".dimmed());
        return;
    }

    for entry in entries {
        println!("{}", format_entry(entry, interests));
    }
    println!("{}", format!("{} tournaments", entries.len()).bold());
}

pub fn print_calendar(days: &BTreeMap<String, Vec<CalendarEntry>>, interests: &InterestSet) {
    if days.is_empty() {
        println!("{}", "No tournaments found".dimmed());
        return;
    }

    for (date, entries) in days {
        println!("{}", date.bold().underline());
        for entry in entries {
            println!("  {}", format_entry(entry, interests));
        }
    }
}
