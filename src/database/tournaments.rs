use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::{LocalId, OneOffRow, RecurringRow, StoredTournament, WEEKLY_CADENCE};
use crate::domain::{
    Catalog, OneOffTournament, RecurrenceRule, RecurringTournament, TournamentDetails,
    ValidSubmission,
};
use crate::errors::storage_context;

const ONE_OFF_COLUMNS: &str = "id, tcg, city, store, time, entry_fee, tournament_type, date";
const RECURRING_COLUMNS: &str = "id, tcg, city, store, time, entry_fee, tournament_type, \
     cadence, day_of_week, start_date, end_date";

/// Store a validated submission
pub fn insert_submission(
    conn: &mut DbConn,
    submission: &ValidSubmission,
) -> Result<StoredTournament> {
    match submission {
        ValidSubmission::OneOff { details, date } => {
            insert_one_off(conn, details, date).map(StoredTournament::OneOff)
        }
        ValidSubmission::Recurring {
            details,
            recurrence,
        } => insert_recurring(conn, details, recurrence).map(StoredTournament::Recurring),
    }
}

pub fn insert_one_off(
    conn: &mut DbConn,
    details: &TournamentDetails,
    date: &str,
) -> Result<OneOffTournament> {
    let sql = format!(
        "INSERT INTO one_off_tournaments
            (tcg, city, store, time, entry_fee, tournament_type, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         RETURNING {}",
        ONE_OFF_COLUMNS
    );

    let row = conn
        .query_row(
            &sql,
            params![
                details.tcg,
                details.city,
                details.store,
                details.time,
                details.entry_fee,
                details.tournament_type,
                date
            ],
            parse_one_off_row,
        )
        .with_context(|| storage_context("insert", "one_off_tournaments"))?;

    Ok(row.into())
}

pub fn insert_recurring(
    conn: &mut DbConn,
    details: &TournamentDetails,
    recurrence: &RecurrenceRule,
) -> Result<RecurringTournament> {
    let RecurrenceRule::Weekly(rule) = recurrence;
    let sql = format!(
        "INSERT INTO recurring_tournaments
            (tcg, city, store, time, entry_fee, tournament_type,
             cadence, day_of_week, start_date, end_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
         RETURNING {}",
        RECURRING_COLUMNS
    );

    let row = conn
        .query_row(
            &sql,
            params![
                details.tcg,
                details.city,
                details.store,
                details.time,
                details.entry_fee,
                details.tournament_type,
                WEEKLY_CADENCE,
                rule.day_of_week,
                rule.start_date,
                rule.end_date
            ],
            parse_recurring_row,
        )
        .with_context(|| storage_context("insert", "recurring_tournaments"))?;

    row.try_into()
}

/// Everything in the local store, in insertion order
pub fn list_catalog(conn: &mut DbConn) -> Result<Catalog> {
    let one_off = list_one_off(conn)?
        .into_iter()
        .map(OneOffTournament::from)
        .collect();

    let recurring = list_recurring(conn)?
        .into_iter()
        .map(RecurringTournament::try_from)
        .collect::<Result<Vec<_>>>()?;

    Ok(Catalog::new(one_off, recurring))
}

/// Remove a local listing by its public id; `false` when nothing matched
pub fn delete(conn: &mut DbConn, id: &str) -> Result<bool> {
    let (table, row_id) = match LocalId::parse(id) {
        Some(LocalId::OneOff(n)) => ("one_off_tournaments", n),
        Some(LocalId::Recurring(n)) => ("recurring_tournaments", n),
        None => return Ok(false),
    };

    let sql = format!("DELETE FROM {} WHERE id = ?1", table);
    let removed = conn
        .execute(&sql, params![row_id])
        .with_context(|| storage_context("delete", table))?;

    Ok(removed > 0)
}

fn list_one_off(conn: &mut DbConn) -> Result<Vec<OneOffRow>> {
    let sql = format!("SELECT {} FROM one_off_tournaments ORDER BY id", ONE_OFF_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_one_off_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| storage_context("list", "one_off_tournaments"))?;
    Ok(rows)
}

fn list_recurring(conn: &mut DbConn) -> Result<Vec<RecurringRow>> {
    let sql = format!("SELECT {} FROM recurring_tournaments ORDER BY id", RECURRING_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_recurring_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| storage_context("list", "recurring_tournaments"))?;
    Ok(rows)
}

fn parse_details(row: &rusqlite::Row) -> rusqlite::Result<TournamentDetails> {
    Ok(TournamentDetails {
        tcg: row.get(1)?,
        city: row.get(2)?,
        store: row.get(3)?,
        time: row.get(4)?,
        entry_fee: row.get(5)?,
        tournament_type: row.get(6)?,
    })
}

fn parse_one_off_row(row: &rusqlite::Row) -> rusqlite::Result<OneOffRow> {
    Ok(OneOffRow {
        id: row.get(0)?,
        details: parse_details(row)?,
        date: row.get(7)?,
    })
}

fn parse_recurring_row(row: &rusqlite::Row) -> rusqlite::Result<RecurringRow> {
    Ok(RecurringRow {
        id: row.get(0)?,
        details: parse_details(row)?,
        cadence: row.get(7)?,
        day_of_week: row.get(8)?,
        start_date: row.get(9)?,
        end_date: row.get(10)?,
    })
}
