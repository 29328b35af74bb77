use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::config::resolve_game;
use crate::config::settings::AppConfig;
use crate::domain::{CalendarView, TournamentFilter};
use crate::errors::CalendarError;
use crate::services::catalog::CatalogService;

pub mod calendar;
pub mod tournaments;

pub struct AppState {
    pub config: AppConfig,
    pub catalog: CatalogService,
}

#[derive(Deserialize)]
pub struct TournamentParams {
    pub start: Option<String>,
    pub end: Option<String>,
    pub city: Option<String>,
    pub game: Option<String>,
}

#[derive(Deserialize)]
pub struct FilterParams {
    pub city: Option<String>,
    pub game: Option<String>,
}

#[derive(Deserialize)]
pub struct CalendarParams {
    pub view: Option<CalendarView>,
    pub anchor: Option<String>,
    pub offset: Option<i32>,
    pub city: Option<String>,
    pub game: Option<String>,
}

/// Query-string filter; a missing `game` falls back to the default game
fn filter_from(city: Option<String>, game: Option<String>) -> TournamentFilter {
    TournamentFilter::new(city, resolve_game(game))
}

/// 400 for bad request values
fn bad_request(e: CalendarError) -> Response {
    (StatusCode::BAD_REQUEST, e.to_string()).into_response()
}

/// Submission problems are the caller's fault; anything else is ours
fn service_error(e: anyhow::Error) -> Response {
    match e.downcast_ref::<CalendarError>() {
        Some(err) => bad_request(err.clone()),
        None => {
            let message = format!("Service Error: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
        }
    }
}

/// The catalog itself holds a bad date: the listing cannot be built at all
fn catalog_error(e: CalendarError) -> Response {
    log::error!("Catalog expansion failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, format!("Catalog Error: {}", e)).into_response()
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
