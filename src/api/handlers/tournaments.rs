use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{
    bad_request, catalog_error, filter_from, service_error, today, AppState, FilterParams,
    TournamentParams,
};
use crate::api::models::{DayResponse, TournamentListResponse};
use crate::domain::{dates, TournamentSubmission};
use crate::services::calendar::{day_listing, window_or_year, CalendarQuery};

pub async fn list_tournaments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TournamentParams>,
) -> impl IntoResponse {
    let window = match window_or_year(params.start.as_deref(), params.end.as_deref(), today()) {
        Ok(window) => window,
        Err(e) => return bad_request(e),
    };

    let catalog = match state.catalog.load().await {
        Ok(catalog) => catalog,
        Err(e) => return service_error(e),
    };

    let query = CalendarQuery::new(window, filter_from(params.city, params.game));
    let items = match query.run(&catalog) {
        Ok(items) => items,
        Err(e) => return catalog_error(e),
    };

    Json(TournamentListResponse {
        start: dates::to_key(window.start),
        end: dates::to_key(window.end),
        total: items.len(),
        items,
    })
    .into_response()
}

pub async fn tournaments_on_date(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
    Query(params): Query<FilterParams>,
) -> impl IntoResponse {
    if let Err(e) = dates::parse_key(&date) {
        return bad_request(e);
    }

    let catalog = match state.catalog.load().await {
        Ok(catalog) => catalog,
        Err(e) => return service_error(e),
    };

    let filter = filter_from(params.city, params.game);
    match day_listing(&catalog, &date, &filter) {
        Ok(items) => Json(DayResponse { date, items }).into_response(),
        Err(e) => catalog_error(e),
    }
}

pub async fn get_catalog(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.catalog.load().await {
        Ok(catalog) => Json(catalog).into_response(),
        Err(e) => service_error(e),
    }
}

pub async fn create_tournament(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<TournamentSubmission>,
) -> impl IntoResponse {
    match state.catalog.submit(submission) {
        Ok(stored) => (StatusCode::CREATED, Json(stored)).into_response(),
        Err(e) => service_error(e),
    }
}

pub async fn delete_tournament(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.catalog.remove(&id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => service_error(e),
    }
}
