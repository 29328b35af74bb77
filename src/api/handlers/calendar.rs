use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{
    bad_request, catalog_error, filter_from, service_error, today, AppState, CalendarParams,
};
use crate::api::models::{CalendarResponse, FiltersResponse};
use crate::config::{get_cities, get_games};
use crate::domain::dates;
use crate::services::calendar::CalendarQuery;

/// One calendar page (week, month or year) grouped by date
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CalendarParams>,
) -> impl IntoResponse {
    let view = params.view.unwrap_or(state.config.calendar.default_view);

    let anchor = match params.anchor.as_deref() {
        Some(anchor) => match dates::parse_key(anchor) {
            Ok(anchor) => anchor,
            Err(e) => return bad_request(e),
        },
        None => today(),
    };

    let offset = params.offset.unwrap_or(0);
    let filter = filter_from(params.city, params.game);
    let query = match CalendarQuery::for_view(view, anchor, offset, filter) {
        Ok(query) => query,
        Err(e) => return bad_request(e),
    };

    let catalog = match state.catalog.load().await {
        Ok(catalog) => catalog,
        Err(e) => return service_error(e),
    };

    let days = match query.run_grouped(&catalog) {
        Ok(days) => days,
        Err(e) => return catalog_error(e),
    };

    Json(CalendarResponse {
        view,
        start: dates::to_key(query.window.start),
        end: dates::to_key(query.window.end),
        days,
    })
    .into_response()
}

pub async fn get_filters() -> impl IntoResponse {
    Json(FiltersResponse {
        cities: get_cities(),
        games: get_games(),
    })
}
