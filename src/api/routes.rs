use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    calendar::{get_calendar, get_filters},
    tournaments::{
        create_tournament, delete_tournament, get_catalog, list_tournaments, tournaments_on_date,
    },
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/tournaments", get(list_tournaments).post(create_tournament))
        .route("/api/tournaments/:id", delete(delete_tournament))
        .route("/api/days/:date", get(tournaments_on_date))
        .route("/api/calendar", get(get_calendar))
        .route("/api/catalog", get(get_catalog))
        .route("/api/filters", get(get_filters))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::settings::AppConfig;
    use crate::database;
    use crate::services::catalog::CatalogService;

    fn test_state(name: &str) -> Arc<AppState> {
        let mut config = AppConfig::new();
        config.catalog.api_base_url = None;
        config.storage.cache_dir = std::env::temp_dir().join(format!(
            "tcg_calendar_routes_{}_{}",
            name,
            std::process::id()
        ));

        let pool = database::create_memory_pool().unwrap();
        let catalog = CatalogService::new(&config, pool).unwrap();
        Arc::new(AppState { config, catalog })
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, value: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap()
    }

    fn thursday_league() -> Value {
        json!({
            "tcg": "Pokemon TCG",
            "city": "Puebla",
            "store": "Dragon Store",
            "time": "18:00",
            "entryFee": 50,
            "tournamentType": "Torneo de Liga",
            "recurrence": {
                "type": "weekly",
                "dayOfWeek": 4,
                "startDate": "2025-01-02",
                "endDate": "2025-01-23"
            }
        })
    }

    #[tokio::test]
    async fn test_submit_then_list() {
        let state = test_state("submit_list");
        let router = create_router(state.clone());

        let (status, created) =
            send(router.clone(), post_json("/api/tournaments", thursday_league())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], "local_r_1");

        let (status, body) = send(
            router.clone(),
            get_request("/api/tournaments?start=2025-01-01&end=2025-01-31&city=Puebla"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 4);
        assert_eq!(body["items"][0]["id"], "local_r_1_2025-01-02");
        assert_eq!(body["items"][3]["date"], "2025-01-23");

        let (_, body) = send(
            router,
            get_request("/api/tournaments?start=2025-01-01&end=2025-01-31&game=Yu-Gi-Oh!"),
        )
        .await;
        assert_eq!(body["total"], 0);

        state.catalog.cache().clear().unwrap();
    }

    #[tokio::test]
    async fn test_day_and_calendar_views() {
        let state = test_state("views");
        let router = create_router(state.clone());
        send(router.clone(), post_json("/api/tournaments", thursday_league())).await;

        let (status, body) = send(router.clone(), get_request("/api/days/2025-01-09")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"].as_array().unwrap().len(), 1);

        let (status, body) =
            send(router, get_request("/api/calendar?view=monthly&anchor=2025-01-15")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["start"], "2025-01-01");
        assert_eq!(body["end"], "2025-01-31");
        assert_eq!(body["days"].as_object().unwrap().len(), 4);

        state.catalog.cache().clear().unwrap();
    }

    #[tokio::test]
    async fn test_game_defaults_and_page_offset() {
        let state = test_state("defaults");
        let router = create_router(state.clone());
        send(router.clone(), post_json("/api/tournaments", thursday_league())).await;

        let locals = json!({
            "tcg": "Yu-Gi-Oh!",
            "city": "Puebla",
            "store": "Duel Zone",
            "time": "17:30",
            "entryFee": 80,
            "tournamentType": "Locals",
            "date": "2025-01-09"
        });
        let (status, _) = send(router.clone(), post_json("/api/tournaments", locals)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = send(router.clone(), get_request("/api/days/2025-01-09")).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["items"][0]["tcg"], "Pokemon TCG");

        let (_, body) = send(router.clone(), get_request("/api/days/2025-01-09?game=all")).await;
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["store"], "Duel Zone");

        let (status, body) = send(
            router,
            get_request("/api/calendar?view=monthly&anchor=2025-02-15&offset=-1&game="),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["start"], "2025-01-01");
        assert_eq!(body["days"]["2025-01-09"].as_array().unwrap().len(), 2);

        state.catalog.cache().clear().unwrap();
    }

    #[tokio::test]
    async fn test_bad_requests() {
        let state = test_state("bad");
        let router = create_router(state.clone());

        let (status, _) =
            send(router.clone(), get_request("/api/tournaments?start=2025-13-01")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(router.clone(), get_request("/api/days/tomorrow")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut blank_store = thursday_league();
        blank_store["store"] = json!("  ");
        let (status, _) = send(router.clone(), post_json("/api/tournaments", blank_store)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let delete = Request::builder()
            .method("DELETE")
            .uri("/api/tournaments/local_9")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(router, delete).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        state.catalog.cache().clear().unwrap();
    }

    #[tokio::test]
    async fn test_filters() {
        let state = test_state("filters");
        let (status, body) = send(create_router(state.clone()), get_request("/api/filters")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["games"].as_array().unwrap().len(), 3);

        state.catalog.cache().clear().unwrap();
    }
}
