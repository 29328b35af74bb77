use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::api::catalog_client::{CatalogClient, SNAPSHOT_KEY};
use crate::cache::Cache;
use crate::config::settings::AppConfig;
use crate::database::{self, tournaments, DbPool, StoredTournament};
use crate::domain::{Catalog, TournamentSubmission};

/// Assembles the catalog handed to the merger: shared listings from the
/// remote API (or its fallbacks) followed by the local store's listings
pub struct CatalogService {
    client: Option<CatalogClient>,
    cache: Cache,
    seed_path: Option<PathBuf>,
    pool: DbPool,
}

impl CatalogService {
    pub fn new(config: &AppConfig, pool: DbPool) -> Result<Self> {
        let client = match &config.catalog.api_base_url {
            Some(url) => Some(CatalogClient::new(url, &config.catalog)?),
            None => None,
        };

        let mut conn = database::get_connection(&pool)?;
        database::setup::ensure_schema(&mut conn)?;

        Ok(Self {
            client,
            cache: Cache::new(&config.storage.cache_dir)?,
            seed_path: config.catalog.seed_path.clone(),
            pool,
        })
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Shared listings combined with local additions
    pub async fn load(&self) -> Result<Catalog> {
        let shared = self.load_shared().await?;
        let local = self.load_local()?;
        Ok(shared.combine(local))
    }

    /// Remote API, else the last snapshot, else the seed file, else nothing
    pub async fn load_shared(&self) -> Result<Catalog> {
        if let Some(client) = &self.client {
            match client.fetch_and_cache_catalog(&self.cache).await {
                Ok(catalog) => return Ok(catalog),
                Err(e) => warn!("Remote catalog unavailable, falling back: {:#}", e),
            }
        }

        match self.cache.load::<Catalog>(SNAPSHOT_KEY) {
            Ok(Some(snapshot)) => {
                info!("Using cached catalog snapshot ({} listings)", snapshot.len());
                return Ok(snapshot);
            }
            Ok(None) => {}
            Err(e) => warn!("Cached catalog snapshot unreadable, skipping it: {:#}", e),
        }

        if let Some(path) = &self.seed_path {
            return load_seed(path);
        }

        warn!("No catalog source available, starting from an empty catalog");
        Ok(Catalog::default())
    }

    /// Listings submitted through this installation
    pub fn load_local(&self) -> Result<Catalog> {
        let mut conn = database::get_connection(&self.pool)?;
        tournaments::list_catalog(&mut conn)
    }

    /// Validate and store a submission. Validation failures surface as
    /// [`crate::errors::CalendarError`] inside the returned error.
    pub fn submit(&self, submission: TournamentSubmission) -> Result<StoredTournament> {
        let valid = submission.validate()?;
        let mut conn = database::get_connection(&self.pool)?;
        let stored = tournaments::insert_submission(&mut conn, &valid)?;
        info!("Stored tournament {}", stored.id());
        Ok(stored)
    }

    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut conn = database::get_connection(&self.pool)?;
        let removed = tournaments::delete(&mut conn, id)?;
        if removed {
            info!("Removed tournament {}", id);
        }
        Ok(removed)
    }
}

fn load_seed(path: &Path) -> Result<Catalog> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed catalog {}", path.display()))?;
    let catalog: Catalog = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse seed catalog {}", path.display()))?;
    info!("Loaded seed catalog from {} ({} listings)", path.display(), catalog.len());
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TournamentDetails, TournamentId};
    use crate::errors::CalendarError;
    use serde_json::json;

    fn test_config(name: &str, api: Option<&str>) -> AppConfig {
        let dir = std::env::temp_dir().join(format!(
            "tcg_calendar_service_{}_{}",
            name,
            std::process::id()
        ));
        let mut config = AppConfig::new();
        config.catalog.api_base_url = api.map(str::to_string);
        config.catalog.timeout_secs = 2;
        config.storage.cache_dir = dir;
        config
    }

    fn details(store: &str) -> TournamentDetails {
        TournamentDetails {
            tcg: "Pokemon TCG".to_string(),
            city: "Puebla".to_string(),
            store: store.to_string(),
            time: "18:00".to_string(),
            entry_fee: 0.0,
            tournament_type: "Liga".to_string(),
        }
    }

    fn service(config: &AppConfig) -> CatalogService {
        CatalogService::new(config, database::create_memory_pool().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_seed_file_and_local_additions_combine() {
        let mut config = test_config("seed", None);
        fs::create_dir_all(&config.storage.cache_dir).unwrap();
        let seed = config.storage.cache_dir.join("seed.json");
        fs::write(
            &seed,
            json!({
                "uniqueTournaments": [{
                    "id": 1, "tcg": "Pokemon TCG", "city": "Puebla", "store": "Seed Store",
                    "time": "18:00", "entryFee": 0, "tournamentType": "Liga", "date": "2025-02-14"
                }]
            })
            .to_string(),
        )
        .unwrap();
        config.catalog.seed_path = Some(seed);

        let service = service(&config);
        service
            .submit(TournamentSubmission {
                details: details("Local Store"),
                date: Some("2025-02-20".to_string()),
                recurrence: None,
            })
            .unwrap();

        let catalog = service.load().await.unwrap();
        let ids: Vec<&TournamentId> = catalog.one_off.iter().map(|t| &t.id).collect();
        assert_eq!(ids, [&TournamentId::Number(1), &TournamentId::from("local_1")]);

        service.cache().clear().unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_remote_uses_snapshot() {
        let config = test_config("snapshot", Some("http://127.0.0.1:9/api"));
        let service = service(&config);

        let snapshot = Catalog::new(
            vec![crate::domain::OneOffTournament {
                id: TournamentId::Number(7),
                details: details("Snapshot Store"),
                date: "2025-03-01".to_string(),
            }],
            Vec::new(),
        );
        service.cache().save(SNAPSHOT_KEY, &snapshot).unwrap();

        let catalog = service.load_shared().await.unwrap();
        assert_eq!(catalog, snapshot);

        service.cache().clear().unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_falls_through_to_seed() {
        let mut config = test_config("corrupt_snapshot", Some("http://127.0.0.1:9/api"));
        fs::create_dir_all(&config.storage.cache_dir).unwrap();
        let seed = std::env::temp_dir().join(format!(
            "tcg_calendar_seed_corrupt_snapshot_{}.json",
            std::process::id()
        ));
        fs::write(
            &seed,
            json!({
                "recurringTournaments": [{
                    "id": "r1", "tcg": "Pokemon TCG", "city": "Puebla", "store": "Seed Store",
                    "time": "18:00", "entryFee": 0, "tournamentType": "Liga",
                    "recurrence": { "type": "weekly", "dayOfWeek": 4, "startDate": "2025-01-02" }
                }]
            })
            .to_string(),
        )
        .unwrap();
        config.catalog.seed_path = Some(seed.clone());

        let service = service(&config);
        fs::write(
            config.storage.cache_dir.join(format!("{}.json", SNAPSHOT_KEY)),
            "{ truncated",
        )
        .unwrap();

        let catalog = service.load_shared().await.unwrap();
        assert_eq!(catalog.recurring.len(), 1);
        assert_eq!(catalog.recurring[0].details.store, "Seed Store");

        service.cache().clear().unwrap();
        fs::remove_file(seed).unwrap();
    }

    #[tokio::test]
    async fn test_no_sources_is_empty() {
        let config = test_config("empty", None);
        let service = service(&config);

        assert!(service.load().await.unwrap().is_empty());

        service.cache().clear().unwrap();
    }

    #[test]
    fn test_invalid_submission_is_calendar_error() {
        let config = test_config("invalid", None);
        let service = service(&config);

        let err = service
            .submit(TournamentSubmission {
                details: details(" "),
                date: Some("2025-02-20".to_string()),
                recurrence: None,
            })
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CalendarError>(),
            Some(CalendarError::InvalidSubmission { field: "store", .. })
        ));
        assert!(!service.remove("local_1").unwrap());

        service.cache().clear().unwrap();
    }
}
