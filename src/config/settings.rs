use std::env;
use std::path::PathBuf;

use crate::domain::CalendarView;

pub const API_URL_VAR: &str = "TCG_CALENDAR_API_URL";
pub const DATABASE_PATH_VAR: &str = "TCG_CALENDAR_DATABASE_PATH";
pub const CACHE_DIR_VAR: &str = "TCG_CALENDAR_CACHE_DIR";
pub const SEED_PATH_VAR: &str = "TCG_CALENDAR_SEED_PATH";

/// Where the shared tournament catalog comes from
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    /// Base URL of the tournaments API (`{base}/tournaments`); `None` skips the remote
    pub api_base_url: Option<String>,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    /// Bundled catalog JSON used when neither the API nor a snapshot is available
    pub seed_path: Option<PathBuf>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            api_base_url: Some("http://localhost:5000/api".to_string()),
            user_agent: "TcgTournamentCalendar/0.1",
            timeout_secs: 10,
            seed_path: None,
        }
    }
}

/// Local persistence: submitted tournaments and the file cache
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub database_path: String,
    pub cache_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: "tcg_tournament_calendar.db".to_string(),
            cache_dir: PathBuf::from("cache"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CalendarSettings {
    /// Page size used by `calendar` queries that do not name one
    pub default_view: CalendarView,
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub catalog: CatalogSettings,
    pub storage: StorageSettings,
    pub calendar: CalendarSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `TCG_CALENDAR_*` environment variables.
    ///
    /// An empty `TCG_CALENDAR_API_URL` disables the remote catalog.
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(url) = env::var(API_URL_VAR) {
            config.catalog.api_base_url = Some(url).filter(|u| !u.trim().is_empty());
        }
        if let Ok(path) = env::var(SEED_PATH_VAR) {
            config.catalog.seed_path = Some(PathBuf::from(path));
        }
        if let Ok(path) = env::var(DATABASE_PATH_VAR) {
            config.storage.database_path = path;
        }
        if let Ok(dir) = env::var(CACHE_DIR_VAR) {
            config.storage.cache_dir = PathBuf::from(dir);
        }

        config
    }
}
