use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::errors::cache_context;

static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// File-based JSON cache: one `{key}.json` file per entry
#[derive(Debug, Clone)]
pub struct Cache {
    cache_dir: PathBuf,
}

impl Cache {
    /// Create a new cache instance, creating its directory if needed
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();

        fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;

        Ok(Self { cache_dir })
    }

    /// Save data to cache
    pub fn save<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let file_path = self.build_path(key);
        self.write_json(&file_path, data)
            .with_context(|| cache_context("save", key))?;

        debug!("Saved data to cache: {}", file_path.display());
        Ok(())
    }

    /// Load data from cache
    pub fn load<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        let file_path = self.build_path(key);
        let data = self
            .read_json_opt(&file_path)
            .with_context(|| cache_context("load", key))?;

        if data.is_some() {
            debug!("Loaded data from cache: {}", file_path.display());
        }
        Ok(data)
    }

    /// Clear all cached data
    pub fn clear(&self) -> Result<()> {
        fs::remove_dir_all(&self.cache_dir).context("Failed to clear cache")?;

        fs::create_dir_all(&self.cache_dir).context("Failed to recreate cache directory")?;

        info!("Cleared cache directory");
        Ok(())
    }

    // --- Helper Methods ---

    fn build_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Write through a sibling temp file so readers never see a partial entry
    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data).context("Failed to serialize data")?;
        let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp_path = path.with_extension(format!("json.{}.{}.tmp", std::process::id(), seq));
        fs::write(&tmp_path, json).context("Failed to write cache file")?;
        fs::rename(&tmp_path, path).context("Failed to move cache file into place")?;
        Ok(())
    }

    fn read_json_opt<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(path).context("Failed to read cache file")?;
        let data = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                path,
                json.chars().take(200).collect::<String>()
            )
        })?;
        Ok(Some(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestData {
        value: String,
    }

    fn temp_cache(name: &str) -> Cache {
        let temp_dir = std::env::temp_dir()
            .join("tcg_calendar_test_cache")
            .join(format!("{}_{}", name, std::process::id()));
        Cache::new(&temp_dir).unwrap()
    }

    #[test]
    fn test_cache_save_and_load() {
        let cache = temp_cache("save_load");

        let data = TestData {
            value: "test".to_string(),
        };

        cache.save("test_key", &data).unwrap();
        let loaded: Option<TestData> = cache.load("test_key").unwrap();

        assert_eq!(loaded, Some(data));

        // Cleanup
        cache.clear().unwrap();
        let cleared: Option<TestData> = cache.load("test_key").unwrap();
        assert_eq!(cleared, None);
    }

    #[test]
    fn test_missing_key_loads_none() {
        let cache = temp_cache("missing");
        let loaded: Option<TestData> = cache.load("nothing_here").unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_save_replaces_entry_without_leftovers() {
        let cache = temp_cache("replace");

        cache.save("entry", &TestData { value: "old".to_string() }).unwrap();
        cache.save("entry", &TestData { value: "new".to_string() }).unwrap();

        let loaded: Option<TestData> = cache.load("entry").unwrap();
        assert_eq!(loaded, Some(TestData { value: "new".to_string() }));

        let files: Vec<_> = fs::read_dir(&cache.cache_dir).unwrap().collect();
        assert_eq!(files.len(), 1);

        cache.clear().unwrap();
    }

    #[test]
    fn test_corrupt_entry_is_error() {
        let cache = temp_cache("corrupt");
        fs::write(cache.build_path("broken"), "{ not json").unwrap();

        let loaded: Result<Option<TestData>> = cache.load("broken");
        assert!(loaded.is_err());

        cache.clear().unwrap();
    }
}
