use std::collections::BTreeSet;

use anyhow::Result;
use log::info;

use crate::cache::Cache;

const INTERESTS_KEY: &str = "interests";

/// Calendar entries the user marked as interesting, keyed by entry id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestSet {
    ids: BTreeSet<String>,
}

impl InterestSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(cache: &Cache) -> Result<Self> {
        let ids: Option<BTreeSet<String>> = cache.load(INTERESTS_KEY)?;
        Ok(Self {
            ids: ids.unwrap_or_default(),
        })
    }

    pub fn save(&self, cache: &Cache) -> Result<()> {
        cache.save(INTERESTS_KEY, &self.ids)?;
        info!("Saved {} marked tournaments", self.ids.len());
        Ok(())
    }

    /// Flip the mark on `id`; returns whether it is marked afterwards
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
