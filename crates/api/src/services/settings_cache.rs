//! Per-process read-through cache of settings grouped by category.
//!
//! Entries are filled on first read and dropped when a write touches the
//! category. When the store cannot be read, the hard-coded fallbacks are
//! served without being cached, so the next read retries the store.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use domain::models::setting::{fallback_settings, ContactNumbers, CONTACT_CATEGORY};
use persistence::repositories::SettingRepository;
use tokio::sync::RwLock;

pub type CategoryValues = BTreeMap<String, String>;

/// Where the cache loads settings from.
#[async_trait::async_trait]
pub trait SettingsSource: Send + Sync {
    async fn load_category(&self, category: &str) -> Result<CategoryValues, sqlx::Error>;
}

#[async_trait::async_trait]
impl SettingsSource for SettingRepository {
    async fn load_category(&self, category: &str) -> Result<CategoryValues, sqlx::Error> {
        let rows = self.list(Some(category)).await?;
        Ok(rows.into_iter().map(|row| (row.key, row.value)).collect())
    }
}

pub struct SettingsCache {
    source: Arc<dyn SettingsSource>,
    entries: RwLock<HashMap<String, Arc<CategoryValues>>>,
    /// Bumped on every invalidation. A load that started before an
    /// invalidation must not store its (possibly stale) result.
    generation: AtomicU64,
}

impl SettingsCache {
    pub fn new(source: Arc<dyn SettingsSource>) -> Self {
        Self {
            source,
            entries: RwLock::new(HashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Values of one category: cached, loaded from the store, or the fallbacks.
    pub async fn get_category(&self, category: &str) -> Arc<CategoryValues> {
        if let Some(values) = self.entries.read().await.get(category) {
            metrics::counter!("settings_cache_hits_total").increment(1);
            return Arc::clone(values);
        }
        metrics::counter!("settings_cache_misses_total").increment(1);

        let generation = self.generation.load(Ordering::Acquire);
        match self.source.load_category(category).await {
            Ok(values) => {
                let values = Arc::new(values);
                let mut entries = self.entries.write().await;
                if self.generation.load(Ordering::Acquire) == generation {
                    entries.insert(category.to_string(), Arc::clone(&values));
                }
                values
            }
            Err(e) => {
                tracing::warn!(
                    category = %category,
                    error = %e,
                    "Failed to load settings, serving fallbacks"
                );
                Arc::new(fallback_settings(category))
            }
        }
    }

    /// Stored contact numbers merged over the defaults.
    pub async fn contact_numbers(&self) -> ContactNumbers {
        ContactNumbers::from_values(&*self.get_category(CONTACT_CATEGORY).await)
    }

    pub async fn invalidate(&self, category: &str) {
        let mut entries = self.entries.write().await;
        self.generation.fetch_add(1, Ordering::AcqRel);
        entries.remove(category);
        tracing::debug!(category = %category, "Settings cache invalidated");
    }

    pub async fn invalidate_all(&self) {
        let mut entries = self.entries.write().await;
        self.generation.fetch_add(1, Ordering::AcqRel);
        entries.clear();
    }
}
