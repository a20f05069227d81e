//! Publishes connection pool gauges and flags a saturated pool.

use std::sync::atomic::{AtomicBool, Ordering};

use persistence::metrics::{record_pool_metrics, PoolUsage};
use sqlx::PgPool;

use super::scheduler::{Job, JobFrequency};

/// Samples the database pool every ten seconds.
///
/// A saturated pool means checkout and admin requests are queueing for a
/// connection. That is logged once when it starts and once when it clears,
/// not on every sample.
pub struct PoolMetricsJob {
    pool: PgPool,
    saturated: AtomicBool,
}

impl PoolMetricsJob {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            saturated: AtomicBool::new(false),
        }
    }

    fn observe(&self, usage: PoolUsage) {
        let now = usage.is_saturated();
        let before = self.saturated.swap(now, Ordering::Relaxed);
        match (before, now) {
            (false, true) => tracing::warn!(
                active = usage.active(),
                max = usage.max,
                "Database pool saturated"
            ),
            (true, false) => tracing::info!(
                active = usage.active(),
                max = usage.max,
                "Database pool recovered"
            ),
            _ => tracing::trace!(size = usage.size, idle = usage.idle, "Pool sampled"),
        }
    }
}

#[async_trait::async_trait]
impl Job for PoolMetricsJob {
    fn name(&self) -> &'static str {
        "pool_metrics"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Seconds(10)
    }

    async fn execute(&self) -> Result<(), String> {
        self.observe(record_pool_metrics(&self.pool));
        Ok(())
    }
}
