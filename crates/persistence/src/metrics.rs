//! Query timing and pool gauges exported through the `metrics` facade.

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Times one repository query. Dropping it without calling
/// [`QueryTimer::record`] records nothing, so failed queries that return
/// early through `?` are not counted.
pub struct QueryTimer {
    query: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query: &'static str) -> Self {
        Self {
            query,
            start: Instant::now(),
        }
    }

    pub fn record(self) {
        histogram!("database_query_duration_seconds", "query" => self.query)
            .record(self.start.elapsed().as_secs_f64());
    }
}

/// Connection counts read from the pool at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolUsage {
    pub size: u32,
    pub idle: u32,
    pub max: u32,
}

impl PoolUsage {
    pub fn active(&self) -> u32 {
        self.size.saturating_sub(self.idle)
    }

    /// Every permitted connection is checked out.
    pub fn is_saturated(&self) -> bool {
        self.max > 0 && self.active() >= self.max
    }
}

/// Publishes pool occupancy gauges and returns what was published.
pub fn record_pool_metrics(pool: &PgPool) -> PoolUsage {
    let usage = PoolUsage {
        size: pool.size(),
        idle: u32::try_from(pool.num_idle()).unwrap_or(u32::MAX),
        max: pool.options().get_max_connections(),
    };

    gauge!("database_connections_total").set(f64::from(usage.size));
    gauge!("database_connections_idle").set(f64::from(usage.idle));
    gauge!("database_connections_active").set(f64::from(usage.active()));
    gauge!("database_connections_max").set(f64::from(usage.max));
    usage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_keeps_query_name() {
        let timer = QueryTimer::new("list_products");
        assert_eq!(timer.query, "list_products");
        // No recorder is installed in unit tests; recording is a no-op.
        timer.record();
    }

    #[test]
    fn test_pool_usage_saturation() {
        let busy = PoolUsage { size: 5, idle: 0, max: 5 };
        assert_eq!(busy.active(), 5);
        assert!(busy.is_saturated());

        let quiet = PoolUsage { size: 5, idle: 3, max: 5 };
        assert_eq!(quiet.active(), 2);
        assert!(!quiet.is_saturated());

        // Idle can briefly exceed size while connections are being returned.
        let settling = PoolUsage { size: 1, idle: 2, max: 5 };
        assert_eq!(settling.active(), 0);
    }
}
