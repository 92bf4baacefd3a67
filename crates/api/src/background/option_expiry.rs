//! Periodic release of lots whose option has lapsed.
//!
//! The same pass backs the `expire-options-cron` endpoint, so deployments
//! without an external scheduler still release stale holds.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use yam_db::models::lot_option::ExpiryResult;
use yam_db::repositories::LotOptionRepo;
use yam_events::{ChangeEvent, EventBus};

/// Expire stale options once and announce the affected tables.
///
/// Nothing is published when no option lapsed.
pub async fn expire_once(
    pool: &PgPool,
    event_bus: &EventBus,
) -> Result<ExpiryResult, sqlx::Error> {
    let result = LotOptionRepo::expire_stale(pool).await?;
    if result.expired_options > 0 {
        event_bus.publish(ChangeEvent::bulk_update("lot_options"));
    }
    if result.released_lots > 0 {
        event_bus.publish(ChangeEvent::bulk_update("lots"));
    }
    Ok(result)
}

/// Run the expiry loop every `interval` until `cancel` is triggered.
pub async fn run(
    pool: PgPool,
    event_bus: Arc<EventBus>,
    interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(interval_secs = interval.as_secs(), "Option expiry job started");

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Option expiry job stopping");
                break;
            }
            _ = ticker.tick() => {
                match expire_once(&pool, &event_bus).await {
                    Ok(result) if result.expired_options > 0 => {
                        tracing::info!(
                            expired = result.expired_options,
                            released = result.released_lots,
                            "Option expiry: released stale holds"
                        );
                    }
                    Ok(_) => tracing::debug!("Option expiry: nothing to expire"),
                    Err(e) => tracing::error!(error = %e, "Option expiry: pass failed"),
                }
            }
        }
    }
}
