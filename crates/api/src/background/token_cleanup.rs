//! Hourly purge of used or expired password reset tokens.

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use yam_db::repositories::PasswordResetRepo;

const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!(interval_secs = CLEANUP_INTERVAL.as_secs(), "Reset token cleanup started");

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Reset token cleanup stopping");
                break;
            }
            _ = interval.tick() => {
                match PasswordResetRepo::purge_stale(&pool).await {
                    Ok(0) => tracing::debug!("Reset token cleanup: nothing to purge"),
                    Ok(deleted) => tracing::info!(deleted, "Reset token cleanup: purged stale tokens"),
                    Err(e) => tracing::error!(error = %e, "Reset token cleanup failed"),
                }
            }
        }
    }
}
