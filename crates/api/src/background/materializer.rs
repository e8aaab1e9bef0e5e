//! Periodic occurrence materialization.
//!
//! Projects today's timetable entries into `class_occurrences` at process
//! start and every ten minutes after. The task never coordinates with
//! manual materialization triggers; duplicate work resolves on the
//! occurrence uniqueness constraint and counts as already done.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use eduportal_db::repositories::OccurrenceRepo;

/// How often today's occurrences are materialized.
const MATERIALIZE_INTERVAL: Duration = Duration::from_secs(600); // 10 minutes

/// Run the materializer loop until `cancel` is triggered.
///
/// The first tick fires immediately, so occurrences exist as soon as the
/// process is up.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = MATERIALIZE_INTERVAL.as_secs(),
        "Occurrence materializer started"
    );

    let mut interval = tokio::time::interval(MATERIALIZE_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Occurrence materializer stopping");
                break;
            }
            _ = interval.tick() => {
                let today = Utc::now().date_naive();
                match OccurrenceRepo::materialize_for_date(&pool, today).await {
                    Ok(created) => {
                        if created > 0 {
                            tracing::info!(created, %today, "Materialized today's occurrences");
                        } else {
                            tracing::debug!(%today, "Occurrences already materialized");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, %today, "Occurrence materialization failed");
                    }
                }
            }
        }
    }
}
