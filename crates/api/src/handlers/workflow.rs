//! Join/cancel workflow driven by capability-token redemption.
//!
//! The token is the sole authorization artifact: redemption re-derives the
//! acting user's role but performs no other standing check. Duplicate
//! joins and cancellations are idempotent successes.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use eduportal_core::clock::{self, JOIN_FUTURE_TOLERANCE_MINS, JOIN_PAST_TOLERANCE_MINS};
use eduportal_core::error::CoreError;
use eduportal_db::repositories::{InsertOutcome, ParticipationRepo, UserRepo};

use crate::auth::capability;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for join and cancel: the bearer capability.
#[derive(Debug, Deserialize)]
pub struct RedeemRequest {
    pub token: String,
}

/// Successful join result.
#[derive(Debug, Serialize)]
pub struct JoinResult {
    /// Meeting link embedded in the capability.
    pub link: String,
    /// True when the join had been recorded before.
    pub already_recorded: bool,
}

/// Successful cancel result.
#[derive(Debug, Serialize)]
pub struct CancelResult {
    pub already_recorded: bool,
}

/// POST /api/v1/occurrences/join
///
/// Redeem a capability token to join its occurrence. Joining is only
/// allowed inside the time window (50 minutes past, 10 minutes future,
/// minute-of-day comparison).
pub async fn join(
    State(state): State<AppState>,
    Json(input): Json<RedeemRequest>,
) -> AppResult<impl IntoResponse> {
    let claims = capability::redeem(&input.token, &state.config.capability)?;

    let now = Utc::now().time();
    if !clock::within_window(
        claims.class_time,
        now,
        JOIN_PAST_TOLERANCE_MINS,
        JOIN_FUTURE_TOLERANCE_MINS,
    ) {
        return Err(AppError::Core(CoreError::OutOfWindow(format!(
            "class is more than {JOIN_PAST_TOLERANCE_MINS} minutes in the past \
             or {JOIN_FUTURE_TOLERANCE_MINS} minutes in the future"
        ))));
    }

    let role = UserRepo::find_role(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Unknown joining user".into()))
        })?;

    let outcome = ParticipationRepo::record_joining(
        &state.pool,
        claims.occurrence_id,
        claims.sub,
        role,
        now,
    )
    .await?;

    tracing::info!(
        user_id = claims.sub,
        occurrence_id = claims.occurrence_id,
        role = %role,
        already_recorded = outcome == InsertOutcome::AlreadyRecorded,
        "Class joined"
    );

    Ok(Json(DataResponse {
        data: JoinResult {
            link: claims.link,
            already_recorded: outcome == InsertOutcome::AlreadyRecorded,
        },
    }))
}

/// POST /api/v1/occurrences/cancel
///
/// Redeem a capability token to cancel its occurrence. No time window
/// applies to cancellation; cancelling twice is success.
pub async fn cancel(
    State(state): State<AppState>,
    Json(input): Json<RedeemRequest>,
) -> AppResult<impl IntoResponse> {
    let claims = capability::redeem(&input.token, &state.config.capability)?;

    let outcome =
        ParticipationRepo::record_cancellation(&state.pool, claims.occurrence_id, claims.sub)
            .await?;

    tracing::info!(
        user_id = claims.sub,
        occurrence_id = claims.occurrence_id,
        already_recorded = outcome == InsertOutcome::AlreadyRecorded,
        "Class cancelled"
    );

    Ok(Json(DataResponse {
        data: CancelResult {
            already_recorded: outcome == InsertOutcome::AlreadyRecorded,
        },
    }))
}
