//! Credit balance handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use eduportal_core::error::CoreError;
use eduportal_core::roles::Role;
use eduportal_db::repositories::CreditRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreditStatus {
    /// Remaining prepaid SUPPORT sessions for the acting sponsor.
    pub balance: i32,
}

/// GET /api/v1/credits
///
/// Parents read their own ledger; students read their sponsoring parent's.
/// Other roles hold no balance.
pub async fn get_balance(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let balance = match auth.role {
        Role::Parent => CreditRepo::balance(&state.pool, auth.user_id).await?,
        Role::Student => CreditRepo::balance_for_student(&state.pool, auth.user_id).await?,
        _ => {
            return Err(AppError::Core(CoreError::Forbidden(
                "Credit balances are held by sponsors and their students".into(),
            )));
        }
    };

    Ok(Json(DataResponse {
        data: CreditStatus { balance },
    }))
}
