use serde::Serialize;
use sqlx::FromRow;

use eduportal_core::types::{DbId, Timestamp};

/// A row from the `credit_balances` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CreditBalance {
    pub id: DbId,
    pub sponsor_id: DbId,
    pub balance: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
