//! Repository for the `credit_balances` table.

use sqlx::{PgPool, Postgres, Transaction};

use eduportal_core::types::DbId;

/// Credit ledger for SUPPORT-session sponsors.
pub struct CreditRepo;

impl CreditRepo {
    /// Take exactly one credit from the sponsor's balance.
    ///
    /// A single conditional UPDATE, so two concurrent debits can never both
    /// consume the last credit. Returns `false` (no mutation) when the
    /// balance is zero or the sponsor has no ledger row. Runs on the
    /// caller's transaction so scheduling can roll the whole step back.
    pub async fn debit(
        tx: &mut Transaction<'_, Postgres>,
        sponsor_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE credit_balances \
             SET balance = balance - 1, updated_at = now() \
             WHERE sponsor_id = $1 AND balance > 0",
        )
        .bind(sponsor_id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Add credits after an external payment (out-of-core integration).
    pub async fn credit(
        pool: &PgPool,
        sponsor_id: DbId,
        amount: i32,
    ) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO credit_balances (sponsor_id, balance) \
             VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_credit_sponsor \
             DO UPDATE SET balance = credit_balances.balance + EXCLUDED.balance, \
                           updated_at = now() \
             RETURNING balance",
        )
        .bind(sponsor_id)
        .bind(amount)
        .fetch_one(pool)
        .await
    }

    /// Current balance as a scalar; sponsors without a ledger row read 0.
    pub async fn balance(pool: &PgPool, sponsor_id: DbId) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE( \
                 (SELECT balance FROM credit_balances WHERE sponsor_id = $1), 0)",
        )
        .bind(sponsor_id)
        .fetch_one(pool)
        .await
    }

    /// Balance visible to a student: their sponsoring parent's balance.
    pub async fn balance_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE( \
                 (SELECT cb.balance FROM credit_balances cb \
                  INNER JOIN parent_links pl ON pl.parent_id = cb.sponsor_id \
                  WHERE pl.student_id = $1 \
                  LIMIT 1), 0)",
        )
        .bind(student_id)
        .fetch_one(pool)
        .await
    }
}
