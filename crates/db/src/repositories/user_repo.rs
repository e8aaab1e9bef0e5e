//! Read-only access to the `users` table (identity is managed externally).

use sqlx::PgPool;

use eduportal_core::roles::Role;
use eduportal_core::types::DbId;

use crate::models::user::User;

const USER_COLUMNS: &str = "\
    id, username, first_name, last_name, user_type, created_at, updated_at";

/// Lookups against the externally managed `users` table.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a user's role, if the user exists and carries a known role.
    pub async fn find_role(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let user_type: Option<String> =
            sqlx::query_scalar("SELECT user_type FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(user_type.and_then(|raw| Role::parse(&raw).ok()))
    }
}
