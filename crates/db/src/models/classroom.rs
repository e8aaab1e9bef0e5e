use serde::Serialize;
use sqlx::FromRow;

use eduportal_core::types::{DbId, Timestamp};

/// `classrooms.class_type` value for shared classes.
pub const TYPE_GENERAL: &str = "GENERAL";

/// `classrooms.class_type` value for 1:1 credit-metered classes.
pub const TYPE_SUPPORT: &str = "SUPPORT";

/// A row from the `classrooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Classroom {
    pub id: DbId,
    pub name: String,
    pub class_type: String,
    pub max_students: i32,
    pub manager_id: DbId,
    pub sponsor_id: Option<DbId>,
    pub join_link: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Classroom {
    pub fn is_support(&self) -> bool {
        self.class_type == TYPE_SUPPORT
    }
}
