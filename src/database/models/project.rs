use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog record for a project, read-only from the core's point of view.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub project_code: String,
    pub project_name: String,
    pub manager_id: Option<i64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
