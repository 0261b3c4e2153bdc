use anyhow::Result;
use sqlx::SqlitePool;

use crate::database::models::Project;

/// Read-only view of the project catalog.
#[derive(Clone)]
pub struct ProjectRepository {
    pool: SqlitePool,
}

impl ProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, project_code, project_name, manager_id, active, created_at, updated_at
            FROM projects
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// Projects managed by the given employee, most recently created first.
    pub async fn find_by_manager(&self, manager_id: i64, limit: i64) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, project_code, project_name, manager_id, active, created_at, updated_at
            FROM projects
            WHERE manager_id = ?
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(manager_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }
}
