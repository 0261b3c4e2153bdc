use anyhow::Result;
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::database::models::ReportRow;

const REPORT_ROW_SELECT: &str = r#"
    SELECT
        te.work_date,
        te.hours_worked,
        te.task_description,
        e.first_name,
        e.last_name,
        p.project_name,
        p.project_code
    FROM timesheet_entries te
    JOIN timesheets t ON te.timesheet_id = t.id
    JOIN employees e ON t.employee_id = e.id
    LEFT JOIN projects p ON te.project_id = p.id
"#;

/// Read-side queries behind the report service. Entries are returned sorted
/// by work date ascending; dangling project references come back with NULL
/// project columns via the LEFT JOIN.
#[derive(Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn entries_by_employee(
        &self,
        employee_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<ReportRow>> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            r#"
            {REPORT_ROW_SELECT}
            WHERE t.employee_id = ? AND te.work_date BETWEEN ? AND ?
            ORDER BY te.work_date ASC
            "#
        ))
        .bind(employee_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn entries_by_project(
        &self,
        project_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<ReportRow>> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            r#"
            {REPORT_ROW_SELECT}
            WHERE te.project_id = ? AND te.work_date BETWEEN ? AND ?
            ORDER BY te.work_date ASC
            "#
        ))
        .bind(project_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Entries logged by all direct and indirect subordinates of the manager.
    /// UNION (not UNION ALL) keeps the walk terminating even if the directory
    /// ever lets a cycle through.
    pub async fn entries_by_manager(
        &self,
        manager_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<ReportRow>> {
        let rows = sqlx::query_as::<_, ReportRow>(&format!(
            r#"
            WITH RECURSIVE subordinates (id) AS (
                SELECT id FROM employees WHERE manager_id = ?
                UNION
                SELECT e.id FROM employees e
                JOIN subordinates s ON e.manager_id = s.id
            )
            {REPORT_ROW_SELECT}
            WHERE t.employee_id IN (SELECT id FROM subordinates)
              AND te.work_date BETWEEN ? AND ?
            ORDER BY te.work_date ASC
            "#
        ))
        .bind(manager_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
