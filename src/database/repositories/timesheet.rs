use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::database::models::{
    CreateEntryInput, CreateTimesheetInput, RecentApprovalRow, RecentEntryRow, Timesheet,
    TimesheetEntry, TimesheetStatus,
};

const TIMESHEET_COLUMNS: &str = r#"
    id,
    employee_id,
    week_start_date,
    week_end_date,
    status,
    total_hours,
    rejection_comment,
    approved_by,
    rejected_by,
    submitted_at,
    approved_at,
    created_at,
    updated_at
"#;

const ENTRY_COLUMNS: &str = r#"
    id,
    timesheet_id,
    project_id,
    work_date,
    hours_worked,
    task_description,
    created_at,
    updated_at
"#;

/// Persistence for timesheets and their entries. Status transitions and entry
/// inserts run against a caller-held transaction so the status check and the
/// write share one boundary.
#[derive(Clone)]
pub struct TimesheetRepository {
    pool: SqlitePool,
}

impl TimesheetRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Create a new draft timesheet
    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        input: &CreateTimesheetInput,
    ) -> Result<Timesheet, sqlx::Error> {
        let now = Utc::now();
        let status_str = TimesheetStatus::Draft.to_string();

        let timesheet = sqlx::query_as::<_, Timesheet>(&format!(
            r#"
            INSERT INTO
                timesheets (
                    employee_id,
                    week_start_date,
                    week_end_date,
                    status,
                    total_hours,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, 0, ?, ?)
            RETURNING {TIMESHEET_COLUMNS}
            "#
        ))
        .bind(input.employee_id)
        .bind(input.week_start_date)
        .bind(input.week_end_date)
        .bind(status_str)
        .bind(now)
        .bind(now)
        .fetch_one(&mut **tx)
        .await?;

        Ok(timesheet)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Timesheet>> {
        let timesheet = sqlx::query_as::<_, Timesheet>(&format!(
            "SELECT {TIMESHEET_COLUMNS} FROM timesheets WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(timesheet)
    }

    pub async fn find_by_id_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
    ) -> Result<Option<Timesheet>, sqlx::Error> {
        sqlx::query_as::<_, Timesheet>(&format!(
            "SELECT {TIMESHEET_COLUMNS} FROM timesheets WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
    }

    pub async fn find_by_employee_and_week_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        employee_id: i64,
        week_start_date: NaiveDate,
    ) -> Result<Option<Timesheet>, sqlx::Error> {
        sqlx::query_as::<_, Timesheet>(&format!(
            r#"
            SELECT {TIMESHEET_COLUMNS}
            FROM timesheets
            WHERE employee_id = ? AND week_start_date = ?
            "#
        ))
        .bind(employee_id)
        .bind(week_start_date)
        .fetch_optional(&mut **tx)
        .await
    }

    /// All timesheets for an employee, newest week first.
    pub async fn find_by_employee(&self, employee_id: i64) -> Result<Vec<Timesheet>> {
        let timesheets = sqlx::query_as::<_, Timesheet>(&format!(
            r#"
            SELECT {TIMESHEET_COLUMNS}
            FROM timesheets
            WHERE employee_id = ?
            ORDER BY week_start_date DESC
            "#
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(timesheets)
    }

    /// Submitted timesheets owned by direct reports of the given manager.
    pub async fn find_pending_by_manager(&self, manager_id: i64) -> Result<Vec<Timesheet>> {
        let timesheets = sqlx::query_as::<_, Timesheet>(
            r#"
            SELECT
                t.id,
                t.employee_id,
                t.week_start_date,
                t.week_end_date,
                t.status,
                t.total_hours,
                t.rejection_comment,
                t.approved_by,
                t.rejected_by,
                t.submitted_at,
                t.approved_at,
                t.created_at,
                t.updated_at
            FROM timesheets t
            JOIN employees e ON t.employee_id = e.id
            WHERE e.manager_id = ? AND t.status = ?
            ORDER BY t.submitted_at ASC
            "#,
        )
        .bind(manager_id)
        .bind(TimesheetStatus::Submitted.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(timesheets)
    }

    pub async fn mark_submitted(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
    ) -> Result<Timesheet, sqlx::Error> {
        let now = Utc::now();

        sqlx::query_as::<_, Timesheet>(&format!(
            r#"
            UPDATE timesheets
            SET status = ?, submitted_at = ?, updated_at = ?
            WHERE id = ?
            RETURNING {TIMESHEET_COLUMNS}
            "#
        ))
        .bind(TimesheetStatus::Submitted.to_string())
        .bind(now)
        .bind(now)
        .bind(id)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn mark_approved(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
        approved_by: i64,
    ) -> Result<Timesheet, sqlx::Error> {
        let now = Utc::now();

        sqlx::query_as::<_, Timesheet>(&format!(
            r#"
            UPDATE timesheets
            SET status = ?, approved_by = ?, approved_at = ?, updated_at = ?
            WHERE id = ?
            RETURNING {TIMESHEET_COLUMNS}
            "#
        ))
        .bind(TimesheetStatus::Approved.to_string())
        .bind(approved_by)
        .bind(now)
        .bind(now)
        .bind(id)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn mark_rejected(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
        rejected_by: i64,
        comment: &str,
    ) -> Result<Timesheet, sqlx::Error> {
        let now = Utc::now();

        sqlx::query_as::<_, Timesheet>(&format!(
            r#"
            UPDATE timesheets
            SET status = ?, rejected_by = ?, rejection_comment = ?, updated_at = ?
            WHERE id = ?
            RETURNING {TIMESHEET_COLUMNS}
            "#
        ))
        .bind(TimesheetStatus::Rejected.to_string())
        .bind(rejected_by)
        .bind(comment)
        .bind(now)
        .bind(id)
        .fetch_one(&mut **tx)
        .await
    }

    /// Append an entry to a draft timesheet.
    pub async fn insert_entry(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        timesheet_id: i64,
        input: &CreateEntryInput,
    ) -> Result<TimesheetEntry, sqlx::Error> {
        let now = Utc::now();

        sqlx::query_as::<_, TimesheetEntry>(&format!(
            r#"
            INSERT INTO
                timesheet_entries (
                    timesheet_id,
                    project_id,
                    work_date,
                    hours_worked,
                    task_description,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?)
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(timesheet_id)
        .bind(input.project_id)
        .bind(input.work_date)
        .bind(input.hours_worked)
        .bind(input.task_description.as_deref())
        .bind(now)
        .bind(now)
        .fetch_one(&mut **tx)
        .await
    }

    /// Refresh the cached total from the entries, inside the same transaction
    /// as the entry write that invalidated it.
    pub async fn recompute_total_hours(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        timesheet_id: i64,
    ) -> Result<f64, sqlx::Error> {
        let now = Utc::now();

        sqlx::query_scalar::<_, f64>(
            r#"
            UPDATE timesheets
            SET total_hours = (
                    SELECT COALESCE(SUM(hours_worked), 0)
                    FROM timesheet_entries
                    WHERE timesheet_id = ?
                ),
                updated_at = ?
            WHERE id = ?
            RETURNING total_hours
            "#,
        )
        .bind(timesheet_id)
        .bind(now)
        .bind(timesheet_id)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn entries_for_timesheet(&self, timesheet_id: i64) -> Result<Vec<TimesheetEntry>> {
        let entries = sqlx::query_as::<_, TimesheetEntry>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM timesheet_entries
            WHERE timesheet_id = ?
            ORDER BY work_date ASC
            "#
        ))
        .bind(timesheet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Most recently touched timesheets for the activity feed.
    pub async fn recent_by_employee(&self, employee_id: i64, limit: i64) -> Result<Vec<Timesheet>> {
        let timesheets = sqlx::query_as::<_, Timesheet>(&format!(
            r#"
            SELECT {TIMESHEET_COLUMNS}
            FROM timesheets
            WHERE employee_id = ?
            ORDER BY updated_at DESC
            LIMIT ?
            "#
        ))
        .bind(employee_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(timesheets)
    }

    /// Most recently logged entries for the activity feed, with the project
    /// name and the parent timesheet's last-touched timestamp.
    pub async fn recent_entries_by_employee(
        &self,
        employee_id: i64,
        limit: i64,
    ) -> Result<Vec<RecentEntryRow>> {
        let rows = sqlx::query_as::<_, RecentEntryRow>(
            r#"
            SELECT
                te.hours_worked,
                p.project_name,
                t.updated_at AS touched_at
            FROM timesheet_entries te
            JOIN timesheets t ON te.timesheet_id = t.id
            LEFT JOIN projects p ON te.project_id = p.id
            WHERE t.employee_id = ?
            ORDER BY t.updated_at DESC
            LIMIT ?
            "#,
        )
        .bind(employee_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Timesheets this manager approved, most recent first.
    pub async fn recent_approvals_by_manager(
        &self,
        manager_id: i64,
        limit: i64,
    ) -> Result<Vec<RecentApprovalRow>> {
        let rows = sqlx::query_as::<_, RecentApprovalRow>(
            r#"
            SELECT
                e.first_name,
                e.last_name,
                t.approved_at
            FROM timesheets t
            JOIN employees e ON t.employee_id = e.id
            WHERE t.approved_by = ? AND t.approved_at IS NOT NULL
            ORDER BY t.approved_at DESC
            LIMIT ?
            "#,
        )
        .bind(manager_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
