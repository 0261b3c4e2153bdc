#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tempfile::TempDir;

// Import the modules we need to test
use timesheet_api::database::init_database;
use timesheet_api::database::models::{CreateEntryInput, CreateTimesheetInput};
use timesheet_api::database::repositories::{
    EmployeeRepository, ProjectRepository, ReportRepository, TimesheetRepository,
};
use timesheet_api::{ActivityService, ReportService, TimesheetService};

// Test database wrapper
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());
        let pool = init_database(&database_url).await?;

        Ok(TestDb {
            pool,
            _temp_dir: temp_dir,
        })
    }
}

pub fn setup_test_env() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Service builders over a shared pool
pub fn timesheet_service(pool: &SqlitePool) -> TimesheetService {
    TimesheetService::new(
        TimesheetRepository::new(pool.clone()),
        EmployeeRepository::new(pool.clone()),
        ProjectRepository::new(pool.clone()),
    )
}

pub fn report_service(pool: &SqlitePool) -> ReportService {
    ReportService::new(ReportRepository::new(pool.clone()))
}

pub fn activity_service(pool: &SqlitePool) -> ActivityService {
    ActivityService::new(
        TimesheetRepository::new(pool.clone()),
        ProjectRepository::new(pool.clone()),
    )
}

// Seed helpers. Employees and projects are owned by the directory/catalog
// side of the system, so tests insert them directly.
pub async fn create_employee(
    pool: &SqlitePool,
    email: &str,
    first_name: &str,
    last_name: &str,
    role: &str,
    manager_id: Option<i64>,
) -> i64 {
    let now = chrono::Utc::now();

    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO employees (email, first_name, last_name, role, manager_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(first_name)
    .bind(last_name)
    .bind(role)
    .bind(manager_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test employee")
}

pub async fn create_project(
    pool: &SqlitePool,
    project_code: &str,
    project_name: &str,
    manager_id: Option<i64>,
) -> i64 {
    let now = chrono::Utc::now();

    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO projects (project_code, project_name, manager_id, active, created_at, updated_at)
        VALUES (?, ?, ?, 1, ?, ?)
        RETURNING id
        "#,
    )
    .bind(project_code)
    .bind(project_name)
    .bind(manager_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test project")
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("invalid date literal")
}

pub fn week_input(employee_id: i64, week_start: &str) -> CreateTimesheetInput {
    let start = date(week_start);
    CreateTimesheetInput {
        employee_id,
        week_start_date: start,
        week_end_date: start + chrono::Duration::days(6),
    }
}

pub fn entry_input(project_id: i64, work_date: &str, hours_worked: f64) -> CreateEntryInput {
    CreateEntryInput {
        project_id,
        work_date: date(work_date),
        hours_worked,
        task_description: Some("Implementation work".to_string()),
    }
}
