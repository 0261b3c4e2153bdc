use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::macros::string_enum;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Timesheet {
    pub id: i64,
    pub employee_id: i64,
    pub week_start_date: NaiveDate,
    pub week_end_date: NaiveDate,
    pub status: TimesheetStatus,
    pub total_hours: f64,
    pub rejection_comment: Option<String>,
    pub approved_by: Option<i64>,
    pub rejected_by: Option<i64>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetEntry {
    pub id: i64,
    pub timesheet_id: i64,
    pub project_id: i64,
    pub work_date: NaiveDate,
    pub hours_worked: f64,
    pub task_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Timesheet together with its entries, as returned by the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetDetail {
    #[serde(flatten)]
    pub timesheet: Timesheet,
    pub entries: Vec<TimesheetEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimesheetInput {
    pub employee_id: i64,
    pub week_start_date: NaiveDate,
    pub week_end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryInput {
    pub project_id: i64,
    pub work_date: NaiveDate,
    pub hours_worked: f64,
    pub task_description: Option<String>,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
    pub enum TimesheetStatus {
        Draft => "draft",
        Submitted => "submitted",
        Approved => "approved",
        Rejected => "rejected",
    }
}
