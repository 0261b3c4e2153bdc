use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregated hours plus itemized entries over a date range, scoped to one
/// employee, one project, or one manager's subordinate tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub employee_id: Option<i64>,
    pub project_id: Option<i64>,
    pub manager_id: Option<i64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_hours: f64,
    pub project_hours: HashMap<String, f64>,
    pub employee_hours: HashMap<String, f64>,
    pub entries: Vec<ReportItem>,
}

impl Report {
    pub fn empty(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            employee_id: None,
            project_id: None,
            manager_id: None,
            start_date,
            end_date,
            total_hours: 0.0,
            project_hours: HashMap::new(),
            employee_hours: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportItem {
    pub work_date: NaiveDate,
    pub employee_name: String,
    pub project_name: String,
    pub project_code: String,
    pub hours_worked: f64,
    pub task_description: Option<String>,
}

/// Raw joined row behind a report: entry columns plus the owning employee's
/// name and the (possibly dangling) project reference.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReportRow {
    pub work_date: NaiveDate,
    pub hours_worked: f64,
    pub task_description: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub project_name: Option<String>,
    pub project_code: Option<String>,
}

impl ReportRow {
    pub fn employee_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
