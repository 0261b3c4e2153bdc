use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line in the recent-activity feed. Purely decorative; the icon and
/// color names are consumed verbatim by the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub icon: String,
    pub icon_color: String,
    pub title: String,
    pub time: String,
    pub timestamp: DateTime<Utc>,
}

/// Recently logged entry joined with its project name and the parent
/// timesheet's last-touched timestamp.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecentEntryRow {
    pub hours_worked: f64,
    pub project_name: Option<String>,
    pub touched_at: DateTime<Utc>,
}

/// Approval issued by a manager, with the owning employee's name.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecentApprovalRow {
    pub first_name: String,
    pub last_name: String,
    pub approved_at: DateTime<Utc>,
}

impl RecentApprovalRow {
    pub fn employee_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
