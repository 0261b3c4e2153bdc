use chrono::{DateTime, NaiveDate, Utc};

use crate::database::models::{Activity, Timesheet};
use crate::database::repositories::{ProjectRepository, TimesheetRepository};

/// Builds the dashboard's recent-activity timeline. The feed is decorative,
/// so any internal failure degrades to a single welcome entry instead of an
/// error.
#[derive(Clone)]
pub struct ActivityService {
    timesheets: TimesheetRepository,
    projects: ProjectRepository,
}

impl ActivityService {
    pub fn new(timesheets: TimesheetRepository, projects: ProjectRepository) -> Self {
        Self {
            timesheets,
            projects,
        }
    }

    /// The employee's most recent timesheet touches and logged entries,
    /// merged and truncated to `limit`.
    pub async fn recent_activities(&self, employee_id: i64, limit: usize) -> Vec<Activity> {
        match self.collect_recent(employee_id, limit).await {
            Ok(activities) => activities,
            Err(err) => {
                log::warn!(
                    "Error fetching recent activities for employee {}: {}",
                    employee_id,
                    err
                );
                default_activities()
            }
        }
    }

    /// Projects the manager owns plus timesheets they approved.
    pub async fn manager_activities(&self, manager_id: i64, limit: usize) -> Vec<Activity> {
        match self.collect_manager(manager_id, limit).await {
            Ok(activities) => activities,
            Err(err) => {
                log::warn!(
                    "Error fetching manager activities for manager {}: {}",
                    manager_id,
                    err
                );
                default_activities()
            }
        }
    }

    async fn collect_recent(
        &self,
        employee_id: i64,
        limit: usize,
    ) -> anyhow::Result<Vec<Activity>> {
        let now = Utc::now();
        let mut activities = Vec::new();

        let recent_timesheets = self
            .timesheets
            .recent_by_employee(employee_id, limit as i64)
            .await?;

        for timesheet in recent_timesheets {
            activities.push(timesheet_activity(&timesheet, now));
        }

        let recent_entries = self
            .timesheets
            .recent_entries_by_employee(employee_id, limit as i64)
            .await?;

        for entry in recent_entries {
            let project_name = entry
                .project_name
                .unwrap_or_else(|| "Unknown Project".to_string());
            activities.push(Activity {
                icon: "fa-clock".to_string(),
                icon_color: "#667eea".to_string(),
                title: format!("Logged {} hours on {}", entry.hours_worked, project_name),
                time: relative_time(entry.touched_at, now),
                timestamp: entry.touched_at,
            });
        }

        Ok(merge_and_truncate(activities, limit))
    }

    async fn collect_manager(
        &self,
        manager_id: i64,
        limit: usize,
    ) -> anyhow::Result<Vec<Activity>> {
        let now = Utc::now();
        let mut activities = Vec::new();

        let projects = self.projects.find_by_manager(manager_id, limit as i64).await?;

        for project in projects {
            activities.push(Activity {
                icon: "fa-plus-circle".to_string(),
                icon_color: "#667eea".to_string(),
                title: format!("New project \"{}\" created", project.project_name),
                time: relative_time(project.created_at, now),
                timestamp: project.created_at,
            });
        }

        let approvals = self
            .timesheets
            .recent_approvals_by_manager(manager_id, limit as i64)
            .await?;

        for approval in approvals {
            activities.push(Activity {
                icon: "fa-user-check".to_string(),
                icon_color: "#28a745".to_string(),
                title: format!("Approved timesheet for {}", approval.employee_name()),
                time: relative_time(approval.approved_at, now),
                timestamp: approval.approved_at,
            });
        }

        Ok(merge_and_truncate(activities, limit))
    }
}

/// Icon and title follow the timesheet's furthest progress: approval beats
/// submission beats creation.
fn timesheet_activity(timesheet: &Timesheet, now: DateTime<Utc>) -> Activity {
    if let Some(approved_at) = timesheet.approved_at {
        Activity {
            icon: "fa-check-circle".to_string(),
            icon_color: "#28a745".to_string(),
            title: format!(
                "Timesheet approved for week of {}",
                format_week(timesheet.week_start_date)
            ),
            time: relative_time(approved_at, now),
            timestamp: approved_at,
        }
    } else if let Some(submitted_at) = timesheet.submitted_at {
        Activity {
            icon: "fa-paper-plane".to_string(),
            icon_color: "#007bff".to_string(),
            title: format!(
                "Timesheet submitted for week of {}",
                format_week(timesheet.week_start_date)
            ),
            time: relative_time(submitted_at, now),
            timestamp: submitted_at,
        }
    } else {
        Activity {
            icon: "fa-edit".to_string(),
            icon_color: "#ffc107".to_string(),
            title: format!(
                "Timesheet created for week of {}",
                format_week(timesheet.week_start_date)
            ),
            time: relative_time(timesheet.created_at, now),
            timestamp: timesheet.created_at,
        }
    }
}

fn merge_and_truncate(mut activities: Vec<Activity>, limit: usize) -> Vec<Activity> {
    activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    activities.truncate(limit);
    activities
}

fn default_activities() -> Vec<Activity> {
    vec![Activity {
        icon: "fa-info-circle".to_string(),
        icon_color: "#17a2b8".to_string(),
        title: "Welcome to the timesheet system".to_string(),
        time: "Just now".to_string(),
        timestamp: Utc::now(),
    }]
}

fn format_week(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// "N minutes ago" under an hour, "N hours ago" under a day, "N days ago"
/// under thirty, absolute date beyond that.
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - timestamp;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 60 {
        if minutes <= 1 {
            "1 minute ago".to_string()
        } else {
            format!("{} minutes ago", minutes)
        }
    } else if hours < 24 {
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if days < 30 {
        if days == 1 {
            "1 day ago".to_string()
        } else {
            format!("{} days ago", days)
        }
    } else {
        timestamp.format("%b %d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn relative_time_minutes() {
        let now = at(1_700_000_000);
        assert_eq!(relative_time(now - chrono::Duration::seconds(30), now), "1 minute ago");
        assert_eq!(relative_time(now - chrono::Duration::minutes(1), now), "1 minute ago");
        assert_eq!(
            relative_time(now - chrono::Duration::minutes(59), now),
            "59 minutes ago"
        );
    }

    #[test]
    fn relative_time_hours_and_days() {
        let now = at(1_700_000_000);
        assert_eq!(relative_time(now - chrono::Duration::hours(1), now), "1 hour ago");
        assert_eq!(relative_time(now - chrono::Duration::hours(23), now), "23 hours ago");
        assert_eq!(relative_time(now - chrono::Duration::days(1), now), "1 day ago");
        assert_eq!(relative_time(now - chrono::Duration::days(29), now), "29 days ago");
    }

    #[test]
    fn relative_time_falls_back_to_absolute_date() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let old = Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap();
        assert_eq!(relative_time(old, now), "Jan 05, 2024");
    }

    #[test]
    fn truncates_to_limit_most_recent_first() {
        let base = at(1_700_000_000);
        let activities: Vec<Activity> = (0..4)
            .map(|i| Activity {
                icon: "fa-clock".to_string(),
                icon_color: "#667eea".to_string(),
                title: format!("activity {}", i),
                time: "1 minute ago".to_string(),
                timestamp: base + chrono::Duration::minutes(i),
            })
            .collect();

        let merged = merge_and_truncate(activities, 2);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].title, "activity 3");
        assert_eq!(merged[1].title, "activity 2");
    }
}
