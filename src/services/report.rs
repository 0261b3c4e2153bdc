use chrono::NaiveDate;

use crate::database::models::{Report, ReportItem, ReportRow};
use crate::database::repositories::ReportRepository;
use crate::error::AppError;

enum Grouping {
    ByProject,
    ByEmployee,
}

/// Read-side projection over stored entries: total hours, hours grouped by
/// project or employee, and an itemized list sorted by work date.
#[derive(Clone)]
pub struct ReportService {
    reports: ReportRepository,
}

impl ReportService {
    pub fn new(reports: ReportRepository) -> Self {
        Self { reports }
    }

    pub async fn employee_report(
        &self,
        employee_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Report, AppError> {
        let rows = self
            .reports
            .entries_by_employee(employee_id, start_date, end_date)
            .await?;

        let mut report = build_report(rows, start_date, end_date, Grouping::ByProject);
        report.employee_id = Some(employee_id);

        log::debug!(
            "Employee report for {}: {} entries, {} h total",
            employee_id,
            report.entries.len(),
            report.total_hours
        );

        Ok(report)
    }

    pub async fn project_report(
        &self,
        project_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Report, AppError> {
        let rows = self
            .reports
            .entries_by_project(project_id, start_date, end_date)
            .await?;

        let mut report = build_report(rows, start_date, end_date, Grouping::ByEmployee);
        report.project_id = Some(project_id);

        Ok(report)
    }

    /// Hours across every direct and indirect subordinate of the manager,
    /// grouped by employee name.
    pub async fn manager_report(
        &self,
        manager_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Report, AppError> {
        let rows = self
            .reports
            .entries_by_manager(manager_id, start_date, end_date)
            .await?;

        let mut report = build_report(rows, start_date, end_date, Grouping::ByEmployee);
        report.manager_id = Some(manager_id);

        Ok(report)
    }
}

/// Entries with a dangling project reference are excluded from the grouped
/// hours but still itemized under a sentinel name.
fn build_report(
    rows: Vec<ReportRow>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    grouping: Grouping,
) -> Report {
    let mut report = Report::empty(start_date, end_date);

    for row in rows {
        report.total_hours += row.hours_worked;

        match grouping {
            Grouping::ByProject => {
                if let Some(project_name) = &row.project_name {
                    *report
                        .project_hours
                        .entry(project_name.clone())
                        .or_insert(0.0) += row.hours_worked;
                }
            }
            Grouping::ByEmployee => {
                *report
                    .employee_hours
                    .entry(row.employee_name())
                    .or_insert(0.0) += row.hours_worked;
            }
        }

        report.entries.push(ReportItem {
            work_date: row.work_date,
            employee_name: row.employee_name(),
            hours_worked: row.hours_worked,
            task_description: row.task_description.clone(),
            project_name: row
                .project_name
                .unwrap_or_else(|| "Unknown Project".to_string()),
            project_code: row.project_code.unwrap_or_else(|| "N/A".to_string()),
        });
    }

    report
}
