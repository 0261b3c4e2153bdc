use crate::database::models::{
    CreateEntryInput, CreateTimesheetInput, Timesheet, TimesheetDetail, TimesheetEntry,
    TimesheetStatus,
};
use crate::database::repositories::{EmployeeRepository, ProjectRepository, TimesheetRepository};
use crate::error::AppError;

const MAX_HOURS_PER_DAY: f64 = 24.0;

/// Owns the timesheet state machine:
///
/// ```text
/// draft --submit--> submitted --approve--> approved (terminal)
///                            \----reject--> rejected (terminal)
/// ```
///
/// Every transition re-checks the current status inside the same transaction
/// as the write, so a concurrent submit cannot slip an entry past the lock.
#[derive(Clone)]
pub struct TimesheetService {
    timesheets: TimesheetRepository,
    employees: EmployeeRepository,
    projects: ProjectRepository,
}

impl TimesheetService {
    pub fn new(
        timesheets: TimesheetRepository,
        employees: EmployeeRepository,
        projects: ProjectRepository,
    ) -> Self {
        Self {
            timesheets,
            employees,
            projects,
        }
    }

    /// Create a draft timesheet for the employee's week. The existence
    /// pre-check gives the friendly conflict message; the unique index on
    /// (employee_id, week_start_date) closes the race the pre-check leaves.
    pub async fn create_timesheet(
        &self,
        input: CreateTimesheetInput,
    ) -> Result<Timesheet, AppError> {
        if input.week_end_date < input.week_start_date {
            return Err(AppError::Validation(
                "Week end date must not be before week start date".to_string(),
            ));
        }

        let employee = self
            .employees
            .find_by_id(input.employee_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Employee not found with id: {}", input.employee_id))
            })?;

        let mut tx = self.timesheets.begin().await?;

        if self
            .timesheets
            .find_by_employee_and_week_tx(&mut tx, employee.id, input.week_start_date)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Timesheet already exists for this week".to_string(),
            ));
        }

        let timesheet = match self.timesheets.create(&mut tx, &input).await {
            Ok(timesheet) => timesheet,
            Err(err) if AppError::is_unique_violation(&err) => {
                return Err(AppError::Conflict(
                    "Timesheet already exists for this week".to_string(),
                ));
            }
            Err(err) => return Err(err.into()),
        };

        tx.commit().await?;

        log::info!(
            "Created timesheet {} for employee {} (week of {})",
            timesheet.id,
            timesheet.employee_id,
            timesheet.week_start_date
        );

        Ok(timesheet)
    }

    /// Append an entry to a draft timesheet and refresh its cached total.
    pub async fn add_entry(
        &self,
        timesheet_id: i64,
        input: CreateEntryInput,
    ) -> Result<TimesheetEntry, AppError> {
        if !(0.0..=MAX_HOURS_PER_DAY).contains(&input.hours_worked) {
            return Err(AppError::Validation(format!(
                "Hours worked must be between 0 and {}",
                MAX_HOURS_PER_DAY
            )));
        }

        self.projects
            .find_by_id(input.project_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Project not found with id: {}", input.project_id))
            })?;

        let mut tx = self.timesheets.begin().await?;

        let timesheet = self
            .timesheets
            .find_by_id_tx(&mut tx, timesheet_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Timesheet not found with id: {}", timesheet_id))
            })?;

        if timesheet.status != TimesheetStatus::Draft {
            return Err(AppError::InvalidState(
                "Cannot modify timesheet that is not in draft status".to_string(),
            ));
        }

        let entry = self
            .timesheets
            .insert_entry(&mut tx, timesheet.id, &input)
            .await?;
        let total_hours = self
            .timesheets
            .recompute_total_hours(&mut tx, timesheet.id)
            .await?;

        tx.commit().await?;

        log::debug!(
            "Added entry {} ({} h) to timesheet {}, total now {} h",
            entry.id,
            entry.hours_worked,
            timesheet.id,
            total_hours
        );

        Ok(entry)
    }

    /// Lock the timesheet for review. Only the owning employee may submit.
    pub async fn submit_timesheet(
        &self,
        timesheet_id: i64,
        employee_id: i64,
    ) -> Result<Timesheet, AppError> {
        let mut tx = self.timesheets.begin().await?;

        let timesheet = self
            .timesheets
            .find_by_id_tx(&mut tx, timesheet_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Timesheet not found with id: {}", timesheet_id))
            })?;

        if timesheet.employee_id != employee_id {
            return Err(AppError::Forbidden(
                "You can only submit your own timesheets".to_string(),
            ));
        }

        if timesheet.status != TimesheetStatus::Draft {
            return Err(AppError::InvalidState(
                "Only draft timesheets can be submitted".to_string(),
            ));
        }

        let timesheet = self.timesheets.mark_submitted(&mut tx, timesheet.id).await?;
        tx.commit().await?;

        log::info!(
            "Timesheet {} submitted by employee {}",
            timesheet.id,
            employee_id
        );

        Ok(timesheet)
    }

    pub async fn approve_timesheet(
        &self,
        timesheet_id: i64,
        manager_id: i64,
    ) -> Result<Timesheet, AppError> {
        let manager = self.employees.find_by_id(manager_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Manager not found with id: {}", manager_id))
        })?;

        let mut tx = self.timesheets.begin().await?;

        let timesheet = self
            .timesheets
            .find_by_id_tx(&mut tx, timesheet_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Timesheet not found with id: {}", timesheet_id))
            })?;

        if timesheet.status != TimesheetStatus::Submitted {
            return Err(AppError::InvalidState(
                "Only submitted timesheets can be approved".to_string(),
            ));
        }

        let timesheet = self
            .timesheets
            .mark_approved(&mut tx, timesheet.id, manager.id)
            .await?;
        tx.commit().await?;

        log::info!(
            "Timesheet {} approved by {} ({})",
            timesheet.id,
            manager.full_name(),
            manager.id
        );

        Ok(timesheet)
    }

    /// Reject with a mandatory comment. The rejecting manager is resolved and
    /// recorded, mirroring approve.
    pub async fn reject_timesheet(
        &self,
        timesheet_id: i64,
        manager_id: i64,
        comment: &str,
    ) -> Result<Timesheet, AppError> {
        if comment.trim().is_empty() {
            return Err(AppError::Validation(
                "Rejection comment must not be blank".to_string(),
            ));
        }

        let manager = self.employees.find_by_id(manager_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Manager not found with id: {}", manager_id))
        })?;

        let mut tx = self.timesheets.begin().await?;

        let timesheet = self
            .timesheets
            .find_by_id_tx(&mut tx, timesheet_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Timesheet not found with id: {}", timesheet_id))
            })?;

        if timesheet.status != TimesheetStatus::Submitted {
            return Err(AppError::InvalidState(
                "Only submitted timesheets can be rejected".to_string(),
            ));
        }

        let timesheet = self
            .timesheets
            .mark_rejected(&mut tx, timesheet.id, manager.id, comment)
            .await?;
        tx.commit().await?;

        log::info!(
            "Timesheet {} rejected by {} ({})",
            timesheet.id,
            manager.full_name(),
            manager.id
        );

        Ok(timesheet)
    }

    pub async fn get_timesheet(&self, timesheet_id: i64) -> Result<TimesheetDetail, AppError> {
        let timesheet = self
            .timesheets
            .find_by_id(timesheet_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Timesheet not found with id: {}", timesheet_id))
            })?;

        let entries = self.timesheets.entries_for_timesheet(timesheet.id).await?;

        Ok(TimesheetDetail { timesheet, entries })
    }

    pub async fn get_employee_timesheets(
        &self,
        employee_id: i64,
    ) -> Result<Vec<Timesheet>, AppError> {
        Ok(self.timesheets.find_by_employee(employee_id).await?)
    }

    /// Submitted timesheets awaiting this manager's decision.
    pub async fn get_pending_approvals(
        &self,
        manager_id: i64,
    ) -> Result<Vec<Timesheet>, AppError> {
        Ok(self.timesheets.find_pending_by_manager(manager_id).await?)
    }
}
