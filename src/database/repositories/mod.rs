pub mod employee;
pub mod project;
pub mod report;
pub mod timesheet;

// Re-export all repositories for easy importing
pub use employee::EmployeeRepository;
pub use project::ProjectRepository;
pub use report::ReportRepository;
pub use timesheet::TimesheetRepository;
