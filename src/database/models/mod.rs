pub mod activity;
pub mod employee;
pub mod macros;
pub mod project;
pub mod report;
pub mod timesheet;

// Re-export all models for easy importing
pub use activity::*;
pub use employee::*;
pub use project::*;
pub use report::*;
pub use timesheet::*;
