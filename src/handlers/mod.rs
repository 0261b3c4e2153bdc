pub mod activities;
pub mod reports;
pub mod shared;
pub mod timesheets;
