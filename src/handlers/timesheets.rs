use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::database::models::{CreateEntryInput, CreateTimesheetInput};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::TimesheetService;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub employee_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ApprovalRequest {
    pub manager_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct RejectionRequest {
    pub manager_id: i64,
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct PendingApprovalsQuery {
    pub manager_id: i64,
}

/// Create a draft timesheet for an employee's week
pub async fn create_timesheet(
    service: web::Data<TimesheetService>,
    input: web::Json<CreateTimesheetInput>,
) -> Result<HttpResponse, AppError> {
    let timesheet = service.create_timesheet(input.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(timesheet)))
}

/// Add an entry to a draft timesheet
pub async fn add_entry(
    service: web::Data<TimesheetService>,
    path: web::Path<i64>,
    input: web::Json<CreateEntryInput>,
) -> Result<HttpResponse, AppError> {
    let entry = service
        .add_entry(path.into_inner(), input.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(entry)))
}

/// Submit a draft timesheet for approval
pub async fn submit_timesheet(
    service: web::Data<TimesheetService>,
    path: web::Path<i64>,
    input: web::Json<SubmitRequest>,
) -> Result<HttpResponse, AppError> {
    let timesheet = service
        .submit_timesheet(path.into_inner(), input.employee_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        Some(timesheet),
        "Timesheet submitted",
    )))
}

/// Approve a submitted timesheet
pub async fn approve_timesheet(
    service: web::Data<TimesheetService>,
    path: web::Path<i64>,
    input: web::Json<ApprovalRequest>,
) -> Result<HttpResponse, AppError> {
    let timesheet = service
        .approve_timesheet(path.into_inner(), input.manager_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        Some(timesheet),
        "Timesheet approved",
    )))
}

/// Reject a submitted timesheet with a comment
pub async fn reject_timesheet(
    service: web::Data<TimesheetService>,
    path: web::Path<i64>,
    input: web::Json<RejectionRequest>,
) -> Result<HttpResponse, AppError> {
    let timesheet = service
        .reject_timesheet(path.into_inner(), input.manager_id, &input.comment)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        Some(timesheet),
        "Timesheet rejected",
    )))
}

/// Get a timesheet with its entries
pub async fn get_timesheet(
    service: web::Data<TimesheetService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let detail = service.get_timesheet(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(detail)))
}

/// List an employee's timesheets, newest week first
pub async fn get_employee_timesheets(
    service: web::Data<TimesheetService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let timesheets = service.get_employee_timesheets(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(timesheets)))
}

/// List submitted timesheets awaiting the manager's decision
pub async fn get_pending_approvals(
    service: web::Data<TimesheetService>,
    query: web::Query<PendingApprovalsQuery>,
) -> Result<HttpResponse, AppError> {
    let timesheets = service.get_pending_approvals(query.manager_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(timesheets)))
}
