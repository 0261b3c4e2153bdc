use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::ReportService;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Aggregated hours for one employee over a date range
pub async fn employee_report(
    service: web::Data<ReportService>,
    path: web::Path<i64>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let report = service
        .employee_report(path.into_inner(), query.start_date, query.end_date)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(report)))
}

/// Aggregated hours for one project over a date range
pub async fn project_report(
    service: web::Data<ReportService>,
    path: web::Path<i64>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let report = service
        .project_report(path.into_inner(), query.start_date, query.end_date)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(report)))
}

/// Aggregated hours across the manager's subordinate tree
pub async fn manager_report(
    service: web::Data<ReportService>,
    path: web::Path<i64>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let report = service
        .manager_report(path.into_inner(), query.start_date, query.end_date)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(report)))
}
