use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::ActivityService;

const DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<usize>,
}

/// Recent activity feed for an employee's dashboard
pub async fn recent_activities(
    service: web::Data<ActivityService>,
    path: web::Path<i64>,
    query: web::Query<ActivityQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let activities = service.recent_activities(path.into_inner(), limit).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(activities)))
}

/// Recent activity feed for a manager's dashboard
pub async fn manager_activities(
    service: web::Data<ActivityService>,
    path: web::Path<i64>,
    query: web::Query<ActivityQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let activities = service.manager_activities(path.into_inner(), limit).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(activities)))
}
