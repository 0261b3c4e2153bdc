use actix_cors::Cors;
use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Result;

use timesheet_api::database::{
    init_database,
    repositories::{EmployeeRepository, ProjectRepository, ReportRepository, TimesheetRepository},
};
use timesheet_api::handlers::{activities, reports, timesheets};
use timesheet_api::{ActivityService, Config, ReportService, TimesheetService};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Timesheet API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    println!("🚀 Starting Timesheet API server...");

    // Load configuration
    let config = Config::from_env()?;
    println!(
        "📋 Configuration loaded (environment: {})",
        config.environment
    );

    // Initialize database
    let pool = init_database(&config.database_url).await?;
    println!("✅ Database initialized");

    // Initialize repositories and services
    let employee_repository = EmployeeRepository::new(pool.clone());
    let project_repository = ProjectRepository::new(pool.clone());
    let timesheet_repository = TimesheetRepository::new(pool.clone());
    let report_repository = ReportRepository::new(pool.clone());

    let timesheet_service = TimesheetService::new(
        timesheet_repository.clone(),
        employee_repository.clone(),
        project_repository.clone(),
    );
    let report_service = ReportService::new(report_repository);
    let activity_service = ActivityService::new(timesheet_repository, project_repository);

    let timesheet_service_data = web::Data::new(timesheet_service);
    let report_service_data = web::Data::new(report_service);
    let activity_service_data = web::Data::new(activity_service);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    println!("🌐 Server starting on http://{}", server_address);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(timesheet_service_data.clone())
            .app_data(report_service_data.clone())
            .app_data(activity_service_data.clone())
            .app_data(config_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin("http://localhost:3000")
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec!["Authorization", "Content-Type", "Accept"])
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(hello)
            .service(health)
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/timesheets")
                            .route("", web::post().to(timesheets::create_timesheet))
                            .route(
                                "/pending-approvals",
                                web::get().to(timesheets::get_pending_approvals),
                            )
                            .route(
                                "/employee/{employee_id}",
                                web::get().to(timesheets::get_employee_timesheets),
                            )
                            .route("/{id}", web::get().to(timesheets::get_timesheet))
                            .route("/{id}/entries", web::post().to(timesheets::add_entry))
                            .route("/{id}/submit", web::post().to(timesheets::submit_timesheet))
                            .route(
                                "/{id}/approve",
                                web::post().to(timesheets::approve_timesheet),
                            )
                            .route("/{id}/reject", web::post().to(timesheets::reject_timesheet)),
                    )
                    .service(
                        web::scope("/reports")
                            .route(
                                "/employee/{employee_id}",
                                web::get().to(reports::employee_report),
                            )
                            .route(
                                "/project/{project_id}",
                                web::get().to(reports::project_report),
                            )
                            .route(
                                "/manager/{manager_id}",
                                web::get().to(reports::manager_report),
                            ),
                    )
                    .service(
                        web::scope("/activities")
                            .route(
                                "/recent/{employee_id}",
                                web::get().to(activities::recent_activities),
                            )
                            .route(
                                "/manager/{manager_id}",
                                web::get().to(activities::manager_activities),
                            ),
                    ),
            )
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
