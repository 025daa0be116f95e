//! # Grade Service
//!
//! Streaming bulk grade ingestion, the publish gate, GPA aggregation, and
//! the prerequisite-satisfaction oracle consumed by `catalog-service`.
//! Owns the `grades` table.

use actix_web::{middleware, web, App, HttpServer};
use shared::{config::AppConfig, database::create_pool, tracing_config::init_tracing};
use std::sync::Arc;
use tracing::info;

mod api;
mod clients;
mod domain;
mod repository;
mod service;

use api::routes::configure_routes;
use clients::{CatalogClient, EnrollmentClient};
use repository::{GradeRepository, UserRepository};
use service::GradeService;

#[derive(Clone)]
pub struct AppState {
    pub grade_service: Arc<GradeService>,
    pub config: Arc<AppConfig>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env().expect("failed to load configuration");

    init_tracing(&config.service_name, config.is_production());
    info!("starting grade service");

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let db_pool = create_pool(&config.database)
        .await
        .expect("failed to create database pool");
    info!("database connection pool created");

    sqlx::migrate!("../db/migrations")
        .run(&db_pool)
        .await
        .expect("failed to run database migrations");

    let grade_repository = GradeRepository::new(db_pool.clone());
    let user_repository = UserRepository::new(db_pool);
    let catalog_client = CatalogClient::new(config.peers.catalog_base_url.clone());
    let enrollment_client = EnrollmentClient::new(config.peers.enrollment_base_url.clone());

    let grade_service = Arc::new(GradeService::new(
        grade_repository,
        user_repository,
        catalog_client,
        enrollment_client,
    ));

    let max_message_bytes = config.max_message_bytes;
    let app_state = AppState {
        grade_service,
        config: Arc::new(config),
    };

    info!(address = %bind_address, "starting HTTP server");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::PayloadConfig::new(max_message_bytes))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
