//! # Catalog Service
//!
//! Read-only course lookups, seat-availability hints, and prerequisite
//! resolution. Owns the `courses` and `prerequisites` tables;
//! the admin service writes to `courses` directly, this service only reads.

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
use clients::GradeClient;
use repository::{CourseRepository, PrerequisiteRepository};
use service::CatalogService;

#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<CatalogService>,
    pub config: Arc<AppConfig>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env().expect("failed to load configuration");

    init_tracing(&config.service_name, config.is_production());
    info!("starting catalog service");

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let db_pool = create_pool(&config.database)
        .await
        .expect("failed to create database pool");
    info!("database connection pool created");

    let course_repository = CourseRepository::new(db_pool.clone());
    let prerequisite_repository = PrerequisiteRepository::new(db_pool);
    let grade_client = GradeClient::new(config.peers.grade_base_url.clone());

    let catalog_service = Arc::new(CatalogService::new(
        course_repository,
        prerequisite_repository,
        grade_client,
    ));

    let app_state = AppState {
        catalog_service,
        config: Arc::new(config),
    };

    info!(address = %bind_address, "starting HTTP server");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
