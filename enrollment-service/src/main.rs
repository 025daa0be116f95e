//! # Enrollment Service
//!
//! Cart management, the `EnrollAll`/`Drop` transactional core, and the
//! admin override surface. Owns the write-side of
//! `courses.enrolled` and the `enrollments`/`carts` tables.

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
use clients::CatalogClient;
use repository::{CartRepository, ConfigRepository, CourseRepository, EnrollmentRepository};
use service::{CartService, EnrollmentService, OverrideService};

#[derive(Clone)]
pub struct AppState {
    pub cart_service: Arc<CartService>,
    pub enrollment_service: Arc<EnrollmentService>,
    pub override_service: Arc<OverrideService>,
    pub enrollment_repository: Arc<EnrollmentRepository>,
    pub config: Arc<AppConfig>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env().expect("failed to load configuration");

    init_tracing(&config.service_name, config.is_production());
    info!("starting enrollment service");

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let db_pool = create_pool(&config.database)
        .await
        .expect("failed to create database pool");
    info!("database connection pool created");

    sqlx::migrate!("../db/migrations")
        .run(&db_pool)
        .await
        .expect("failed to run database migrations");

    let cart_repository = CartRepository::new(db_pool.clone());
    let config_repository = ConfigRepository::new(db_pool.clone());
    let course_repository = CourseRepository::new();
    let enrollment_repository = EnrollmentRepository::new(db_pool.clone());
    let catalog_client = CatalogClient::new(config.peers.catalog_base_url.clone());

    let cart_service = Arc::new(CartService::new(
        cart_repository.clone(),
        config_repository.clone(),
        catalog_client,
        config.enrollment.max_cart_size,
    ));
    let enrollment_service = Arc::new(EnrollmentService::new(
        db_pool.clone(),
        enrollment_repository.clone(),
        course_repository.clone(),
        cart_repository,
        config_repository,
        config.enrollment.max_units_per_semester,
    ));
    let override_service = Arc::new(OverrideService::new(
        db_pool,
        enrollment_repository.clone(),
        course_repository,
    ));

    let max_message_bytes = config.max_message_bytes;
    let app_state = AppState {
        cart_service,
        enrollment_service,
        override_service,
        enrollment_repository: Arc::new(enrollment_repository),
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
