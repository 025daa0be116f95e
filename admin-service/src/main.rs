//! # Admin Service
//!
//! Admin user/course management and system configuration. The sole
//! writer of `users`, `system_config`, and the
//! `UpdateCourse`/`DeleteCourse` paths of `courses`.

use actix_web::{middleware, web, App, HttpServer};
use shared::auth::PasswordHasher;
use shared::{config::AppConfig, database::create_pool, tracing_config::init_tracing};
use std::sync::Arc;
use tracing::info;

mod api;
mod domain;
mod repository;
mod service;

use api::routes::configure_routes;
use repository::{ConfigRepository, CourseRepository, UserRepository};
use service::{ConfigService, CourseService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub course_service: Arc<CourseService>,
    pub config_service: Arc<ConfigService>,
    pub config: Arc<AppConfig>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env().expect("failed to load configuration");

    init_tracing(&config.service_name, config.is_production());
    info!("starting admin service");

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let db_pool = create_pool(&config.database)
        .await
        .expect("failed to create database pool");
    info!("database connection pool created");

    sqlx::migrate!("../db/migrations")
        .run(&db_pool)
        .await
        .expect("failed to run database migrations");

    let user_repository = UserRepository::new(db_pool.clone());
    let course_repository = CourseRepository::new(db_pool.clone());
    let config_repository = ConfigRepository::new();

    let hasher = PasswordHasher::new(config.bcrypt_cost);

    let user_service = Arc::new(UserService::new(user_repository, hasher));
    let course_service = Arc::new(CourseService::new(course_repository));
    let config_service = Arc::new(ConfigService::new(db_pool, config_repository));

    let max_message_bytes = config.max_message_bytes;
    let app_state = AppState {
        user_service,
        course_service,
        config_service,
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
