mod api;
mod config;
mod database;
mod middleware;
mod models;
mod seeds;
mod services;
mod state;
mod utils;

use actix_cors::Cors;
use actix_web::{
    http::header,
    middleware::{DefaultHeaders, Logger},
    web, App, HttpServer,
};
use dotenv::dotenv;
use std::path::PathBuf;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{api::pages::SiteDirs, config::AppConfig, state::AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("❌ {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!("🚀 Starting Shop Service...");
    log::info!("📊 Database: {}", config.database_url);

    let db = database::Database::new(&config.database_url)
        .await
        .map_err(|e| {
            log::error!("❌ Failed to open database: {}", e);
            std::io::Error::other(e.to_string())
        })?;

    log::info!("✅ Database connected successfully");

    if config.seed_products {
        seeds::products_seed::seed_default_products(&db).await;
    }

    let state = web::Data::new(AppState::new(&config, db));
    let site = SiteDirs {
        templates_dir: PathBuf::from(&config.templates_dir),
        static_dir: PathBuf::from(&config.static_dir),
    };
    let site_data = web::Data::new(site.clone());
    let cors_origins = config.cors_allowed_origins.clone();

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));
        let cors = (if cors_origins.is_empty() { cors.allow_any_origin() } else { cors })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .max_age(3600);

        let security_headers = DefaultHeaders::new()
            .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
            .add((header::X_FRAME_OPTIONS, "DENY"))
            .add((header::REFERRER_POLICY, "strict-origin-when-cross-origin"));

        App::new()
            .app_data(state.clone())
            .app_data(site_data.clone())
            .wrap(cors)
            .wrap(security_headers)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::swagger::ApiDoc::openapi()),
            )
            .configure(|cfg| api::configure(cfg, &site))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
