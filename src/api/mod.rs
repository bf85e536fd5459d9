pub mod auth;
pub mod health;
pub mod orders;
pub mod pages;
pub mod products;
pub mod swagger;

#[cfg(test)]
pub mod test_support;

use actix_files::Files;
use actix_web::web;

use crate::{
    middleware::AuthMiddleware,
    services::{auth_service::MISSING_FIELDS, catalog_service::PRODUCT_NOT_FOUND},
    utils::AppError,
};
use pages::SiteDirs;

/// Registers every route. Expects `web::Data<AppState>` and
/// `web::Data<SiteDirs>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig, site: &SiteDirs) {
    cfg
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Auth endpoints
        .service(
            web::scope("/api/auth")
                .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                    AppError::from_json_payload(&err, MISSING_FIELDS).into()
                }))
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login)),
        )
        // Catalog (READ ONLY)
        .service(
            web::scope("/api/products")
                .app_data(web::PathConfig::default().error_handler(|_err, _req| {
                    AppError::NotFound(PRODUCT_NOT_FOUND.to_string()).into()
                }))
                .route("", web::get().to(products::list_products))
                .route("/{id}", web::get().to(products::get_product)),
        )
        // Orders - requires JWT; body parsed whatever the Content-Type
        .service(
            web::scope("/api/orders")
                .wrap(AuthMiddleware)
                .app_data(
                    web::JsonConfig::default()
                        .content_type_required(false)
                        .error_handler(|err, _req| {
                            AppError::from_json_payload(&err, "Missing JSON body").into()
                        }),
                )
                .route("", web::post().to(orders::create_order)),
        )
        // Storefront pages
        .route("/", web::get().to(pages::home))
        .route("/store", web::get().to(pages::store))
        .route("/buy", web::get().to(pages::buy))
        .service(Files::new("/static", &site.static_dir));
}
