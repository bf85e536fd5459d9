use actix_web::{web, HttpResponse, ResponseError};

use crate::{
    models::Product,
    services::catalog_service,
    state::AppState,
    utils::MessageResponse,
};

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = Vec<Product>)
    )
)]
pub async fn list_products(state: web::Data<AppState>) -> HttpResponse {
    log::info!("🛍️ GET /products");

    match catalog_service::list_products(&state.db).await {
        Ok(products) => {
            log::debug!("Listed {} products", products.len());
            HttpResponse::Ok().json(products)
        }
        Err(e) => e.error_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found", body = MessageResponse)
    )
)]
pub async fn get_product(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🛍️ GET /products/{}", id);

    match catalog_service::get_product(&state.db, id).await {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(e) => {
            log::warn!("⚠️ Product {}: {}", id, e);
            e.error_response()
        }
    }
}
