use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shop Service API",
        version = "1.0.0",
        description = "Storefront backend: registration and login, product catalog and order creation.\n\n**Authentication:** `POST /api/orders` requires a JWT Bearer token obtained from `/api/auth/login`."
    ),
    paths(
        // Auth endpoints
        crate::api::auth::register,
        crate::api::auth::login,

        // Catalog
        crate::api::products::list_products,
        crate::api::products::get_product,

        // Orders
        crate::api::orders::create_order,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::LoginResponse,
            crate::services::order_service::CreateOrderRequest,
            crate::models::Product,
            crate::utils::MessageResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "User registration and email/password login."),
        (name = "Products", description = "Read-only product catalog."),
        (name = "Orders", description = "Order creation for the authenticated user."),
        (name = "Health", description = "Health check endpoint for monitoring service status."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/auth/login"))
                        .build()
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/api/auth/register", "/api/auth/login", "/api/products", "/api/products/{id}", "/api/orders", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
        assert!(doc.components.unwrap().security_schemes.contains_key("bearer_auth"));
    }
}
