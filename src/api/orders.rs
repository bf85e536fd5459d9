use actix_web::{web, HttpResponse, ResponseError};
use serde_json::{Map, Value};

use crate::{
    services::{auth_service::Claims, order_service::{self, CreateOrderRequest}},
    state::AppState,
    utils::MessageResponse,
};

/// 🔒 POST /api/orders
/// The acting user comes from the verified bearer token.
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = MessageResponse),
        (status = 400, description = "Invalid order or persistence failure", body = MessageResponse),
        (status = 401, description = "Missing, invalid or expired token", body = MessageResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_order(
    user: web::ReqData<Claims>,
    state: web::Data<AppState>,
    body: web::Json<Map<String, Value>>,
) -> HttpResponse {
    let user_id = match user.user_id() {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };

    log::info!("🛒 POST /orders - user {}", user_id);

    let request = CreateOrderRequest::from(body.into_inner());

    match order_service::create_order(&state.db, user_id, request).await {
        Ok(order) => {
            log::info!(
                "✅ Order {} created for user {} (total: {:.2})",
                order.id,
                user_id,
                order.total_amount
            );
            HttpResponse::Created().json(MessageResponse::new("Order created successfully"))
        }
        Err(e) => {
            log::warn!("❌ Order rejected for user {}: {}", user_id, e);
            e.error_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{json_body, register_and_login, test_app, test_state};
    use crate::models::Order;
    use actix_web::{http::{header, StatusCode}, test};
    use serde_json::json;

    fn order_body() -> serde_json::Value {
        json!({
            "total_amount": 24.5,
            "shipping_info": { "name": "Alice", "address": "1 Main St", "city": "Springfield" },
            "products": [{ "id": 1, "name": "Mug", "price": 9.5, "quantity": 1 }, { "id": 2, "name": "Poster", "price": 15.0 }]
        })
    }

    #[actix_web::test]
    async fn test_order_is_owned_by_token_subject() {
        let state = test_state().await;
        let db = state.db.clone();
        let app = test_app(state).await;
        let (user_id, token) = register_and_login(&app, "alice", "alice@example.com").await;

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .set_json(order_body())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(json_body(res).await, json!({ "message": "Order created successfully" }));

        let (registered_id,): (i64,) = sqlx::query_as("SELECT id FROM users WHERE email = 'alice@example.com'")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(user_id, registered_id);

        let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders")
            .fetch_all(db.pool())
            .await
            .unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].user_id, user_id);
        assert_eq!(orders[0].payment_status, "pending");
        assert_eq!(orders[0].shipping_info.0, order_body()["shipping_info"]);
        assert_eq!(orders[0].products.0, order_body()["products"]);
    }

    #[actix_web::test]
    async fn test_empty_products_rejected() {
        let app = test_app(test_state().await).await;
        let (_, token) = register_and_login(&app, "alice", "alice@example.com").await;

        let mut body = order_body();
        body["products"] = json!([]);

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .set_json(body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await, json!({ "message": "Products must be a non-empty list" }));
    }

    #[actix_web::test]
    async fn test_missing_field_and_body() {
        let app = test_app(test_state().await).await;
        let (_, token) = register_and_login(&app, "alice", "alice@example.com").await;
        let bearer = format!("Bearer {}", token);

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .set_json(json!({ "total_amount": 5, "products": [1] }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await, json!({ "message": "Missing field: shipping_info" }));

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await, json!({ "message": "Missing JSON body" }));

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .insert_header((header::AUTHORIZATION, bearer))
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload("[1, 2, 3]")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await, json!({ "message": "Invalid JSON body" }));
    }

    #[actix_web::test]
    async fn test_body_parsed_without_json_content_type() {
        let app = test_app(test_state().await).await;
        let (_, token) = register_and_login(&app, "alice", "alice@example.com").await;

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload(order_body().to_string())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn test_token_required() {
        let app = test_app(test_state().await).await;

        let req = test::TestRequest::post().uri("/api/orders").set_json(order_body()).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(res).await, json!({ "message": "Missing authorization token" }));

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .insert_header((header::AUTHORIZATION, "Token abc"))
            .set_json(order_body())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .insert_header((header::AUTHORIZATION, "Bearer not.a.jwt"))
            .set_json(order_body())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(res).await, json!({ "message": "Invalid or expired token" }));
    }

    #[actix_web::test]
    async fn test_expired_token_rejected() {
        let state = test_state().await;
        let expired = crate::services::auth_service::TokenManager::new(
            crate::api::test_support::TEST_SECRET,
            "shop-service",
            "shop-api",
            chrono::Duration::hours(-1),
        );
        let app = test_app(state).await;
        let (user_id, _) = register_and_login(&app, "alice", "alice@example.com").await;

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", expired.issue(user_id).unwrap())))
            .set_json(order_body())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_token_for_deleted_user_fails_persistence() {
        let state = test_state().await;
        let token = state.tokens.issue(4242).unwrap();
        let app = test_app(state).await;

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .set_json(order_body())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await, json!({ "message": "Error creating order" }));
    }
}
