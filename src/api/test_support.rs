use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, web, App, Error,
};
use chrono::Duration;
use serde_json::{json, Value};

use crate::{
    api::{self, pages::SiteDirs},
    database::Database,
    services::auth_service::TokenManager,
    state::AppState,
};

pub const TEST_SECRET: &str = "test-secret";

pub async fn test_state() -> AppState {
    AppState {
        db: Database::in_memory().await.unwrap(),
        tokens: TokenManager::new(TEST_SECRET, "shop-service", "shop-api", Duration::minutes(15)),
        bcrypt_cost: 4,
    }
}

pub async fn test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let site = SiteDirs {
        templates_dir: std::env::temp_dir().join("shop-test-missing-templates"),
        static_dir: std::env::temp_dir().join("shop-test-missing-static"),
    };
    test_app_with_site(state, site).await
}

pub async fn test_app_with_site(
    state: AppState,
    site: SiteDirs,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::Data::new(site.clone()))
            .configure(|cfg| api::configure(cfg, &site)),
    )
    .await
}

pub async fn json_body<B: MessageBody>(res: ServiceResponse<B>) -> Value {
    let body = test::read_body(res).await;
    serde_json::from_slice(&body).unwrap()
}

pub async fn insert_product(state: &AppState, name: &str, price: f64) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO products (name, description, price, image_url) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(format!("{} description", name))
    .bind(price)
    .bind(format!("/static/img/{}.png", name.to_lowercase()))
    .fetch_one(state.db.pool())
    .await
    .unwrap();
    id
}

/// Registers and logs in through the API. Returns the token subject and the
/// token itself.
pub async fn register_and_login<S, B>(app: &S, username: &str, email: &str) -> (i64, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "username": username, "email": email, "password": "hunter2" }))
        .to_request();
    assert_eq!(test::call_service(app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": "hunter2" }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let token = json_body(res).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let user_id = TokenManager::new(TEST_SECRET, "shop-service", "shop-api", Duration::minutes(15))
        .verify(&token)
        .unwrap()
        .user_id()
        .unwrap();

    (user_id, token)
}
