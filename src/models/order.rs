use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{types::Json, FromRow};

/// Payload stored and returned verbatim. Its structure is never validated.
pub type OpaquePayload = Json<serde_json::Value>;

pub const DEFAULT_PAYMENT_STATUS: &str = "pending";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub total_amount: f64,
    #[sqlx(rename = "shipping_info_json")]
    pub shipping_info: OpaquePayload,
    #[sqlx(rename = "products_json")]
    pub products: OpaquePayload,
    pub payment_status: String,
    pub order_date: DateTime<Utc>,
}
