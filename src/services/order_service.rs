use crate::{
    database::Database,
    models::{Order, DEFAULT_PAYMENT_STATUS},
    utils::AppError,
};
use chrono::Utc;
use serde_json::{Map, Value};
use sqlx::types::Json;

pub const ORDER_FAILED: &str = "Error creating order";

/// Order body as sent by the storefront. Fields stay raw JSON until
/// `validate`, so a key holding `null` still counts as present.
#[derive(Debug, Default, utoipa::ToSchema)]
pub struct CreateOrderRequest {
    #[schema(value_type = f64)]
    pub total_amount: Option<Value>,
    #[schema(value_type = Object)]
    pub shipping_info: Option<Value>,
    #[schema(value_type = Vec<Object>)]
    pub products: Option<Value>,
}

/// Only a JSON object decodes into an order request.
impl From<Map<String, Value>> for CreateOrderRequest {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            total_amount: body.remove("total_amount"),
            shipping_info: body.remove("shipping_info"),
            products: body.remove("products"),
        }
    }
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub total_amount: f64,
    pub shipping_info: Value,
    pub products: Value,
}

impl CreateOrderRequest {
    pub fn validate(self) -> Result<NewOrder, AppError> {
        let total_amount = self.total_amount.ok_or_else(|| missing("total_amount"))?;
        let shipping_info = self.shipping_info.ok_or_else(|| missing("shipping_info"))?;
        let products = self.products.ok_or_else(|| missing("products"))?;

        let total_amount = coerce_amount(&total_amount)
            .ok_or_else(|| AppError::Validation("total_amount must be a number".to_string()))?;

        match &products {
            Value::Array(items) if !items.is_empty() => {}
            _ => {
                return Err(AppError::Validation(
                    "Products must be a non-empty list".to_string(),
                ))
            }
        }

        Ok(NewOrder {
            total_amount,
            shipping_info,
            products,
        })
    }
}

fn missing(field: &str) -> AppError {
    AppError::Validation(format!("Missing field: {}", field))
}

/// Accepts JSON numbers and numeric strings. Non-finite values are refused.
fn coerce_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    amount.is_finite().then_some(amount)
}

/// Persists the order in its own transaction. Any store failure rolls the
/// transaction back and surfaces as a generic persistence error.
pub async fn create_order(
    db: &Database,
    user_id: i64,
    request: CreateOrderRequest,
) -> Result<Order, AppError> {
    let order = request.validate()?;

    insert_order(db, user_id, order).await.map_err(|e| {
        log::error!("❌ Error creating order for user {}: {}", user_id, e);
        AppError::Persistence {
            message: ORDER_FAILED.to_string(),
            cause: e.to_string(),
        }
    })
}

async fn insert_order(db: &Database, user_id: i64, order: NewOrder) -> Result<Order, sqlx::Error> {
    let mut tx = db.pool().begin().await?;

    let result = sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO orders (user_id, total_amount, shipping_info_json, products_json, payment_status, order_date)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, user_id, total_amount, shipping_info_json, products_json, payment_status, order_date
        "#,
    )
    .bind(user_id)
    .bind(order.total_amount)
    .bind(Json(&order.shipping_info))
    .bind(Json(&order.products))
    .bind(DEFAULT_PAYMENT_STATUS)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await;

    match result {
        Ok(created) => {
            tx.commit().await?;
            Ok(created)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                log::warn!("⚠️ Rollback failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}
