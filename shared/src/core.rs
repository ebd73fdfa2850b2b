use crate::error::{OrderError, ValidationError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Debug;
use uuid::Uuid;

#[cfg(any(test, feature = "mocks"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait OrderRepository: Debug {
    async fn save_order(&self, order: &Order) -> Result<(), OrderError>;
}

#[cfg_attr(any(test, feature = "mocks"), automock)]
pub trait IdGenerator {
    fn generate_id(&self) -> String;
}

#[derive(Debug, Default)]
pub struct UuidGenerator;

impl UuidGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// A JSON value kept exactly as the client wrote it, so numbers never lose digits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawJson(Box<RawValue>);

impl RawJson {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self)
    }

    pub fn get(&self) -> &str {
        self.0.get()
    }

    pub fn as_raw(&self) -> &RawValue {
        &self.0
    }
}

impl PartialEq for RawJson {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

/// An order as submitted by a client, before it has been assigned an id.
///
/// `product_id`, `quantity` and `order_date` are stored exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub customer_id: i64,
    pub product_id: RawJson,
    pub quantity: RawJson,
    pub order_date: RawJson,
}

impl OrderRequest {
    pub fn parse(body: &str) -> Result<Self, OrderError> {
        let payload = RawJson::parse(body)?;
        if !payload.get().starts_with('{') {
            return Err(ValidationError::NotAnObject.into());
        }
        let mut fields: HashMap<String, RawJson> = serde_json::from_str(payload.get())?;

        let raw_customer_id = take_field(&mut fields, "customer_id")?;
        let product_id = take_field(&mut fields, "product_id")?;
        let quantity = take_field(&mut fields, "quantity")?;
        let order_date = take_field(&mut fields, "order_date")?;

        let customer_id_value: Value = serde_json::from_str(raw_customer_id.get())?;
        let customer_id = coerce_customer_id(&customer_id_value)
            .ok_or_else(|| ValidationError::InvalidCustomerId(raw_customer_id.get().to_string()))?;

        Ok(Self {
            customer_id,
            product_id,
            quantity,
            order_date,
        })
    }
}

fn take_field(
    fields: &mut HashMap<String, RawJson>,
    name: &'static str,
) -> Result<RawJson, ValidationError> {
    fields
        .remove(name)
        .ok_or(ValidationError::MissingField(name))
}

// Integers pass through, numeric strings are parsed, floats are truncated toward zero.
fn coerce_customer_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Order {
    pub order_id: String,
    pub customer_id: i64,
    pub product_id: RawJson,
    pub quantity: RawJson,
    pub order_date: RawJson,
}

impl Order {
    pub fn new(order_id: String, request: OrderRequest) -> Self {
        Self {
            order_id,
            customer_id: request.customer_id,
            product_id: request.product_id,
            quantity: request.quantity,
            order_date: request.order_date,
        }
    }
}

/// Acknowledgment returned by the queue for an accepted order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EnqueueReceipt {
    #[serde(rename = "MessageId")]
    pub message_id: Option<String>,
    #[serde(rename = "MD5OfMessageBody")]
    pub md5_of_message_body: Option<String>,
    #[serde(
        rename = "SequenceNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sequence_number: Option<String>,
}
