use crate::{
    core::{Order, OrderRepository},
    error::OrderError,
};
use async_trait::async_trait;
use aws_sdk_dynamodb::{types::AttributeValue, Client};
use serde_json::value::RawValue;
use std::collections::HashMap;

#[derive(Debug)]
pub struct DynamoDbOrderRepository {
    table_name: String,
    dynamodb_client: Client,
}

impl DynamoDbOrderRepository {
    pub fn new(table_name: String, dynamodb_client: Client) -> Self {
        Self {
            table_name,
            dynamodb_client,
        }
    }
}

#[async_trait]
impl OrderRepository for DynamoDbOrderRepository {
    #[tracing::instrument("store order", skip(self, order), fields(
        db.system = "dynamodb",
        db.operation.name = "PutItem",
        db.collection.name = %self.table_name,
        order.id = %order.order_id,
    ))]
    async fn save_order(&self, order: &Order) -> Result<(), OrderError> {
        let item = HashMap::<String, AttributeValue>::try_from(order)?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| {
                OrderError::dependency(
                    "dynamodb",
                    format!("Error adding order {}: {:?}", order.order_id, e.into_service_error()),
                )
            })
    }
}

impl TryFrom<&Order> for HashMap<String, AttributeValue> {
    type Error = serde_json::Error;

    fn try_from(order: &Order) -> Result<Self, Self::Error> {
        Ok(HashMap::from([
            (
                "customer_id".to_string(),
                AttributeValue::N(order.customer_id.to_string()),
            ),
            (
                "order_id".to_string(),
                AttributeValue::S(order.order_id.clone()),
            ),
            (
                "product_id".to_string(),
                to_attribute(order.product_id.as_raw())?,
            ),
            ("quantity".to_string(), to_attribute(order.quantity.as_raw())?),
            (
                "order_date".to_string(),
                to_attribute(order.order_date.as_raw())?,
            ),
        ]))
    }
}

// Numbers are copied as written so DynamoDB receives every digit.
fn to_attribute(raw: &RawValue) -> Result<AttributeValue, serde_json::Error> {
    let text = raw.get();
    let attribute = match text.as_bytes().first() {
        Some(b'{') => {
            let fields: HashMap<String, Box<RawValue>> = serde_json::from_str(text)?;
            AttributeValue::M(
                fields
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), to_attribute(v)?)))
                    .collect::<Result<_, serde_json::Error>>()?,
            )
        }
        Some(b'[') => {
            let items: Vec<Box<RawValue>> = serde_json::from_str(text)?;
            AttributeValue::L(
                items
                    .iter()
                    .map(|v| to_attribute(v))
                    .collect::<Result<_, _>>()?,
            )
        }
        Some(b'"') => AttributeValue::S(serde_json::from_str(text)?),
        Some(b't') | Some(b'f') => AttributeValue::Bool(serde_json::from_str(text)?),
        Some(b'n') => AttributeValue::Null(true),
        _ => AttributeValue::N(text.to_string()),
    };
    Ok(attribute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawJson;

    fn raw(text: &str) -> RawJson {
        RawJson::parse(text).unwrap()
    }

    fn order(quantity: &str) -> Order {
        Order {
            order_id: "b1f7c9e2-0000-4000-8000-000000000001".to_string(),
            customer_id: 42,
            product_id: raw(r#""p1""#),
            quantity: raw(quantity),
            order_date: raw(r#""2024-01-01""#),
        }
    }

    #[test]
    fn order_maps_to_item_with_typed_attributes() {
        let item = HashMap::<String, AttributeValue>::try_from(&order("3")).unwrap();

        assert_eq!(item.len(), 5);
        assert_eq!(item["customer_id"], AttributeValue::N("42".to_string()));
        assert_eq!(
            item["order_id"],
            AttributeValue::S("b1f7c9e2-0000-4000-8000-000000000001".to_string())
        );
        assert_eq!(item["product_id"], AttributeValue::S("p1".to_string()));
        assert_eq!(item["quantity"], AttributeValue::N("3".to_string()));
        assert_eq!(item["order_date"], AttributeValue::S("2024-01-01".to_string()));
    }

    #[test]
    fn large_quantity_is_stored_with_the_same_digits() {
        let item =
            HashMap::<String, AttributeValue>::try_from(&order("12345678901234567890123")).unwrap();

        assert_eq!(
            item["quantity"],
            AttributeValue::N("12345678901234567890123".to_string())
        );
    }

    #[test]
    fn nested_values_map_structurally() {
        let value = raw(r#"{"sku": "p\"1", "tags": [true, null, 2.50, false]}"#);

        let attribute = to_attribute(value.as_raw()).unwrap();

        assert_eq!(
            attribute,
            AttributeValue::M(HashMap::from([
                ("sku".to_string(), AttributeValue::S("p\"1".to_string())),
                (
                    "tags".to_string(),
                    AttributeValue::L(vec![
                        AttributeValue::Bool(true),
                        AttributeValue::Null(true),
                        AttributeValue::N("2.50".to_string()),
                        AttributeValue::Bool(false),
                    ])
                ),
            ]))
        );
    }
}
