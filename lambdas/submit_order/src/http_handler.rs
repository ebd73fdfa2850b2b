use crate::order_publisher::OrderPublisher;
use lambda_http::http::{Method, StatusCode};
use lambda_http::{Error, IntoResponse, Request};
use serde_json::value::RawValue;
use shared::response::{empty_response, error_response, json_response};

pub(crate) struct HandlerDeps<P: OrderPublisher> {
    pub order_publisher: P,
}

#[tracing::instrument(skip(deps, event), fields(http.request.method = %event.method()))]
pub(crate) async fn function_handler<P: OrderPublisher>(
    deps: &HandlerDeps<P>,
    event: Request,
) -> Result<impl IntoResponse, Error> {
    tracing::info!("Received event: {:?}", event);

    if event.method() == Method::OPTIONS {
        return empty_response(&StatusCode::OK);
    }

    let order: Box<RawValue> = match serde_json::from_slice(event.body()) {
        Ok(order) => order,
        Err(e) => {
            tracing::warn!("Rejecting order with invalid JSON body: {}", e);
            return error_response(
                &StatusCode::BAD_REQUEST,
                &format!("Request body is not valid JSON: {}", e),
            );
        }
    };

    match deps.order_publisher.publish_order(&order).await {
        Ok(receipt) => {
            tracing::info!("Order enqueued with message id {:?}", receipt.message_id);
            json_response(&StatusCode::OK, &receipt)
        }
        Err(e) => {
            tracing::error!("Failed to enqueue order: {}", e);
            error_response(&StatusCode::INTERNAL_SERVER_ERROR, "Failed to submit order")
        }
    }
}
