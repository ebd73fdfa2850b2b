use serde_json::value::RawValue;
use shared::core::EnqueueReceipt;
use shared::error::OrderError;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub(crate) trait OrderPublisher {
    async fn publish_order(&self, order: &RawValue) -> Result<EnqueueReceipt, OrderError>;
}

/// The order is forwarded as the client wrote it.
pub(crate) fn message_body(order: &RawValue) -> String {
    order.get().to_string()
}

pub(crate) struct SqsOrderPublisher {
    pub sqs_client: aws_sdk_sqs::Client,
    pub queue_url: String,
}

impl SqsOrderPublisher {
    pub fn new(sqs_client: aws_sdk_sqs::Client, queue_url: String) -> Self {
        Self {
            sqs_client,
            queue_url,
        }
    }
}

impl OrderPublisher for SqsOrderPublisher {
    #[tracing::instrument("publish order", skip(self, order), fields(
        messaging.message.id = tracing::field::Empty,
        messaging.operation.name = "publish",
        messaging.destination = "aws_sqs",
        messaging.client.id = "submit_order",
    ))]
    async fn publish_order(&self, order: &RawValue) -> Result<EnqueueReceipt, OrderError> {
        let output = self
            .sqs_client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(message_body(order))
            .send()
            .await
            .map_err(|e| {
                OrderError::dependency(
                    "sqs",
                    format!("Error sending message: {:?}", e.into_service_error()),
                )
            })?;

        if let Some(message_id) = output.message_id() {
            tracing::Span::current().record("messaging.message.id", message_id);
        }

        Ok(EnqueueReceipt {
            message_id: output.message_id().map(str::to_string),
            md5_of_message_body: output.md5_of_message_body().map(str::to_string),
            sequence_number: output.sequence_number().map(str::to_string),
        })
    }
}
