use aws_lambda_events::{
    event::sqs::SqsEvent,
    sqs::{BatchItemFailure, SqsBatchResponse, SqsMessage},
};
use lambda_runtime::{Error, LambdaEvent};
use shared::core::{IdGenerator, Order, OrderRepository, OrderRequest};
use shared::error::OrderError;

pub(crate) struct HandlerDeps<R: OrderRepository, I: IdGenerator> {
    pub order_repo: R,
    pub id_generator: I,
}

/// Stores every order in the batch and reports the messages worth redelivering.
#[tracing::instrument(skip(deps, event), fields(messaging.batch.message_count = event.payload.records.len()))]
pub(crate) async fn function_handler<R: OrderRepository, I: IdGenerator>(
    deps: &HandlerDeps<R, I>,
    event: LambdaEvent<SqsEvent>,
) -> Result<SqsBatchResponse, Error> {
    let records = event.payload.records;
    let tasks: Vec<_> = records
        .iter()
        .map(|message| process_message(&deps.order_repo, &deps.id_generator, message))
        .collect();
    let results = futures::future::join_all(tasks).await; // Run tasks concurrently

    let mut sqs_batch_response = SqsBatchResponse::default();
    for (result, message) in results.into_iter().zip(records.iter()) {
        match result {
            Ok(()) => {}
            Err(e) if e.is_retryable() => {
                tracing::error!("Failed to store order from message {:?}: {}", message.message_id, e);
                let mut failure_item = BatchItemFailure::default();
                failure_item.item_identifier = message.message_id.clone().unwrap_or_default();
                sqs_batch_response.batch_item_failures.push(failure_item);
            }
            Err(e) => {
                // redelivering a malformed order can never succeed
                tracing::error!("Discarding message {:?}: {}", message.message_id, e);
            }
        }
    }

    Ok(sqs_batch_response)
}

#[tracing::instrument("process order", skip(order_repo, id_generator, message), fields(
    messaging.message.id = ?message.message_id,
    messaging.operation.name = "process",
    messaging.destination = "aws_sqs",
    messaging.client.id = "process_order",
))]
async fn process_message<R: OrderRepository, I: IdGenerator>(
    order_repo: &R,
    id_generator: &I,
    message: &SqsMessage,
) -> Result<(), OrderError> {
    let Some(body) = message.body.as_deref() else {
        tracing::warn!(
            "Discarding empty SQS message body for message {:?}",
            message.message_id
        );
        return Ok(());
    };

    let request = OrderRequest::parse(body)?;
    let order = Order::new(id_generator.generate_id(), request);
    tracing::debug!("Storing order {:?}", order);

    order_repo.save_order(&order).await?;
    tracing::info!(
        "Stored order {} for customer {}",
        order.order_id,
        order.customer_id
    );
    Ok(())
}
