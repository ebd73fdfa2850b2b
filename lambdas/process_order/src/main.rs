use lambda_runtime::{run, service_fn, tracing, Error};
use shared::adapters::DynamoDbOrderRepository;
use shared::core::UuidGenerator;

use crate::event_handler::{function_handler, HandlerDeps};

mod config;
mod event_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let config = config::Config::load()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&aws_config);

    let order_repo = DynamoDbOrderRepository::new(config.table_name, dynamodb_client);
    let handler_deps = HandlerDeps {
        order_repo,
        id_generator: UuidGenerator::new(),
    };

    run(service_fn(|event| function_handler(&handler_deps, event))).await
}
