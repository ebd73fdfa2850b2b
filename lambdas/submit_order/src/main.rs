use crate::config::Config;
use crate::http_handler::HandlerDeps;
use crate::order_publisher::SqsOrderPublisher;
use http_handler::function_handler;
use lambda_http::{run, service_fn, tracing, Error};

mod config;
mod http_handler;
mod order_publisher;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let config = Config::load()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let order_publisher =
        SqsOrderPublisher::new(aws_sdk_sqs::Client::new(&aws_config), config.sqs_queue_url);
    let deps = HandlerDeps { order_publisher };

    run(service_fn(|event| function_handler(&deps, event))).await
}
