use figment::providers::Env;
use figment::Figment;
use serde::{Deserialize, Serialize};
use shared::error::OrderError;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Config {
    pub sqs_queue_url: String,
}

impl Config {
    pub fn load() -> Result<Self, OrderError> {
        Self::extract_from(Figment::new().merge(Env::raw().only(&["SQS_QUEUE_URL"])))
    }

    fn extract_from(figment: Figment) -> Result<Self, OrderError> {
        let config: Self = figment
            .extract()
            .map_err(|e| OrderError::Configuration(e.to_string()))?;
        if config.sqs_queue_url.trim().is_empty() {
            return Err(OrderError::Configuration(
                "SQS_QUEUE_URL is empty".to_string(),
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use figment::Figment;
    use shared::error::OrderError;

    #[test]
    fn when_queue_url_is_set_should_load() {
        figment::Jail::expect_with(|jail| {
            jail.set_env(
                "SQS_QUEUE_URL",
                "https://sqs.eu-west-1.amazonaws.com/123456789012/orders",
            );

            let config = Config::load().unwrap();

            assert_eq!(
                config.sqs_queue_url,
                "https://sqs.eu-west-1.amazonaws.com/123456789012/orders"
            );
            Ok(())
        });
    }

    #[test]
    fn when_queue_url_is_blank_should_fail_with_configuration_error() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SQS_QUEUE_URL", "  ");

            let result = Config::load();

            assert!(matches!(result, Err(OrderError::Configuration(_))));
            Ok(())
        });
    }

    #[test]
    fn when_queue_url_is_missing_should_fail_with_configuration_error() {
        let result = Config::extract_from(Figment::new());

        assert!(matches!(result, Err(OrderError::Configuration(_))));
    }
}
