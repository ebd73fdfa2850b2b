use figment::providers::Env;
use figment::Figment;
use serde::{Deserialize, Serialize};
use shared::error::OrderError;

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Config {
    pub table_name: String,
}

impl Config {
    pub fn load() -> Result<Self, OrderError> {
        Self::extract_from(Figment::new().merge(Env::raw().only(&["TABLE_NAME"])))
    }

    fn extract_from(figment: Figment) -> Result<Self, OrderError> {
        let config: Self = figment
            .extract()
            .map_err(|e| OrderError::Configuration(e.to_string()))?;
        if config.table_name.trim().is_empty() {
            return Err(OrderError::Configuration("TABLE_NAME is empty".to_string()));
        }
        Ok(config)
    }
}
