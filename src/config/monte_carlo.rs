use super::traits::{validate_range, ConfigSection};
use crate::error::CosmoselectError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    pub trials: usize,
    pub epsilon_range: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            trials: 500,
            epsilon_range: [0.1, 0.9],
            seed: None,
            parallel: true,
        }
    }
}

impl ConfigSection for MonteCarloConfig {
    fn section_name() -> &'static str {
        "monte_carlo"
    }

    fn validate(&self) -> Result<(), CosmoselectError> {
        validate_range("epsilon_range", self.epsilon_range)?;
        if self.epsilon_range[0] < 0.0 {
            return Err(CosmoselectError::Configuration(
                "Freeze efficiency cannot be negative".to_string()
            ));
        }
        Ok(())
    }
}
