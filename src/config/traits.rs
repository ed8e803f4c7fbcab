use crate::error::CosmoselectError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), CosmoselectError>;
}

/// Rejects empty or reversed half-open ranges.
pub(crate) fn validate_range(name: &str, range: [f64; 2]) -> Result<(), CosmoselectError> {
    let [low, high] = range;
    if !low.is_finite() || !high.is_finite() || low >= high {
        return Err(CosmoselectError::Configuration(format!(
            "{} must be a non-empty range, got [{}, {})",
            name, low, high
        )));
    }
    Ok(())
}
