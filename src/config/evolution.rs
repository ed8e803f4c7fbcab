use super::traits::{validate_range, ConfigSection};
use crate::error::CosmoselectError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub generations: usize,
    pub initial_population: usize,
    /// Resource bound on the number of universes carried into the next generation
    pub population_cap: usize,
    pub mutation_rate: f64,
    pub initial_epsilon_range: [f64; 2],
    pub initial_f_mort_range: [f64; 2],
    /// Pinch-off events per Gyr per Gpc^3 at the fitness optimum
    pub base_pinch_off_rate: f64,
    /// Multiplier turning a pinch-off rate into an expected offspring count
    pub offspring_scale: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            generations: 15,
            initial_population: 100,
            population_cap: 200,
            mutation_rate: 0.05,
            initial_epsilon_range: [0.3, 0.8],
            initial_f_mort_range: [0.15, 0.35],
            base_pinch_off_rate: 1e-8,
            offspring_scale: 100.0,
            seed: None,
            parallel: false,
        }
    }
}

impl EvolutionConfig {
    /// Checks everything the driver needs to run. An empty initial population is
    /// allowed here: it is a valid (immediately extinct) run.
    pub(crate) fn validate_parameters(&self) -> Result<(), CosmoselectError> {
        if self.population_cap == 0 {
            return Err(CosmoselectError::Configuration(
                "Population cap must be at least 1".to_string()
            ));
        }
        if !self.mutation_rate.is_finite() || self.mutation_rate < 0.0 {
            return Err(CosmoselectError::Configuration(
                "Mutation rate must be non-negative".to_string()
            ));
        }
        validate_range("initial_epsilon_range", self.initial_epsilon_range)?;
        validate_range("initial_f_mort_range", self.initial_f_mort_range)?;
        let [eps_low, eps_high] = self.initial_epsilon_range;
        if eps_low <= 0.0 || eps_high > 1.0 {
            return Err(CosmoselectError::Configuration(
                "Initial epsilon range must lie within (0, 1)".to_string()
            ));
        }
        let [f_low, f_high] = self.initial_f_mort_range;
        if f_low <= 0.0 || f_high > 0.5 {
            return Err(CosmoselectError::Configuration(
                "Initial f_mort range must lie within (0, 0.5]".to_string()
            ));
        }
        if !self.base_pinch_off_rate.is_finite() || self.base_pinch_off_rate < 0.0 {
            return Err(CosmoselectError::Configuration(
                "Base pinch-off rate must be non-negative".to_string()
            ));
        }
        if !self.offspring_scale.is_finite() || self.offspring_scale < 0.0 {
            return Err(CosmoselectError::Configuration(
                "Offspring scale must be non-negative".to_string()
            ));
        }
        Ok(())
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), CosmoselectError> {
        if self.initial_population == 0 && self.generations > 0 {
            return Err(CosmoselectError::Configuration(
                "Initial population must be at least 1 when generations are requested".to_string()
            ));
        }
        self.validate_parameters()
    }
}
