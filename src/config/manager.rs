use super::{
    cosmology::CosmologyConfig,
    evolution::EvolutionConfig,
    monte_carlo::MonteCarloConfig,
    solver::SolverConfig,
    traits::ConfigSection,
};
use crate::error::CosmoselectError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix for environment overrides, e.g. `COSMOSELECT_EVOLUTION__GENERATIONS=30`.
pub const ENV_PREFIX: &str = "COSMOSELECT";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cosmology: CosmologyConfig,
    pub solver: SolverConfig,
    pub evolution: EvolutionConfig,
    pub monte_carlo: MonteCarloConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), CosmoselectError> {
        self.cosmology.validate()?;
        self.solver.validate()?;
        self.evolution.validate()?;
        self.monte_carlo.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CosmoselectError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CosmoselectError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| CosmoselectError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        self.replace(config);
        Ok(())
    }

    /// Defaults, then the optional file, then `COSMOSELECT_*` environment variables.
    pub fn load_layered<P: AsRef<Path>>(&self, path: Option<P>) -> Result<(), CosmoselectError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        self.replace(config);
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CosmoselectError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| CosmoselectError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| CosmoselectError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        match self.config.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Applies `f` to a copy and stores it only if the result validates.
    pub fn update<F>(&self, f: F) -> Result<(), CosmoselectError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        candidate.validate()?;
        self.replace(candidate);
        Ok(())
    }

    fn replace(&self, config: AppConfig) {
        match self.config.write() {
            Ok(mut guard) => *guard = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }
}
