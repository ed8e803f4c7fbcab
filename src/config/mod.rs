pub mod traits;
pub mod cosmology;
pub mod solver;
pub mod evolution;
pub mod monte_carlo;
pub mod manager;

pub use manager::{AppConfig, ConfigManager};
pub use cosmology::CosmologyConfig;
pub use solver::SolverConfig;
pub use evolution::EvolutionConfig;
pub use monte_carlo::MonteCarloConfig;
pub use traits::ConfigSection;
