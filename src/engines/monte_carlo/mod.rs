pub mod driver;
pub mod summary;

pub use driver::{run_viability_simulation, MonteCarloDriver, MonteCarloRun, TrialOutcome};
pub use summary::MonteCarloSummary;
