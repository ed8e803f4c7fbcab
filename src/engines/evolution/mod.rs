pub mod embryo;
pub mod landscape;
pub mod operators;
pub mod reproduction;
pub mod statistics;
pub mod progress;
pub mod driver;

pub use embryo::Embryo;
pub use landscape::FitnessLandscape;
pub use reproduction::ReproductionEngine;
pub use statistics::EvolutionSummary;
pub use progress::{ChannelProgressCallback, LogProgressCallback, ProgressCallback, ProgressMessage};
pub use driver::{evolutionary_simulation, EvolutionDriver, EvolutionOutcome, Termination};
