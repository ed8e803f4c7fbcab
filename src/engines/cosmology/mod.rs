pub mod heritage;
pub mod universe;

pub use heritage::{compute_omega_lambda, compute_omega_lambda_batch, HeritageMapper};
pub use universe::{UniverseModel, UniverseSettings};
