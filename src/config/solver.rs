use super::traits::ConfigSection;
use crate::error::CosmoselectError;
use serde::{Deserialize, Serialize};

/// Numerical settings shared by every universe evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Scale factor at t = 0
    pub seed_scale_factor: f64,
    pub rtol: f64,
    pub atol: f64,
    pub trajectory_samples: usize,
    pub growth_samples: usize,
    /// Upper bound on attempted integrator steps per trajectory
    pub max_steps: usize,
    pub quadrature_tolerance: f64,
    pub max_subdivisions: usize,
    /// Lower bound of the growth-factor integral
    pub growth_lower_limit: f64,
    pub monotonic_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed_scale_factor: 1e-6,
            rtol: 1e-8,
            atol: 1e-12,
            trajectory_samples: 1000,
            growth_samples: 200,
            max_steps: 200_000,
            quadrature_tolerance: 1.49e-8,
            max_subdivisions: 50,
            growth_lower_limit: 0.0,
            monotonic_tolerance: 1e-10,
        }
    }
}

impl ConfigSection for SolverConfig {
    fn section_name() -> &'static str {
        "solver"
    }

    fn validate(&self) -> Result<(), CosmoselectError> {
        if !(self.seed_scale_factor > 0.0 && self.seed_scale_factor < 1.0) {
            return Err(CosmoselectError::Configuration(
                "Seed scale factor must lie in (0, 1)".to_string()
            ));
        }
        if !(self.rtol > 0.0) || !(self.atol > 0.0) || !(self.quadrature_tolerance > 0.0) {
            return Err(CosmoselectError::Configuration(
                "Tolerances must be positive".to_string()
            ));
        }
        if self.trajectory_samples < 2 || self.growth_samples < 2 {
            return Err(CosmoselectError::Configuration(
                "At least two samples are required".to_string()
            ));
        }
        if self.max_steps == 0 || self.max_subdivisions == 0 {
            return Err(CosmoselectError::Configuration(
                "Iteration bounds must be positive".to_string()
            ));
        }
        if !(self.rtol.is_finite() && self.atol.is_finite() && self.quadrature_tolerance.is_finite()) {
            return Err(CosmoselectError::Configuration(
                "Tolerances must be finite".to_string()
            ));
        }
        if !(self.growth_lower_limit >= 0.0 && self.growth_lower_limit <= self.seed_scale_factor) {
            return Err(CosmoselectError::Configuration(
                "Growth lower limit must lie in [0, seed scale factor]".to_string()
            ));
        }
        if !(self.monotonic_tolerance >= 0.0 && self.monotonic_tolerance.is_finite()) {
            return Err(CosmoselectError::Configuration(
                "Monotonic tolerance must be non-negative".to_string()
            ));
        }
        Ok(())
    }
}
