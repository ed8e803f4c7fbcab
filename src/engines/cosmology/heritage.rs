//! Alpha–chi heritage: how much primordial energy freezes into dark energy.

use crate::config::CosmologyConfig;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Gravitational constant in (km/s)^2 Mpc / M_sun
pub const G_NEWTON: f64 = 4.3009e-9;
/// Hubble constant used to express densities as fractions, in km/s/Mpc
pub const REFERENCE_H0: f64 = 70.0;
pub const DEFAULT_Z_GEL: f64 = 2.5;
/// 1 - pi/6, the maximum frozen volume fraction
pub const DEFAULT_F_MAX: f64 = 0.4764;

/// Critical density `3 H0^2 / (8 pi G)` in M_sun / Mpc^3.
pub fn critical_density(h0: f64) -> f64 {
    3.0 * h0 * h0 / (8.0 * PI * G_NEWTON)
}

/// Present-day dark-energy fraction frozen at redshift `z_gel` with efficiency `epsilon_gel`.
///
/// The critical density at the freeze is taken from matter domination,
/// `rho_c(z) = rho_c0 (1 + z)^3`, and the frozen density stays constant afterwards.
/// No clamp is applied: common inputs give values above one.
pub fn compute_omega_lambda(epsilon_gel: f64, z_gel: f64, f_max: f64) -> f64 {
    let rho_c0 = critical_density(REFERENCE_H0);
    let rho_c_gel = rho_c0 * (1.0 + z_gel).powi(3);

    let f_gel = f_max * epsilon_gel;
    let rho_lambda0 = f_gel * rho_c_gel;

    rho_lambda0 / rho_c0
}

pub fn compute_omega_lambda_batch(epsilon_gel: &[f64], z_gel: f64, f_max: f64) -> Vec<f64> {
    epsilon_gel
        .iter()
        .map(|&eps| compute_omega_lambda(eps, z_gel, f_max))
        .collect()
}

/// Freeze parameters bound together so genomes can be mapped without threading them around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeritageMapper {
    pub z_gel: f64,
    pub f_max: f64,
}

impl Default for HeritageMapper {
    fn default() -> Self {
        Self {
            z_gel: DEFAULT_Z_GEL,
            f_max: DEFAULT_F_MAX,
        }
    }
}

impl HeritageMapper {
    pub fn new(z_gel: f64, f_max: f64) -> Self {
        Self { z_gel, f_max }
    }

    pub fn from_config(config: &CosmologyConfig) -> Self {
        Self::new(config.z_gel, config.f_max)
    }

    pub fn omega_lambda(&self, epsilon_gel: f64) -> f64 {
        compute_omega_lambda(epsilon_gel, self.z_gel, self.f_max)
    }

    pub fn omega_lambda_batch(&self, epsilon_gel: &[f64]) -> Vec<f64> {
        compute_omega_lambda_batch(epsilon_gel, self.z_gel, self.f_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_efficiency_freezes_nothing() {
        assert_eq!(compute_omega_lambda(0.0, DEFAULT_Z_GEL, DEFAULT_F_MAX), 0.0);
    }

    #[test]
    fn test_mapping_reduces_to_closed_form() {
        // rho_c0 cancels, so the mapping reduces to f_max * eps * (1 + z)^3
        let value = compute_omega_lambda(0.5, 1.0, 0.2);
        assert!((value - 0.2 * 0.5 * 8.0).abs() < 1e-12);
    }
}
