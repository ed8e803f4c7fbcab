use super::traits::ConfigSection;
use crate::error::CosmoselectError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosmologyConfig {
    /// Hubble constant in km/s/Mpc
    pub h0: f64,
    pub omega_m0: f64,
    pub omega_r0: f64,
    /// Redshift at which the alpha energy freezes into dark energy
    pub z_gel: f64,
    /// Maximum frozen volume fraction (1 - pi/6)
    pub f_max: f64,
    /// Integration horizon in Gyr
    pub t_max: f64,
    /// Amplitude of primordial fluctuations (sigma_8)
    pub structure_amplitude: f64,
    /// Linear overdensity at which a structure collapses
    pub collapse_threshold: f64,
    pub min_collapse_redshift: f64,
}

impl Default for CosmologyConfig {
    fn default() -> Self {
        Self {
            h0: 70.0,
            omega_m0: 0.3,
            omega_r0: 5e-5,
            z_gel: 2.5,
            f_max: 0.4764,
            t_max: 50.0,
            structure_amplitude: 0.8,
            collapse_threshold: 1.686,
            min_collapse_redshift: 1.0,
        }
    }
}

impl ConfigSection for CosmologyConfig {
    fn section_name() -> &'static str {
        "cosmology"
    }

    fn validate(&self) -> Result<(), CosmoselectError> {
        let fields = [
            ("h0", self.h0),
            ("omega_m0", self.omega_m0),
            ("omega_r0", self.omega_r0),
            ("z_gel", self.z_gel),
            ("f_max", self.f_max),
            ("t_max", self.t_max),
            ("structure_amplitude", self.structure_amplitude),
            ("collapse_threshold", self.collapse_threshold),
            ("min_collapse_redshift", self.min_collapse_redshift),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(CosmoselectError::Configuration(format!(
                    "cosmology.{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if self.h0 <= 0.0 {
            return Err(CosmoselectError::Configuration(
                "H0 must be positive".to_string()
            ));
        }
        if self.omega_m0 < 0.0 || self.omega_r0 < 0.0 {
            return Err(CosmoselectError::Configuration(
                "Matter and radiation densities must be non-negative".to_string()
            ));
        }
        if self.z_gel <= -1.0 {
            return Err(CosmoselectError::Configuration(
                "Freeze redshift must be greater than -1".to_string()
            ));
        }
        if self.f_max < 0.0 {
            return Err(CosmoselectError::Configuration(
                "f_max must be non-negative".to_string()
            ));
        }
        if self.t_max <= 0.0 {
            return Err(CosmoselectError::Configuration(
                "Integration horizon must be positive".to_string()
            ));
        }
        if self.structure_amplitude < 0.0 {
            return Err(CosmoselectError::Configuration(
                "Structure amplitude must be non-negative".to_string()
            ));
        }
        if self.collapse_threshold <= 0.0 {
            return Err(CosmoselectError::Configuration(
                "Collapse threshold must be positive".to_string()
            ));
        }
        Ok(())
    }
}
