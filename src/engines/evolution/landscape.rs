use crate::types::DerivedDensities;
use serde::{Deserialize, Serialize};

/// Smooth replication landscape peaked at the observed-like optimum.
///
/// The rate decays as `exp(-d)` where `d` is the width-normalised distance of
/// `(Omega_Lambda, Omega_DM)` from the optimum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessLandscape {
    /// Events per Gyr per Gpc^3 at the optimum
    pub base_rate: f64,
    pub optimum_omega_lambda: f64,
    pub optimum_omega_dm: f64,
    pub width_omega_lambda: f64,
    pub width_omega_dm: f64,
}

impl Default for FitnessLandscape {
    fn default() -> Self {
        Self {
            base_rate: 1e-8,
            optimum_omega_lambda: 0.67,
            optimum_omega_dm: 0.24,
            width_omega_lambda: 0.1,
            width_omega_dm: 0.05,
        }
    }
}

impl FitnessLandscape {
    pub fn with_base_rate(base_rate: f64) -> Self {
        Self {
            base_rate,
            ..Default::default()
        }
    }

    pub fn distance(&self, densities: &DerivedDensities) -> f64 {
        let dl = (densities.omega_lambda - self.optimum_omega_lambda) / self.width_omega_lambda;
        let ddm = (densities.omega_dm - self.optimum_omega_dm) / self.width_omega_dm;
        (dl * dl + ddm * ddm).sqrt()
    }

    pub fn rate(&self, densities: &DerivedDensities) -> f64 {
        self.base_rate * (-self.distance(densities)).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_peaks_at_optimum() {
        let landscape = FitnessLandscape::default();
        let optimum = DerivedDensities {
            omega_lambda: 0.67,
            omega_dm: 0.24,
        };
        let away = DerivedDensities {
            omega_lambda: 0.77,
            omega_dm: 0.24,
        };

        assert!((landscape.rate(&optimum) - 1e-8).abs() < 1e-20);
        assert!((landscape.rate(&away) - 1e-8 * (-1.0f64).exp()).abs() < 1e-20);
    }
}
