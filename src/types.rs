use crate::error::{CosmoselectError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Present-day density fractions and expansion rate of one universe.
///
/// The model is open: the densities are not required to sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CosmologicalParameters {
    pub omega_lambda0: f64,
    pub omega_m0: f64,
    pub omega_r0: f64,
    /// Hubble constant in km/s/Mpc
    pub h0: f64,
}

impl CosmologicalParameters {
    pub fn new(omega_lambda0: f64, omega_m0: f64, omega_r0: f64, h0: f64) -> Result<Self> {
        let params = Self {
            omega_lambda0,
            omega_m0,
            omega_r0,
            h0,
        };
        params.validate()?;
        Ok(params)
    }

    /// Reference matter/radiation content with the given dark-energy density.
    pub fn with_omega_lambda(omega_lambda0: f64) -> Result<Self> {
        Self::new(omega_lambda0, 0.3, 5e-5, 70.0)
    }

    pub fn validate(&self) -> Result<()> {
        let densities = [
            ("Omega_Lambda0", self.omega_lambda0),
            ("Omega_m0", self.omega_m0),
            ("Omega_r0", self.omega_r0),
        ];
        for (name, value) in densities {
            if !value.is_finite() || value < 0.0 {
                return Err(CosmoselectError::Domain(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        if !self.h0.is_finite() || self.h0 <= 0.0 {
            return Err(CosmoselectError::Domain(format!(
                "H0 must be finite and positive, got {}",
                self.h0
            )));
        }
        Ok(())
    }
}

/// The heritable genotype of an embryo universe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeritageGenome {
    /// Freeze efficiency, in (0, 1)
    pub epsilon_gel: f64,
    /// Fraction of energy converted to dark matter, in (0, 0.5]
    pub f_mort: f64,
    /// Relative standard deviation applied to each gene on reproduction
    pub mutation_rate: f64,
}

impl HeritageGenome {
    pub fn new(epsilon_gel: f64, f_mort: f64, mutation_rate: f64) -> Result<Self> {
        if !(epsilon_gel > 0.0 && epsilon_gel < 1.0) {
            return Err(CosmoselectError::Domain(format!(
                "epsilon_gel must lie in (0, 1), got {}",
                epsilon_gel
            )));
        }
        if !(f_mort > 0.0 && f_mort <= 0.5) {
            return Err(CosmoselectError::Domain(format!(
                "f_mort must lie in (0, 0.5], got {}",
                f_mort
            )));
        }
        if !mutation_rate.is_finite() || mutation_rate < 0.0 {
            return Err(CosmoselectError::Domain(format!(
                "mutation_rate must be finite and non-negative, got {}",
                mutation_rate
            )));
        }
        Ok(Self {
            epsilon_gel,
            f_mort,
            mutation_rate,
        })
    }
}

/// Scale-factor samples produced by one integration call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trajectory {
    /// Cosmic time in Gyr
    pub times: Vec<f64>,
    pub scale_factors: Vec<f64>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn initial_scale_factor(&self) -> Option<f64> {
        self.scale_factors.first().copied()
    }

    pub fn final_scale_factor(&self) -> Option<f64> {
        self.scale_factors.last().copied()
    }

    /// Index of the first sample that is smaller than its predecessor by more than `tolerance`.
    pub fn first_decrease(&self, tolerance: f64) -> Option<usize> {
        self.scale_factors
            .windows(2)
            .position(|w| w[1] - w[0] < -tolerance)
            .map(|i| i + 1)
    }
}

/// Densities derived from a genome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedDensities {
    pub omega_lambda: f64,
    pub omega_dm: f64,
}

impl DerivedDensities {
    pub fn lambda_dm_ratio(&self) -> DensityRatio {
        if self.omega_dm > 0.0 {
            DensityRatio::Finite(self.omega_lambda / self.omega_dm)
        } else {
            DensityRatio::DenominatorZero
        }
    }
}

/// Omega_Lambda / Omega_DM. A non-positive dark-matter density has no finite ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DensityRatio {
    Finite(f64),
    DenominatorZero,
}

impl DensityRatio {
    /// Open-interval membership; a zero denominator behaves as +inf.
    pub fn within(&self, low: f64, high: f64) -> bool {
        match self {
            DensityRatio::Finite(r) => *r > low && *r < high,
            DensityRatio::DenominatorZero => high == f64::INFINITY && low < f64::INFINITY,
        }
    }
}

impl fmt::Display for DensityRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DensityRatio::Finite(r) => write!(f, "{:.2}", r),
            DensityRatio::DenominatorZero => write!(f, "inf"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VerdictKind {
    Viable,
    GlobalCollapse,
    NoStructureFormation,
    LateStructureFormation,
    IntegrationFailure,
    InvalidParameters,
    OmegaLambdaOutOfRange,
    InsufficientDarkMatter,
    LambdaDmImbalance,
}

/// Outcome of a viability predicate: a verdict plus a human-readable reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub viable: bool,
    pub kind: VerdictKind,
    pub reason: String,
}

impl Verdict {
    pub fn viable(reason: String) -> Self {
        Self {
            viable: true,
            kind: VerdictKind::Viable,
            reason,
        }
    }

    pub fn rejected(kind: VerdictKind, reason: String) -> Self {
        Self {
            viable: false,
            kind,
            reason,
        }
    }

    pub fn into_pair(self) -> (bool, String) {
        (self.viable, self.reason)
    }
}

/// Population summary for one generation of the evolutionary run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation: usize,
    pub population: usize,
    pub mean_omega_lambda: f64,
    pub std_omega_lambda: f64,
    pub mean_f_mort: f64,
    pub std_f_mort: f64,
    pub min_omega_lambda: f64,
    pub max_omega_lambda: f64,
    pub mean_omega_dm: f64,
}
