use crate::engines::cosmology::HeritageMapper;
use crate::engines::evolution::landscape::FitnessLandscape;
use crate::engines::evolution::operators::mutate_gene;
use crate::error::Result;
use crate::types::{DerivedDensities, HeritageGenome, Verdict, VerdictKind};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Open interval of dark-energy densities compatible with complex structure
pub const OMEGA_LAMBDA_RANGE: (f64, f64) = (0.25, 0.85);
pub const MIN_OMEGA_DM: f64 = 0.20;
/// Open interval for Omega_Lambda / Omega_DM
pub const LAMBDA_DM_RATIO_RANGE: (f64, f64) = (1.5, 4.0);

pub const EPSILON_GEL_BOUNDS: (f64, f64) = (0.1, 0.9);
pub const F_MORT_BOUNDS: (f64, f64) = (0.1, 0.5);

/// A universe able to replicate. Its densities are always recomputed from the genome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Embryo {
    genome: HeritageGenome,
    mapper: HeritageMapper,
}

impl Embryo {
    pub fn new(epsilon_gel: f64, f_mort: f64, mutation_rate: f64) -> Result<Self> {
        Ok(Self::from_genome(
            HeritageGenome::new(epsilon_gel, f_mort, mutation_rate)?,
            HeritageMapper::default(),
        ))
    }

    pub fn from_genome(genome: HeritageGenome, mapper: HeritageMapper) -> Self {
        Self { genome, mapper }
    }

    pub fn genome(&self) -> &HeritageGenome {
        &self.genome
    }

    pub fn mapper(&self) -> &HeritageMapper {
        &self.mapper
    }

    pub fn epsilon_gel(&self) -> f64 {
        self.genome.epsilon_gel
    }

    pub fn f_mort(&self) -> f64 {
        self.genome.f_mort
    }

    pub fn mutation_rate(&self) -> f64 {
        self.genome.mutation_rate
    }

    /// Omega_Lambda from the freeze mapping and `Omega_DM = f_mort (1 - Omega_Lambda)`.
    pub fn compute_cosmological_parameters(&self) -> DerivedDensities {
        let omega_lambda = self.mapper.omega_lambda(self.genome.epsilon_gel);
        DerivedDensities {
            omega_lambda,
            omega_dm: self.genome.f_mort * (1.0 - omega_lambda),
        }
    }

    /// Dark energy in range, enough dark matter, and a balanced Lambda/DM ratio.
    pub fn is_viable(&self) -> Verdict {
        let densities = self.compute_cosmological_parameters();
        let DerivedDensities {
            omega_lambda,
            omega_dm,
        } = densities;

        let (low, high) = OMEGA_LAMBDA_RANGE;
        if !(omega_lambda > low && omega_lambda < high) {
            return Verdict::rejected(
                VerdictKind::OmegaLambdaOutOfRange,
                format!("Omega_Lambda out of range ({:.2})", omega_lambda),
            );
        }

        if !(omega_dm >= MIN_OMEGA_DM) {
            return Verdict::rejected(
                VerdictKind::InsufficientDarkMatter,
                format!("insufficient dark matter (Omega_DM={:.2})", omega_dm),
            );
        }

        let ratio = densities.lambda_dm_ratio();
        let (low, high) = LAMBDA_DM_RATIO_RANGE;
        if !ratio.within(low, high) {
            return Verdict::rejected(
                VerdictKind::LambdaDmImbalance,
                format!("Lambda/DM imbalance (ratio={})", ratio),
            );
        }

        Verdict::viable(format!(
            "Viable (Omega_Lambda={:.2}, Omega_DM={:.2})",
            omega_lambda, omega_dm
        ))
    }

    /// Replication rate on the reference fitness landscape (base rate 1e-8).
    /// Runs with a configured base rate breed through `pinch_off_rate_on`.
    pub fn pinch_off_rate(&self) -> f64 {
        self.pinch_off_rate_on(&FitnessLandscape::default())
    }

    pub fn pinch_off_rate_on(&self, landscape: &FitnessLandscape) -> f64 {
        landscape.rate(&self.compute_cosmological_parameters())
    }

    /// One mutated child. Each gene is drawn around the parent's value with a relative
    /// spread of `mutation_rate`, then clamped into its heritable bounds.
    pub fn reproduce<R: Rng + ?Sized>(&self, rng: &mut R) -> Embryo {
        let rate = self.genome.mutation_rate;
        let genome = HeritageGenome {
            epsilon_gel: mutate_gene(self.genome.epsilon_gel, rate, EPSILON_GEL_BOUNDS, rng),
            f_mort: mutate_gene(self.genome.f_mort, rate, F_MORT_BOUNDS, rng),
            mutation_rate: rate,
        };
        Self::from_genome(genome, self.mapper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DensityRatio;

    fn unit_mapper() -> HeritageMapper {
        // (1 + 0)^3 * 1.0 * eps = eps
        HeritageMapper::new(0.0, 1.0)
    }

    #[test]
    fn test_densities_follow_genome() {
        let genome = HeritageGenome::new(0.6, 0.5, 0.05).unwrap();
        let densities = Embryo::from_genome(genome, unit_mapper()).compute_cosmological_parameters();

        assert!((densities.omega_lambda - 0.6).abs() < 1e-12);
        assert!((densities.omega_dm - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_balanced_universe_is_viable() {
        let genome = HeritageGenome::new(0.55, 0.5, 0.05).unwrap();
        let verdict = Embryo::from_genome(genome, unit_mapper()).is_viable();
        assert!(verdict.viable, "{}", verdict.reason);
    }

    #[test]
    fn test_reference_mapping_overshoots_dark_energy() {
        let embryo = Embryo::new(0.6, 0.27, 0.05).unwrap();
        let verdict = embryo.is_viable();
        assert!(!verdict.viable);
        assert_eq!(verdict.kind, VerdictKind::OmegaLambdaOutOfRange);
    }

    #[test]
    fn test_dark_matter_shortfall() {
        let embryo = Embryo::from_genome(HeritageGenome::new(0.6, 0.2, 0.05).unwrap(), unit_mapper());
        assert_eq!(embryo.is_viable().kind, VerdictKind::InsufficientDarkMatter);
    }

    #[test]
    fn test_ratio_imbalance() {
        // Omega_L = 0.3, Omega_DM = 0.5 * 0.7 = 0.35, ratio ~ 0.86
        let embryo = Embryo::from_genome(HeritageGenome::new(0.3, 0.5, 0.05).unwrap(), unit_mapper());
        assert_eq!(embryo.is_viable().kind, VerdictKind::LambdaDmImbalance);
    }

    #[test]
    fn test_zero_dark_matter_has_no_finite_ratio() {
        let densities = DerivedDensities {
            omega_lambda: 0.7,
            omega_dm: 0.0,
        };
        assert_eq!(densities.lambda_dm_ratio(), DensityRatio::DenominatorZero);
        assert!(!densities.lambda_dm_ratio().within(1.5, 4.0));
    }

    #[test]
    fn test_genome_domain_is_enforced() {
        assert!(Embryo::new(0.0, 0.2, 0.05).is_err());
        assert!(Embryo::new(0.5, 0.6, 0.05).is_err());
        assert!(Embryo::new(0.5, 0.2, -0.1).is_err());
        assert!(Embryo::new(0.5, 0.5, 0.0).is_ok());
    }
}
