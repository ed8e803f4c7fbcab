use crate::engines::evolution::embryo::Embryo;
use crate::engines::metrics::{max, mean, min, std_dev};
use crate::types::GenerationRecord;
use serde::{Deserialize, Serialize};

pub fn summarize_generation(generation: usize, population: &[Embryo]) -> GenerationRecord {
    let densities: Vec<_> = population
        .iter()
        .map(|u| u.compute_cosmological_parameters())
        .collect();
    let omega_lambda: Vec<f64> = densities.iter().map(|d| d.omega_lambda).collect();
    let omega_dm: Vec<f64> = densities.iter().map(|d| d.omega_dm).collect();
    let f_mort: Vec<f64> = population.iter().map(|u| u.f_mort()).collect();

    GenerationRecord {
        generation,
        population: population.len(),
        mean_omega_lambda: mean(&omega_lambda),
        std_omega_lambda: std_dev(&omega_lambda),
        mean_f_mort: mean(&f_mort),
        std_f_mort: std_dev(&f_mort),
        min_omega_lambda: min(&omega_lambda),
        max_omega_lambda: max(&omega_lambda),
        mean_omega_dm: mean(&omega_dm),
    }
}

/// Where the surviving population ended up, next to the observed values
/// (Omega_Lambda = 0.68, Omega_DM = 0.26, ratio ~ 2.62).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionSummary {
    pub population: usize,
    pub mean_omega_lambda: f64,
    pub std_omega_lambda: f64,
    pub mean_omega_dm: f64,
    pub std_omega_dm: f64,
    /// Ratio of the means, not the mean of the ratios
    pub lambda_dm_ratio: Option<f64>,
}

impl EvolutionSummary {
    pub fn from_population(population: &[Embryo]) -> Option<Self> {
        if population.is_empty() {
            return None;
        }
        let (omega_lambda, omega_dm): (Vec<f64>, Vec<f64>) = population
            .iter()
            .map(|u| {
                let d = u.compute_cosmological_parameters();
                (d.omega_lambda, d.omega_dm)
            })
            .unzip();

        let mean_omega_lambda = mean(&omega_lambda);
        let mean_omega_dm = mean(&omega_dm);
        Some(Self {
            population: population.len(),
            mean_omega_lambda,
            std_omega_lambda: std_dev(&omega_lambda),
            mean_omega_dm,
            std_omega_dm: std_dev(&omega_dm),
            lambda_dm_ratio: (mean_omega_dm > 0.0).then(|| mean_omega_lambda / mean_omega_dm),
        })
    }
}
