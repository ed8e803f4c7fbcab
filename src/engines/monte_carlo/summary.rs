use crate::engines::metrics::{max, mean, min, std_dev};
use crate::engines::monte_carlo::driver::TrialOutcome;
use crate::types::VerdictKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Observed present-day dark-energy density
pub const OBSERVED_OMEGA_LAMBDA: f64 = 0.68;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloSummary {
    pub trials: usize,
    pub viable: usize,
    pub viable_fraction: f64,
    pub mean_viable_omega_lambda: Option<f64>,
    pub std_viable_omega_lambda: Option<f64>,
    pub viable_range: Option<(f64, f64)>,
    pub observed_in_viable_range: bool,
    pub verdicts: BTreeMap<VerdictKind, usize>,
}

impl MonteCarloSummary {
    pub fn from_trials(trials: &[TrialOutcome]) -> Self {
        let viable: Vec<f64> = trials
            .iter()
            .filter(|t| t.verdict.viable)
            .map(|t| t.omega_lambda)
            .collect();

        let mut verdicts = BTreeMap::new();
        for trial in trials {
            *verdicts.entry(trial.verdict.kind).or_insert(0) += 1;
        }

        let viable_range = (!viable.is_empty()).then(|| (min(&viable), max(&viable)));
        let observed_in_viable_range = viable_range
            .map(|(low, high)| OBSERVED_OMEGA_LAMBDA >= low && OBSERVED_OMEGA_LAMBDA <= high)
            .unwrap_or(false);

        Self {
            trials: trials.len(),
            viable: viable.len(),
            viable_fraction: if trials.is_empty() {
                0.0
            } else {
                viable.len() as f64 / trials.len() as f64
            },
            mean_viable_omega_lambda: (!viable.is_empty()).then(|| mean(&viable)),
            std_viable_omega_lambda: (!viable.is_empty()).then(|| std_dev(&viable)),
            viable_range,
            observed_in_viable_range,
            verdicts,
        }
    }
}
