use crate::config::{ConfigSection, CosmologyConfig, MonteCarloConfig, SolverConfig};
use crate::engines::cosmology::{HeritageMapper, UniverseModel, UniverseSettings};
use crate::engines::monte_carlo::summary::MonteCarloSummary;
use crate::error::Result;
use crate::types::{CosmologicalParameters, Verdict, VerdictKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub index: usize,
    pub epsilon_gel: f64,
    pub omega_lambda: f64,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Default)]
pub struct MonteCarloRun {
    pub viable: Vec<f64>,
    pub nonviable: Vec<f64>,
    pub trials: Vec<TrialOutcome>,
}

impl MonteCarloRun {
    pub fn summary(&self) -> MonteCarloSummary {
        MonteCarloSummary::from_trials(&self.trials)
    }
}

/// Independent single-generation sampler: draw a freeze efficiency, map it to
/// Omega_Lambda and classify the resulting universe with the ODE-based criteria.
pub struct MonteCarloDriver {
    config: MonteCarloConfig,
    mapper: HeritageMapper,
    cosmology: CosmologyConfig,
    settings: UniverseSettings,
    seed: u64,
}

impl MonteCarloDriver {
    pub fn new(
        config: MonteCarloConfig,
        cosmology: &CosmologyConfig,
        solver: &SolverConfig,
    ) -> Result<Self> {
        config.validate()?;
        cosmology.validate()?;
        solver.validate()?;

        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        Ok(Self {
            config,
            mapper: HeritageMapper::from_config(cosmology),
            cosmology: cosmology.clone(),
            settings: UniverseSettings::from_config(cosmology, solver),
            seed,
        })
    }

    /// Seed for reproducing this run
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Trial `index` always sees the same random stream, whichever thread runs it.
    pub fn run_trial(&self, index: usize) -> TrialOutcome {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(index as u64);

        let [low, high] = self.config.epsilon_range;
        let epsilon_gel = rng.gen_range(low..high);
        let omega_lambda = self.mapper.omega_lambda(epsilon_gel);

        let verdict = match self.universe(omega_lambda) {
            Ok(universe) => universe.is_viable(self.cosmology.t_max),
            Err(e) => Verdict::rejected(VerdictKind::InvalidParameters, e.to_string()),
        };
        log::debug!(
            "Trial {}: epsilon_gel={:.3} Omega_Lambda={:.3} -> {}",
            index,
            epsilon_gel,
            omega_lambda,
            verdict.reason
        );

        TrialOutcome {
            index,
            epsilon_gel,
            omega_lambda,
            verdict,
        }
    }

    pub fn run(&self) -> MonteCarloRun {
        let n = self.config.trials;
        log::info!("Simulating {} universes (seed {})", n, self.seed);

        let trials: Vec<TrialOutcome> = if self.config.parallel {
            (0..n).into_par_iter().map(|i| self.run_trial(i)).collect()
        } else {
            (0..n).map(|i| self.run_trial(i)).collect()
        };

        let (viable, nonviable): (Vec<&TrialOutcome>, Vec<&TrialOutcome>) =
            trials.iter().partition(|t| t.verdict.viable);
        let run = MonteCarloRun {
            viable: viable.iter().map(|t| t.omega_lambda).collect(),
            nonviable: nonviable.iter().map(|t| t.omega_lambda).collect(),
            trials,
        };

        log::info!("Viable universes: {} / {}", run.viable.len(), n);
        run
    }

    fn universe(&self, omega_lambda: f64) -> Result<UniverseModel> {
        let params = CosmologicalParameters::new(
            omega_lambda,
            self.cosmology.omega_m0,
            self.cosmology.omega_r0,
            self.cosmology.h0,
        )?;
        UniverseModel::with_settings(params, self.settings)
    }
}

/// Run `n` trials with the default cosmology and return (viable, non-viable) Omega_Lambda values.
pub fn run_viability_simulation(n: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    let config = MonteCarloConfig {
        trials: n,
        ..Default::default()
    };
    let driver = MonteCarloDriver::new(config, &CosmologyConfig::default(), &SolverConfig::default())?;
    let run = driver.run();
    Ok((run.viable, run.nonviable))
}
