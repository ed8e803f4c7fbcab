use crate::config::EvolutionConfig;
use crate::engines::cosmology::HeritageMapper;
use crate::engines::evolution::{
    embryo::Embryo,
    operators::{random_genome, subsample},
    progress::{LogProgressCallback, ProgressCallback},
    reproduction::ReproductionEngine,
    statistics::{summarize_generation, EvolutionSummary},
};
use crate::error::Result;
use crate::types::GenerationRecord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How a run ended. Extinction is a valid outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    Completed,
    Extinct { generation: usize },
}

#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    pub history: Vec<GenerationRecord>,
    pub final_population: Vec<Embryo>,
    pub termination: Termination,
}

impl EvolutionOutcome {
    pub fn is_extinct(&self) -> bool {
        matches!(self.termination, Termination::Extinct { .. })
    }

    pub fn summary(&self) -> Option<EvolutionSummary> {
        EvolutionSummary::from_population(&self.final_population)
    }
}

/// Discrete-generation population process. Every viable universe breeds once and
/// is then replaced by its offspring; nothing survives across generations.
pub struct EvolutionDriver {
    config: EvolutionConfig,
    mapper: HeritageMapper,
    engine: ReproductionEngine,
    seed: u64,
    rng: ChaCha8Rng,
    history: Vec<GenerationRecord>,
}

impl EvolutionDriver {
    pub fn new(config: EvolutionConfig, mapper: HeritageMapper) -> Result<Self> {
        config.validate_parameters()?;

        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let engine = ReproductionEngine::from_config(&config);

        Ok(Self {
            config,
            mapper,
            engine,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            history: Vec::new(),
        })
    }

    pub fn with_engine(mut self, engine: ReproductionEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Seed for reproducing this run
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Records of the most recent run
    pub fn history(&self) -> &[GenerationRecord] {
        &self.history
    }

    pub fn initialize_population(&mut self) -> Vec<Embryo> {
        (0..self.config.initial_population)
            .map(|_| {
                let genome = random_genome(
                    self.config.initial_epsilon_range,
                    self.config.initial_f_mort_range,
                    self.config.mutation_rate,
                    &mut self.rng,
                );
                Embryo::from_genome(genome, self.mapper)
            })
            .collect()
    }

    /// Run the evolution process from a random initial population
    pub fn run<C: ProgressCallback>(&mut self, callback: C) -> EvolutionOutcome {
        let population = self.initialize_population();
        self.run_from(population, callback)
    }

    pub fn run_from<C: ProgressCallback>(
        &mut self,
        mut population: Vec<Embryo>,
        mut callback: C,
    ) -> EvolutionOutcome {
        self.history.clear();
        log::info!("Generation 0: {} universes (seed {})", population.len(), self.seed);

        for generation in 1..=self.config.generations {
            callback.on_generation_start(generation);

            let pool = self.breed(generation, &population);
            let pool_size = pool.len();
            population = subsample(pool, self.config.population_cap, &mut self.rng);
            if pool_size > population.len() {
                log::debug!(
                    "Generation {}: capped {} offspring to {}",
                    generation,
                    pool_size,
                    population.len()
                );
            }

            if population.is_empty() {
                callback.on_extinction(generation);
                return EvolutionOutcome {
                    history: self.history.clone(),
                    final_population: population,
                    termination: Termination::Extinct { generation },
                };
            }

            let record = summarize_generation(generation, &population);
            self.history.push(record.clone());
            callback.on_generation_complete(&record);
        }

        EvolutionOutcome {
            history: self.history.clone(),
            final_population: population,
            termination: Termination::Completed,
        }
    }

    /// Offspring of every viable member, in member order.
    fn breed(&self, generation: usize, population: &[Embryo]) -> Vec<Embryo> {
        let broods: Vec<Vec<Embryo>> = if self.config.parallel {
            population
                .par_iter()
                .enumerate()
                .map(|(index, parent)| self.brood(generation, index, parent))
                .collect()
        } else {
            population
                .iter()
                .enumerate()
                .map(|(index, parent)| self.brood(generation, index, parent))
                .collect()
        };
        broods.into_iter().flatten().collect()
    }

    fn brood(&self, generation: usize, index: usize, parent: &Embryo) -> Vec<Embryo> {
        let verdict = parent.is_viable();
        if !verdict.viable {
            log::trace!("Generation {} member {} cannot breed: {}", generation, index, verdict.reason);
            return Vec::new();
        }
        let mut rng = self.member_rng(generation, index);
        self.engine.reproduce(parent, &mut rng)
    }

    /// Independent stream per (generation, member); stream 0 belongs to the driver.
    fn member_rng(&self, generation: usize, index: usize) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(((generation as u64) << 32) | (index as u64 & 0xFFFF_FFFF));
        rng
    }
}

/// Evolve a fresh population with default settings, logging each generation.
pub fn evolutionary_simulation(generations: usize, initial_population: usize) -> Result<EvolutionOutcome> {
    let config = EvolutionConfig {
        generations,
        initial_population,
        ..Default::default()
    };
    let mut driver = EvolutionDriver::new(config, HeritageMapper::default())?;
    Ok(driver.run(LogProgressCallback))
}
