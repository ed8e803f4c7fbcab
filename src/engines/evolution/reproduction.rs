use crate::config::EvolutionConfig;
use crate::engines::evolution::embryo::Embryo;
use crate::engines::evolution::landscape::FitnessLandscape;
use rand::Rng;
use rand_distr::{Distribution, Poisson};

/// Turns a parent's pinch-off rate into a brood of viable, mutated children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReproductionEngine {
    landscape: FitnessLandscape,
    offspring_scale: f64,
}

impl Default for ReproductionEngine {
    fn default() -> Self {
        Self::new(FitnessLandscape::default(), 100.0)
    }
}

impl ReproductionEngine {
    pub fn new(landscape: FitnessLandscape, offspring_scale: f64) -> Self {
        Self {
            landscape,
            offspring_scale,
        }
    }

    pub fn from_config(config: &EvolutionConfig) -> Self {
        Self::new(
            FitnessLandscape::with_base_rate(config.base_pinch_off_rate),
            config.offspring_scale,
        )
    }

    pub fn landscape(&self) -> &FitnessLandscape {
        &self.landscape
    }

    pub fn pinch_off_rate(&self, parent: &Embryo) -> f64 {
        parent.pinch_off_rate_on(&self.landscape)
    }

    pub fn expected_offspring(&self, parent: &Embryo) -> f64 {
        self.pinch_off_rate(parent) * self.offspring_scale
    }

    /// Poisson draw around the expected brood size; zero when the mean is not positive.
    pub fn offspring_count<R: Rng + ?Sized>(&self, parent: &Embryo, rng: &mut R) -> u64 {
        let mean = self.expected_offspring(parent);
        if !(mean > 0.0 && mean.is_finite()) {
            return 0;
        }
        match Poisson::new(mean) {
            Ok(poisson) => {
                let draw: f64 = poisson.sample(rng);
                draw as u64
            }
            Err(_) => 0,
        }
    }

    /// Children of `parent` that pass their own viability check.
    pub fn reproduce<R: Rng + ?Sized>(&self, parent: &Embryo, rng: &mut R) -> Vec<Embryo> {
        let count = self.offspring_count(parent, rng);
        let mut children = Vec::with_capacity(count.min(1024) as usize);
        for _ in 0..count {
            let child = parent.reproduce(rng);
            let verdict = child.is_viable();
            if verdict.viable {
                children.push(child);
            } else {
                log::trace!("Discarded offspring: {}", verdict.reason);
            }
        }
        children
    }
}
