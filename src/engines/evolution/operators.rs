use crate::types::HeritageGenome;
use rand::seq::index;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Gaussian mutation: draw around `value` with standard deviation `rate * value`,
/// then clamp into `bounds`.
pub fn mutate_gene<R: Rng + ?Sized>(value: f64, rate: f64, bounds: (f64, f64), rng: &mut R) -> f64 {
    let (low, high) = bounds;
    let mutated = match Normal::new(value, rate * value) {
        Ok(normal) => normal.sample(rng),
        Err(_) => value,
    };
    if mutated.is_nan() {
        return value.clamp(low, high);
    }
    mutated.clamp(low, high)
}

/// Generate a random genome with genes drawn uniformly from the given half-open ranges
pub fn random_genome<R: Rng + ?Sized>(
    epsilon_range: [f64; 2],
    f_mort_range: [f64; 2],
    mutation_rate: f64,
    rng: &mut R,
) -> HeritageGenome {
    HeritageGenome {
        epsilon_gel: rng.gen_range(epsilon_range[0]..epsilon_range[1]),
        f_mort: rng.gen_range(f_mort_range[0]..f_mort_range[1]),
        mutation_rate,
    }
}

/// Uniform subsample of `amount` items without replacement. Returns the pool
/// unchanged when it is already small enough.
pub fn subsample<T, R: Rng + ?Sized>(pool: Vec<T>, amount: usize, rng: &mut R) -> Vec<T> {
    if pool.len() <= amount {
        return pool;
    }
    let mut keep = vec![false; pool.len()];
    for i in index::sample(rng, pool.len(), amount).into_iter() {
        keep[i] = true;
    }
    pool.into_iter()
        .zip(keep)
        .filter_map(|(item, kept)| kept.then_some(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zero_rate_keeps_value() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(mutate_gene(0.4, 0.0, (0.1, 0.5), &mut rng), 0.4);
    }

    #[test]
    fn test_huge_rate_stays_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let gene = mutate_gene(0.4, 50.0, (0.1, 0.5), &mut rng);
            assert!((0.1..=0.5).contains(&gene));
        }
    }

    #[test]
    fn test_subsample_has_no_duplicates() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let picked = subsample((0..1000).collect::<Vec<_>>(), 200, &mut rng);
        assert_eq!(picked.len(), 200);
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 200);
    }

    #[test]
    fn test_subsample_is_unbiased_across_positions() {
        // Every position should be kept about half the time
        let mut counts = vec![0usize; 10];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..4000 {
            for i in subsample((0..10).collect::<Vec<_>>(), 5, &mut rng) {
                counts[i] += 1;
            }
        }
        for count in counts {
            assert!((1700..2300).contains(&count), "count {}", count);
        }
    }
}
