use cosmoselect::config::{CosmologyConfig, MonteCarloConfig, SolverConfig};
use cosmoselect::engines::cosmology::HeritageMapper;
use cosmoselect::engines::monte_carlo::{run_viability_simulation, MonteCarloDriver};
use cosmoselect::types::VerdictKind;

fn driver(trials: usize, seed: u64, parallel: bool) -> MonteCarloDriver {
    let config = MonteCarloConfig {
        trials,
        seed: Some(seed),
        parallel,
        ..Default::default()
    };
    MonteCarloDriver::new(config, &CosmologyConfig::default(), &SolverConfig::default()).unwrap()
}

#[test]
fn test_zero_trials_returns_empty_collections() {
    let (viable, nonviable) = run_viability_simulation(0).unwrap();
    assert!(viable.is_empty());
    assert!(nonviable.is_empty());
}

#[test]
fn test_every_trial_is_classified_once() {
    let run = driver(12, 17, false).run();

    assert_eq!(run.trials.len(), 12);
    assert_eq!(run.viable.len() + run.nonviable.len(), 12);
    for (i, trial) in run.trials.iter().enumerate() {
        assert_eq!(trial.index, i);
    }
}

#[test]
fn test_trials_sample_the_configured_efficiency_range() {
    let mapper = HeritageMapper::default();
    let run = driver(16, 23, false).run();

    for trial in &run.trials {
        assert!(trial.epsilon_gel >= 0.1 && trial.epsilon_gel < 0.9);
        assert_eq!(trial.omega_lambda, mapper.omega_lambda(trial.epsilon_gel));
    }
}

#[test]
fn test_reference_amplitude_forms_no_structure() {
    // D(1) <= 1 once dark energy is present, so 0.8 D never reaches 1.686
    let run = driver(10, 31, false).run();
    let summary = run.summary();

    assert!(run.viable.is_empty());
    assert_eq!(summary.viable, 0);
    assert_eq!(summary.viable_fraction, 0.0);
    assert_eq!(summary.mean_viable_omega_lambda, None);
    assert!(!summary.observed_in_viable_range);
    assert_eq!(summary.verdicts.get(&VerdictKind::NoStructureFormation), Some(&10));
}

#[test]
fn test_parallel_run_matches_sequential() {
    let sequential = driver(10, 77, false).run();
    let parallel = driver(10, 77, true).run();

    assert_eq!(sequential.trials, parallel.trials);
    assert_eq!(sequential.viable, parallel.viable);
    assert_eq!(sequential.nonviable, parallel.nonviable);
}

#[test]
fn test_trial_streams_are_independent_of_run_order() {
    let driver = driver(6, 5, false);
    let run = driver.run();
    assert_eq!(driver.run_trial(4), run.trials[4]);
}

#[test]
fn test_strong_perturbations_can_form_structure() {
    let cosmology = CosmologyConfig {
        z_gel: 0.0,
        f_max: 0.01,
        structure_amplitude: 10.0,
        ..Default::default()
    };
    let config = MonteCarloConfig {
        trials: 4,
        seed: Some(9),
        parallel: false,
        ..Default::default()
    };
    let run = MonteCarloDriver::new(config, &cosmology, &SolverConfig::default())
        .unwrap()
        .run();

    // Omega_Lambda stays below 0.01, so growth is close to matter domination
    assert_eq!(run.viable.len(), 4);
    let summary = run.summary();
    assert_eq!(summary.viable_fraction, 1.0);
    assert!(summary.viable_range.is_some());
}

#[test]
fn test_invalid_range_is_rejected() {
    let config = MonteCarloConfig {
        epsilon_range: [0.9, 0.1],
        ..Default::default()
    };
    assert!(MonteCarloDriver::new(config, &CosmologyConfig::default(), &SolverConfig::default()).is_err());
}

#[test]
fn test_non_finite_cosmology_is_rejected_up_front() {
    let cosmology = CosmologyConfig {
        omega_m0: f64::NAN,
        ..Default::default()
    };
    let result = MonteCarloDriver::new(MonteCarloConfig::default(), &cosmology, &SolverConfig::default());
    assert!(matches!(result, Err(cosmoselect::CosmoselectError::Configuration(_))));
}
