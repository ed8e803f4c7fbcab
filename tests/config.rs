use cosmoselect::config::{
    AppConfig, ConfigManager, ConfigSection, CosmologyConfig, EvolutionConfig, MonteCarloConfig,
    SolverConfig,
};
use cosmoselect::CosmoselectError;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cosmoselect_{}_{}.toml", name, std::process::id()))
}

#[test]
fn test_defaults_are_valid() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.evolution.population_cap, 200);
    assert_eq!(config.cosmology.collapse_threshold, 1.686);
    assert_eq!(config.solver.growth_samples, 200);
}

#[test]
fn test_section_names() {
    assert_eq!(EvolutionConfig::section_name(), "evolution");
    assert_eq!(SolverConfig::section_name(), "solver");
}

#[test]
fn test_empty_initial_population_is_a_configuration_error() {
    let config = EvolutionConfig {
        initial_population: 0,
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(CosmoselectError::Configuration(_))));

    let idle = EvolutionConfig {
        initial_population: 0,
        generations: 0,
        ..Default::default()
    };
    assert!(idle.validate().is_ok());
}

#[test]
fn test_growth_lower_limit_must_not_exceed_seed() {
    let solver = SolverConfig {
        growth_lower_limit: 1e-3,
        ..Default::default()
    };
    assert!(solver.validate().is_err());
}

#[test]
fn test_save_and_load_round_trip() {
    let path = temp_path("round_trip");
    let manager = ConfigManager::new();
    manager
        .update(|config| {
            config.evolution.generations = 30;
            config.evolution.seed = Some(1234);
            config.monte_carlo.trials = 64;
        })
        .unwrap();
    manager.save_to_file(&path).unwrap();

    let loaded = ConfigManager::new();
    loaded.load_from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.get(), manager.get());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let path = temp_path("partial");
    std::fs::write(&path, "[evolution]\ngenerations = 3\n").unwrap();

    let manager = ConfigManager::new();
    manager.load_from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let config = manager.get();
    assert_eq!(config.evolution.generations, 3);
    assert_eq!(config.evolution.initial_population, 100);
    assert_eq!(config.monte_carlo, MonteCarloConfig::default());
}

#[test]
fn test_invalid_file_is_rejected() {
    let path = temp_path("invalid");
    std::fs::write(&path, "[monte_carlo]\nepsilon_range = [0.9, 0.1]\n").unwrap();

    let manager = ConfigManager::new();
    let result = manager.load_from_file(&path);
    std::fs::remove_file(&path).ok();

    assert!(result.is_err());
    assert_eq!(manager.get(), AppConfig::default());
}

#[test]
fn test_rejected_update_leaves_config_unchanged() {
    let manager = ConfigManager::new();
    let result = manager.update(|config| config.evolution.mutation_rate = -1.0);

    assert!(result.is_err());
    assert_eq!(manager.get(), AppConfig::default());
}

#[test]
fn test_layered_sources() {
    let manager = ConfigManager::new();
    manager.load_layered(None::<&str>).unwrap();
    assert_eq!(manager.get(), AppConfig::default());

    let path = temp_path("layered");
    std::fs::write(&path, "[evolution]\ngenerations = 9\npopulation_cap = 50\n").unwrap();
    std::env::set_var("COSMOSELECT_EVOLUTION__GENERATIONS", "7");

    let result = manager.load_layered(Some(&path));
    std::env::remove_var("COSMOSELECT_EVOLUTION__GENERATIONS");
    std::fs::remove_file(&path).ok();
    result.unwrap();

    let config = manager.get();
    assert_eq!(config.evolution.generations, 7);
    assert_eq!(config.evolution.population_cap, 50);
    assert_eq!(config.cosmology, CosmologyConfig::default());
}

#[test]
fn test_missing_layered_file_is_an_error() {
    let manager = ConfigManager::new();
    assert!(manager.load_layered(Some(temp_path("missing"))).is_err());
}

#[test]
fn test_non_finite_cosmology_file_is_rejected() {
    let path = temp_path("nan_cosmology");
    std::fs::write(&path, "[cosmology]\nomega_m0 = nan\n").unwrap();

    let manager = ConfigManager::new();
    let result = manager.load_from_file(&path);
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(CosmoselectError::Configuration(_))));
    assert_eq!(manager.get(), AppConfig::default());
}

#[test]
fn test_every_cosmology_value_must_be_finite() {
    let cases = [
        CosmologyConfig { h0: f64::INFINITY, ..Default::default() },
        CosmologyConfig { omega_m0: f64::NAN, ..Default::default() },
        CosmologyConfig { omega_r0: f64::INFINITY, ..Default::default() },
        CosmologyConfig { z_gel: f64::NAN, ..Default::default() },
        CosmologyConfig { f_max: f64::NAN, ..Default::default() },
        CosmologyConfig { t_max: f64::INFINITY, ..Default::default() },
        CosmologyConfig { structure_amplitude: f64::NAN, ..Default::default() },
        CosmologyConfig { collapse_threshold: f64::INFINITY, ..Default::default() },
        CosmologyConfig { min_collapse_redshift: f64::NAN, ..Default::default() },
    ];
    for config in cases {
        assert!(
            matches!(config.validate(), Err(CosmoselectError::Configuration(_))),
            "{:?}",
            config
        );
    }

    let config = CosmologyConfig {
        structure_amplitude: -1.0,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_non_finite_solver_values_are_rejected() {
    let cases = [
        SolverConfig { rtol: f64::INFINITY, ..Default::default() },
        SolverConfig { growth_lower_limit: f64::NAN, ..Default::default() },
        SolverConfig { monotonic_tolerance: f64::NAN, ..Default::default() },
    ];
    for config in cases {
        assert!(config.validate().is_err(), "{:?}", config);
    }
}
