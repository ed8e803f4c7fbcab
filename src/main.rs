use anyhow::Context;
use cosmoselect::config::ConfigManager;
use cosmoselect::engines::cosmology::HeritageMapper;
use cosmoselect::engines::evolution::{EvolutionDriver, LogProgressCallback};
use cosmoselect::engines::monte_carlo::MonteCarloDriver;
use cosmoselect::report::SimulationReport;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional config file; COSMOSELECT_* environment variables override it
    let config_path = std::env::args().nth(1);
    let manager = ConfigManager::new();
    manager
        .load_layered(config_path.as_deref())
        .context("Failed to load configuration")?;
    let config = manager.get();

    let monte_carlo = MonteCarloDriver::new(
        config.monte_carlo.clone(),
        &config.cosmology,
        &config.solver,
    )?
    .run();

    let mut driver = EvolutionDriver::new(
        config.evolution.clone(),
        HeritageMapper::from_config(&config.cosmology),
    )?;
    let outcome = driver.run(LogProgressCallback);

    let report = SimulationReport::new(config, Some(&monte_carlo), Some(&outcome));
    log::info!("{}", report.summary);
    println!("{}", report.to_json()?);

    Ok(())
}
