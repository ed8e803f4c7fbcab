use crate::config::AppConfig;
use crate::engines::evolution::{EvolutionOutcome, EvolutionSummary, Termination};
use crate::engines::monte_carlo::{MonteCarloRun, MonteCarloSummary};
use crate::error::Result;
use crate::types::GenerationRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionReport {
    pub termination: Termination,
    pub generations_recorded: usize,
    pub history: Vec<GenerationRecord>,
    pub final_population: Option<EvolutionSummary>,
}

impl EvolutionReport {
    pub fn from_outcome(outcome: &EvolutionOutcome) -> Self {
        Self {
            termination: outcome.termination,
            generations_recorded: outcome.history.len(),
            history: outcome.history.clone(),
            final_population: outcome.summary(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub timestamp: String,
    pub config: AppConfig,
    pub monte_carlo: Option<MonteCarloSummary>,
    pub evolution: Option<EvolutionReport>,
    pub summary: String,
}

impl SimulationReport {
    pub fn new(
        config: AppConfig,
        monte_carlo: Option<&MonteCarloRun>,
        evolution: Option<&EvolutionOutcome>,
    ) -> Self {
        let monte_carlo = monte_carlo.map(MonteCarloRun::summary);
        let evolution = evolution.map(EvolutionReport::from_outcome);

        let mut lines = Vec::new();
        if let Some(mc) = &monte_carlo {
            lines.push(format!(
                "{} of {} universes viable ({:.1}%)",
                mc.viable,
                mc.trials,
                mc.viable_fraction * 100.0
            ));
        }
        if let Some(evo) = &evolution {
            lines.push(match evo.termination {
                Termination::Completed => format!(
                    "Population survived {} generations",
                    evo.generations_recorded
                ),
                Termination::Extinct { generation } => {
                    format!("Population went extinct at generation {}", generation)
                }
            });
        }

        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            config,
            monte_carlo,
            evolution,
            summary: lines.join("; "),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
