use crate::config::{CosmologyConfig, SolverConfig};
use crate::engines::numerics::{self, geomspace, linspace, DormandPrince, OdeSettings, QuadratureSettings};
use crate::error::{CosmoselectError, Result};
use crate::types::{CosmologicalParameters, Trajectory, Verdict, VerdictKind};

/// Metres per megaparsec
const MPC_IN_M: f64 = 3.086e22;
const SECONDS_PER_GYR: f64 = 365.0 * 24.0 * 3600.0 * 1e9;

/// Converts a Hubble constant from km/s/Mpc to Gyr^-1.
pub fn hubble_per_gyr(h0: f64) -> f64 {
    h0 * 1e3 / MPC_IN_M * SECONDS_PER_GYR
}

/// Numerical and physical thresholds used when judging a universe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniverseSettings {
    pub seed_scale_factor: f64,
    pub ode: OdeSettings,
    pub quadrature: QuadratureSettings,
    pub trajectory_samples: usize,
    pub growth_samples: usize,
    pub growth_lower_limit: f64,
    pub monotonic_tolerance: f64,
    pub structure_amplitude: f64,
    pub collapse_threshold: f64,
    pub min_collapse_redshift: f64,
}

impl Default for UniverseSettings {
    fn default() -> Self {
        Self::from_config(&CosmologyConfig::default(), &SolverConfig::default())
    }
}

impl UniverseSettings {
    pub fn from_config(cosmology: &CosmologyConfig, solver: &SolverConfig) -> Self {
        Self {
            seed_scale_factor: solver.seed_scale_factor,
            ode: OdeSettings {
                rtol: solver.rtol,
                atol: solver.atol,
                max_steps: solver.max_steps,
            },
            quadrature: QuadratureSettings {
                epsabs: solver.quadrature_tolerance,
                epsrel: solver.quadrature_tolerance,
                max_subdivisions: solver.max_subdivisions,
            },
            trajectory_samples: solver.trajectory_samples,
            growth_samples: solver.growth_samples,
            growth_lower_limit: solver.growth_lower_limit,
            monotonic_tolerance: solver.monotonic_tolerance,
            structure_amplitude: cosmology.structure_amplitude,
            collapse_threshold: cosmology.collapse_threshold,
            min_collapse_redshift: cosmology.min_collapse_redshift,
        }
    }
}

/// A Friedmann universe with fixed present-day densities.
#[derive(Debug, Clone)]
pub struct UniverseModel {
    params: CosmologicalParameters,
    settings: UniverseSettings,
}

impl UniverseModel {
    pub fn new(params: CosmologicalParameters) -> Result<Self> {
        Self::with_settings(params, UniverseSettings::default())
    }

    pub fn with_settings(params: CosmologicalParameters, settings: UniverseSettings) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, settings })
    }

    pub fn params(&self) -> &CosmologicalParameters {
        &self.params
    }

    pub fn settings(&self) -> &UniverseSettings {
        &self.settings
    }

    /// Dimensionless expansion rate `H(a) / H0`. Only meaningful for `a > 0`.
    fn expansion_rate(&self, a: f64) -> f64 {
        let p = &self.params;
        (p.omega_lambda0 + p.omega_m0 / a.powi(3) + p.omega_r0 / a.powi(4)).sqrt()
    }

    /// Hubble parameter in km/s/Mpc at scale factor `a`.
    pub fn hubble(&self, a: f64) -> Result<f64> {
        check_scale_factor(a)?;
        Ok(self.params.h0 * self.expansion_rate(a))
    }

    pub fn hubble_many(&self, scale_factors: &[f64]) -> Result<Vec<f64>> {
        scale_factors.iter().map(|&a| self.hubble(a)).collect()
    }

    /// Integrates `da/dt = a H(a)` from the seed scale factor over `[0, t_max]` Gyr.
    pub fn evolve(&self, t_max: f64) -> Result<Trajectory> {
        if !(t_max > 0.0 && t_max.is_finite()) {
            return Err(CosmoselectError::Domain(format!(
                "evolution horizon must be positive, got {}",
                t_max
            )));
        }

        let rate = hubble_per_gyr(self.params.h0);
        let times = linspace(0.0, t_max, self.settings.trajectory_samples);
        let solver = DormandPrince::new(self.settings.ode);
        let solution = solver.integrate(
            |_, a| {
                if a > 0.0 {
                    a * rate * self.expansion_rate(a)
                } else {
                    f64::NAN
                }
            },
            self.settings.seed_scale_factor,
            &times,
        )?;

        log::debug!(
            "Evolved Omega_Lambda0={:.3} to t={} Gyr in {} steps ({} rejected)",
            self.params.omega_lambda0,
            t_max,
            solution.accepted_steps,
            solution.rejected_steps
        );

        Ok(Trajectory {
            times: solution.times,
            scale_factors: solution.states,
        })
    }

    /// Linear growth factor `D(a) = 5/2 Omega_m E(a) * int_0^a da' / (a' E(a'))^3`.
    ///
    /// The integrand is evaluated as `a'^3 / (Omega_L a'^4 + Omega_m a' + Omega_r)^(3/2)`,
    /// which stays finite as `a' -> 0` whenever matter or radiation is present. The
    /// quadrature never samples the lower endpoint, so integration starts at the
    /// configured lower limit (zero by default) without a cutoff.
    pub fn growth_factor(&self, a: f64) -> Result<f64> {
        check_scale_factor(a)?;

        let p = self.params;
        if p.omega_m0 == 0.0 {
            return Ok(0.0);
        }

        let lower = self.settings.growth_lower_limit;
        if lower >= a {
            return Ok(0.0);
        }

        let integrand = |x: f64| {
            let denominator = p.omega_lambda0 * x.powi(4) + p.omega_m0 * x + p.omega_r0;
            if x <= 0.0 || denominator <= 0.0 {
                0.0
            } else {
                x.powi(3) / denominator.powf(1.5)
            }
        };

        let result = numerics::integrate(integrand, lower, a, &self.settings.quadrature);
        if !result.value.is_finite() {
            return Err(CosmoselectError::Integration(format!(
                "growth integral diverged at a={:.3e}",
                a
            )));
        }
        if !result.converged {
            log::debug!(
                "Growth integral at a={:.3e} did not converge after {} evaluations (error estimate {:.2e})",
                a,
                result.evaluations,
                result.abs_error
            );
        }

        Ok(2.5 * p.omega_m0 * self.expansion_rate(a) * result.value)
    }

    pub fn growth_factors(&self, scale_factors: &[f64]) -> Result<Vec<f64>> {
        scale_factors.iter().map(|&a| self.growth_factor(a)).collect()
    }

    /// Ordered viability criteria; the first failing one decides the verdict.
    ///
    /// 1. the scale factor never decreases (no global collapse),
    /// 2. the linear overdensity reaches the collapse threshold by today,
    /// 3. that happens no later than the minimum collapse redshift.
    pub fn is_viable(&self, t_max: f64) -> Verdict {
        let trajectory = match self.evolve(t_max) {
            Ok(trajectory) => trajectory,
            Err(CosmoselectError::Integration(message)) => {
                return Verdict::rejected(
                    VerdictKind::IntegrationFailure,
                    format!("integration failure ({})", message),
                );
            }
            Err(other) => {
                return Verdict::rejected(VerdictKind::InvalidParameters, other.to_string());
            }
        };

        if trajectory.first_decrease(self.settings.monotonic_tolerance).is_some() {
            return Verdict::rejected(VerdictKind::GlobalCollapse, "global collapse".to_string());
        }

        let a_start = trajectory
            .initial_scale_factor()
            .unwrap_or(self.settings.seed_scale_factor);
        let scale_factors = geomspace(a_start, 1.0, self.settings.growth_samples);

        let growth = match self.growth_factors(&scale_factors) {
            Ok(growth) => growth,
            Err(e) => {
                return Verdict::rejected(
                    VerdictKind::IntegrationFailure,
                    format!("integration failure ({})", e),
                );
            }
        };

        let threshold = self.settings.collapse_threshold;
        let amplitude = self.settings.structure_amplitude;
        let first_collapse = growth
            .iter()
            .position(|d| amplitude * d >= threshold);

        let Some(index) = first_collapse else {
            return Verdict::rejected(
                VerdictKind::NoStructureFormation,
                "no structure formation".to_string(),
            );
        };

        let z_collapse = 1.0 / scale_factors[index] - 1.0;
        if z_collapse < self.settings.min_collapse_redshift {
            return Verdict::rejected(
                VerdictKind::LateStructureFormation,
                format!("structures too late (z={:.1})", z_collapse),
            );
        }

        Verdict::viable(format!("Viable (z_collapse={:.1})", z_collapse))
    }
}

fn check_scale_factor(a: f64) -> Result<()> {
    if a > 0.0 && a.is_finite() {
        Ok(())
    } else {
        Err(CosmoselectError::Domain(format!(
            "scale factor must be finite and positive, got {}",
            a
        )))
    }
}
