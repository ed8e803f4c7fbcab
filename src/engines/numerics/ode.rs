//! Adaptive Dormand–Prince 5(4) integrator for scalar initial value problems.
//!
//! Steps are shortened so that every requested output time is hit exactly,
//! which keeps the samples free of interpolation error.

use crate::error::{CosmoselectError, Result};

const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// Fifth-order weights (also the last stage row, FSAL)
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// Fifth minus fourth order weights
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OdeSettings {
    pub rtol: f64,
    pub atol: f64,
    /// Bound on attempted steps (accepted and rejected) over the whole run
    pub max_steps: usize,
}

impl Default for OdeSettings {
    fn default() -> Self {
        Self {
            rtol: 1e-8,
            atol: 1e-12,
            max_steps: 200_000,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OdeSolution {
    pub times: Vec<f64>,
    pub states: Vec<f64>,
    pub accepted_steps: usize,
    pub rejected_steps: usize,
}

pub struct DormandPrince {
    settings: OdeSettings,
}

impl DormandPrince {
    pub fn new(settings: OdeSettings) -> Self {
        Self { settings }
    }

    /// Integrates `dy/dt = f(t, y)` from `(t_eval[0], y0)` and samples `y` at every `t_eval`.
    ///
    /// `t_eval` must be non-decreasing. Running out of steps, step-size underflow and
    /// non-finite states are reported as `CosmoselectError::Integration`.
    pub fn integrate<F>(&self, f: F, y0: f64, t_eval: &[f64]) -> Result<OdeSolution>
    where
        F: Fn(f64, f64) -> f64,
    {
        let mut solution = OdeSolution {
            times: Vec::with_capacity(t_eval.len()),
            states: Vec::with_capacity(t_eval.len()),
            ..Default::default()
        };

        let Some(&t0) = t_eval.first() else {
            return Ok(solution);
        };
        if !y0.is_finite() {
            return Err(CosmoselectError::Integration(format!(
                "non-finite initial state {}",
                y0
            )));
        }
        if t_eval.windows(2).any(|w| !(w[1] >= w[0])) {
            return Err(CosmoselectError::Integration(
                "output times must be non-decreasing".to_string(),
            ));
        }

        let OdeSettings { rtol, atol, max_steps } = self.settings;
        let mut t = t0;
        let mut y = y0;
        let mut k1 = f(t, y);
        if !k1.is_finite() {
            return Err(CosmoselectError::Integration(format!(
                "non-finite derivative at t={}",
                t
            )));
        }

        let span = t_eval[t_eval.len() - 1] - t0;
        let mut h = initial_step(y, k1, rtol, atol, span);

        solution.times.push(t);
        solution.states.push(y);

        for &target in &t_eval[1..] {
            while t < target {
                if solution.accepted_steps + solution.rejected_steps >= max_steps {
                    return Err(CosmoselectError::Integration(format!(
                        "exceeded {} steps before t={:.4}",
                        max_steps, target
                    )));
                }

                let remaining = target - t;
                let landing = h >= remaining;
                let step = if landing { remaining } else { h };

                let k2 = f(t + C2 * step, y + step * A21 * k1);
                let k3 = f(t + C3 * step, y + step * (A31 * k1 + A32 * k2));
                let k4 = f(t + C4 * step, y + step * (A41 * k1 + A42 * k2 + A43 * k3));
                let k5 = f(
                    t + C5 * step,
                    y + step * (A51 * k1 + A52 * k2 + A53 * k3 + A54 * k4),
                );
                let k6 = f(
                    t + step,
                    y + step * (A61 * k1 + A62 * k2 + A63 * k3 + A64 * k4 + A65 * k5),
                );
                let y_new = y + step * (B1 * k1 + B3 * k3 + B4 * k4 + B5 * k5 + B6 * k6);
                let k7 = f(t + step, y_new);

                let error = step * (E1 * k1 + E3 * k3 + E4 * k4 + E5 * k5 + E6 * k6 + E7 * k7);
                let scale = atol + rtol * y.abs().max(y_new.abs());
                let error_norm = (error / scale).abs();

                if !y_new.is_finite() || !k7.is_finite() || !error_norm.is_finite() {
                    solution.rejected_steps += 1;
                    h = step * MIN_FACTOR;
                } else if error_norm <= 1.0 {
                    t = if landing { target } else { t + step };
                    y = y_new;
                    k1 = k7;
                    solution.accepted_steps += 1;

                    let grown = step * step_factor(error_norm);
                    h = if landing && step < h { h.max(grown) } else { grown };
                } else {
                    solution.rejected_steps += 1;
                    h = step * step_factor(error_norm).min(1.0);
                }

                if h <= 4.0 * f64::EPSILON * t.abs().max(f64::MIN_POSITIVE) {
                    return Err(CosmoselectError::Integration(format!(
                        "step size underflow at t={:.6e}, y={:.6e}",
                        t, y
                    )));
                }
            }

            solution.times.push(target);
            solution.states.push(y);
        }

        Ok(solution)
    }
}

fn step_factor(error_norm: f64) -> f64 {
    if error_norm == 0.0 {
        MAX_FACTOR
    } else {
        (SAFETY * error_norm.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
    }
}

fn initial_step(y: f64, dy: f64, rtol: f64, atol: f64, span: f64) -> f64 {
    let scale = atol + rtol * y.abs();
    let d0 = y.abs() / scale;
    let d1 = dy.abs() / scale;
    let h = if d0 < 1e-5 || d1 < 1e-5 {
        1e-6
    } else {
        0.01 * d0 / d1
    };
    if span > 0.0 {
        h.min(span)
    } else {
        h
    }
}

/// `n` evenly spaced points over `[start, end]`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// `n` log-uniformly spaced points from `start` to `end` (both positive).
pub fn geomspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    linspace(start.log10(), end.log10(), n)
        .into_iter()
        .enumerate()
        .map(|(i, exponent)| match i {
            0 => start,
            i if i == n - 1 => end,
            _ => 10f64.powf(exponent),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_growth_matches_closed_form() {
        let solver = DormandPrince::new(OdeSettings::default());
        let times = linspace(0.0, 2.0, 21);
        let solution = solver.integrate(|_, y| y, 1.0, &times).unwrap();

        assert_eq!(solution.times.len(), 21);
        for (t, y) in solution.times.iter().zip(&solution.states) {
            let exact = t.exp();
            assert!((y - exact).abs() / exact < 1e-6, "t={} y={} exact={}", t, y, exact);
        }
    }

    #[test]
    fn test_samples_land_exactly_on_output_times() {
        let solver = DormandPrince::new(OdeSettings::default());
        let times = linspace(0.0, 1.0, 11);
        let solution = solver.integrate(|t, _| 2.0 * t, 0.0, &times).unwrap();

        assert_eq!(solution.times, times);
        assert!((solution.states[10] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_step_budget_exhaustion_is_an_integration_failure() {
        let solver = DormandPrince::new(OdeSettings {
            max_steps: 3,
            ..Default::default()
        });
        let times = linspace(0.0, 10.0, 2);
        let result = solver.integrate(|_, y| 50.0 * y, 1.0, &times);

        assert!(matches!(result, Err(CosmoselectError::Integration(_))));
    }

    #[test]
    fn test_blow_up_is_reported_not_returned() {
        // y' = y^2 from y(0) = 1 diverges at t = 1
        let solver = DormandPrince::new(OdeSettings::default());
        let times = linspace(0.0, 2.0, 5);
        let result = solver.integrate(|_, y| y * y, 1.0, &times);

        assert!(result.is_err());
    }

    #[test]
    fn test_geomspace_endpoints() {
        let points = geomspace(1e-6, 1.0, 200);
        assert_eq!(points.len(), 200);
        assert_eq!(points[0], 1e-6);
        assert_eq!(points[199], 1.0);
        assert!(points.windows(2).all(|w| w[1] > w[0]));
    }
}
