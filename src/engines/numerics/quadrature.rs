//! Globally adaptive Gauss–Kronrod (G7/K15) quadrature.
//!
//! Nodes are strictly interior, so integrands may be undefined at either endpoint.

// Kronrod abscissae, descending; odd indices are the Gauss points
const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

const WGK: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_18,
    0.140_653_259_715_525_92,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_83,
];

// Gauss weights for XGK[1], XGK[3], XGK[5], XGK[7]
const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureSettings {
    pub epsabs: f64,
    pub epsrel: f64,
    pub max_subdivisions: usize,
}

impl Default for QuadratureSettings {
    fn default() -> Self {
        Self {
            epsabs: 1.49e-8,
            epsrel: 1.49e-8,
            max_subdivisions: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureResult {
    pub value: f64,
    pub abs_error: f64,
    pub converged: bool,
    pub evaluations: usize,
}

struct Segment {
    lower: f64,
    upper: f64,
    value: f64,
    error: f64,
}

/// Integrates `f` over `[lower, upper]`, bisecting the worst segment until the
/// error estimate meets `max(epsabs, epsrel * |value|)` or the subdivision budget is spent.
pub fn integrate<F>(f: F, lower: f64, upper: f64, settings: &QuadratureSettings) -> QuadratureResult
where
    F: Fn(f64) -> f64,
{
    if lower == upper {
        return QuadratureResult {
            value: 0.0,
            abs_error: 0.0,
            converged: true,
            evaluations: 0,
        };
    }
    if upper < lower {
        let mut flipped = integrate(f, upper, lower, settings);
        flipped.value = -flipped.value;
        return flipped;
    }

    let (value, error) = kronrod15(&f, lower, upper);
    let mut segments = vec![Segment {
        lower,
        upper,
        value,
        error,
    }];
    let mut evaluations = 15;

    loop {
        let total: f64 = segments.iter().map(|s| s.value).sum();
        let total_error: f64 = segments.iter().map(|s| s.error).sum();
        let tolerance = settings.epsabs.max(settings.epsrel * total.abs());

        if !total.is_finite() || !total_error.is_finite() {
            return QuadratureResult {
                value: total,
                abs_error: total_error,
                converged: false,
                evaluations,
            };
        }
        if total_error <= tolerance || segments.len() >= settings.max_subdivisions {
            return QuadratureResult {
                value: total,
                abs_error: total_error,
                converged: total_error <= tolerance,
                evaluations,
            };
        }

        let worst = segments
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.error.partial_cmp(&b.error).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let segment = segments.swap_remove(worst);
        let mid = 0.5 * (segment.lower + segment.upper);
        if mid <= segment.lower || mid >= segment.upper {
            // Interval can no longer be split in floating point
            segments.push(segment);
            let total: f64 = segments.iter().map(|s| s.value).sum();
            let total_error: f64 = segments.iter().map(|s| s.error).sum();
            return QuadratureResult {
                value: total,
                abs_error: total_error,
                converged: false,
                evaluations,
            };
        }

        for (a, b) in [(segment.lower, mid), (mid, segment.upper)] {
            let (value, error) = kronrod15(&f, a, b);
            segments.push(Segment {
                lower: a,
                upper: b,
                value,
                error,
            });
        }
        evaluations += 30;
    }
}

/// 15-point Kronrod estimate and its deviation from the embedded 7-point Gauss rule.
fn kronrod15<F>(f: &F, lower: f64, upper: f64) -> (f64, f64)
where
    F: Fn(f64) -> f64,
{
    let center = 0.5 * (lower + upper);
    let half = 0.5 * (upper - lower);

    let f_center = f(center);
    let mut kronrod = WGK[7] * f_center;
    let mut gauss = WG[3] * f_center;

    for j in 0..7 {
        let dx = half * XGK[j];
        let pair = f(center - dx) + f(center + dx);
        kronrod += WGK[j] * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    let value = kronrod * half;
    let error = ((kronrod - gauss) * half).abs();
    (value, error)
}
