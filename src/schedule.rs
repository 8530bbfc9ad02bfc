use validator::ValidationError;

/// Temperature as a function of the step number of an anneal run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoolingSchedule {
    Constant,
    /// `T0 / (1 + a ln(1 + n))`, `a > 1` (Aarts & Korst).
    Logarithmic { a: f64 },
    /// `T0 ratio^n`, `0 < ratio < 1` (Kirkpatrick, Gelatt & Vecchi).
    Exponential { ratio: f64 },
    /// `T0 / (1 + a n^2)`, `a > 0`.
    Quadratic { a: f64 },
    /// `T0 / (1 + a n)`, `a > 0`.
    Hyperbolic { a: f64 },
    /// Straight ramp from `T0` at step 0 to `final_temperature` at the last step.
    Linear { final_temperature: f64 },
}

impl CoolingSchedule {
    /// Temperature at step `n` of `n_steps`, starting from `t0`.
    pub fn temperature(&self, t0: f64, n: usize, n_steps: usize) -> f64 {
        let nf = n as f64;
        match *self {
            Self::Constant => t0,
            Self::Logarithmic { a } => t0 / (1.0 + a * (1.0 + nf).ln()),
            Self::Exponential { ratio } => t0 * ratio.powf(nf),
            Self::Quadratic { a } => t0 / (1.0 + a * nf * nf),
            Self::Hyperbolic { a } => t0 / (1.0 + a * nf),
            Self::Linear { final_temperature } => {
                if n_steps <= 1 {
                    return final_temperature;
                }
                let frac = (nf / (n_steps - 1) as f64).min(1.0);
                t0 + (final_temperature - t0) * frac
            }
        }
    }

    pub(crate) fn check(&self) -> Result<(), ValidationError> {
        let ok = match *self {
            Self::Constant => true,
            Self::Logarithmic { a } => a.is_finite() && a > 1.0,
            Self::Exponential { ratio } => ratio > 0.0 && ratio < 1.0,
            Self::Quadratic { a } | Self::Hyperbolic { a } => a.is_finite() && a > 0.0,
            Self::Linear { final_temperature } => {
                final_temperature.is_finite() && final_temperature >= 0.0
            }
        };
        if ok {
            Ok(())
        } else {
            Err(ValidationError::new("cooling schedule parameter out of range"))
        }
    }
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        Self::Logarithmic { a: 2.0 }
    }
}

/// Pinning that grows as the system cools: `min(ln(1 + 1/T)^8, ln(N) / 4)`.
///
/// At `T = 0` the first term is infinite and the cap applies.
pub fn adaptive_pinning(temperature: f64, n_nodes: usize) -> f64 {
    let cap = 0.25 * (n_nodes as f64).ln();
    if temperature <= 0.0 {
        return cap.max(0.0);
    }
    (1.0 + 1.0 / temperature).ln().powi(8).min(cap).max(0.0)
}
