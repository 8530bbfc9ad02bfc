use validator::{Validate, ValidationError};

use crate::schedule::CoolingSchedule;

/// Update rule applied by [`IsingModel::update`](crate::IsingModel::update).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    Metropolis,
    Glauber,
    /// Stochastic cellular automata.
    Sca,
    /// Momentum annealing.
    Ma,
    /// Modified momentum annealing.
    Mma,
    HillClimbing,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Self::Metropolis,
        Self::Glauber,
        Self::Sca,
        Self::Ma,
        Self::Mma,
        Self::HillClimbing,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Metropolis => "Metropolis method",
            Self::Glauber => "Glauber dynamics",
            Self::Sca => "SCA",
            Self::Ma => "Momentum annealing",
            Self::Mma => "Modified momentum annealing",
            Self::HillClimbing => "Hill climbing",
        }
    }

    /// The next algorithm in declaration order, wrapping around.
    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|a| a == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Whether the rule evolves the two-layer (current, previous) system,
    /// whose energy is [`IsingModel::energy_on_bipartite_graph`](crate::IsingModel::energy_on_bipartite_graph).
    pub fn uses_bipartite_energy(&self) -> bool {
        matches!(self, Self::Sca | Self::Ma | Self::Mma)
    }
}

impl TryFrom<&str> for Algorithm {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "metropolis" => Ok(Self::Metropolis),
            "glauber" => Ok(Self::Glauber),
            "sca" => Ok(Self::Sca),
            "ma" => Ok(Self::Ma),
            "mma" => Ok(Self::Mma),
            "hill_climbing" | "hc" => Ok(Self::HillClimbing),
            _ => Err(format!(
                "unknown algorithm '{s}', expected 'metropolis', 'glauber', 'sca', 'ma', 'mma', or 'hill_climbing'"
            )),
        }
    }
}

/// Bulk spin initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialSpins {
    AllDown,
    AllUp,
    /// Each spin independently Up or Down with probability 1/2.
    Uniform,
}

impl TryFrom<&str> for InitialSpins {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "down" | "all_down" => Ok(Self::AllDown),
            "up" | "all_up" => Ok(Self::AllUp),
            "uniform" | "random" => Ok(Self::Uniform),
            _ => Err(format!(
                "unknown initial spins '{s}', expected 'all_down', 'all_up', or 'uniform'"
            )),
        }
    }
}

/// How an anneal run sets the pinning parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinningPolicy {
    Fixed(f64),
    /// Half the largest eigenvalue of the negated coupling matrix, computed once.
    HalfLargestEigenvalue,
    /// `min(ln(1 + 1/T)^8, ln(N) / 4)`, re-evaluated whenever the temperature changes.
    Adaptive,
}

fn validate_anneal_config(cfg: &AnnealConfig) -> Result<(), ValidationError> {
    if cfg.n_steps < 1 {
        return Err(ValidationError::new("n_steps must be >= 1"));
    }
    if cfg.record_interval < 1 {
        return Err(ValidationError::new("record_interval must be >= 1"));
    }
    if cfg.cooling_interval < 1 {
        return Err(ValidationError::new("cooling_interval must be >= 1"));
    }
    if !cfg.initial_temperature.is_finite() || cfg.initial_temperature < 0.0 {
        return Err(ValidationError::new(
            "initial_temperature must be finite and >= 0",
        ));
    }
    if let PinningPolicy::Fixed(q) = cfg.pinning {
        if !q.is_finite() {
            return Err(ValidationError::new("fixed pinning must be finite"));
        }
    }
    cfg.schedule.check()
}

/// Parameters of one [`run_anneal`](crate::run_anneal) call.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_anneal_config"))]
pub struct AnnealConfig {
    pub n_steps: usize,
    pub algorithm: Algorithm,
    pub initial_temperature: f64,
    pub schedule: CoolingSchedule,
    /// Steps between temperature updates.
    pub cooling_interval: usize,
    pub pinning: PinningPolicy,
    /// Overwrite spins before the first step; `None` keeps the current state.
    pub initial_spins: Option<InitialSpins>,
    /// Steps between recorded trace points.
    pub record_interval: usize,
    /// Run synchronous steps on the calling thread instead of the rayon pool.
    pub sequential: bool,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            n_steps: 1000,
            algorithm: Algorithm::Metropolis,
            initial_temperature: 1.0,
            schedule: CoolingSchedule::Constant,
            cooling_interval: 1,
            pinning: PinningPolicy::Fixed(0.0),
            initial_spins: None,
            record_interval: 1,
            sequential: false,
        }
    }
}
