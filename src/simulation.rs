use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};
use validator::Validate;

use crate::config::{AnnealConfig, PinningPolicy};
use crate::error::{IsingError, Result};
use crate::model::{IsingModel, Node, Spin};
use crate::schedule::adaptive_pinning;

/// One recorded point of an anneal run, taken after the step's update.
#[derive(Debug, Clone, PartialEq)]
pub struct TracePoint {
    /// 1-based count of updates applied so far.
    pub step: usize,
    pub temperature: f64,
    pub pinning: f64,
    /// Energy variant matching the run's algorithm.
    pub energy: f64,
}

/// Outcome of [`run_anneal`].
#[derive(Debug, Clone)]
pub struct AnnealTrace {
    pub records: Vec<TracePoint>,
    /// Algorithm-matched energy after the last step.
    pub final_energy: f64,
    /// Lowest standard energy seen after any step.
    pub best_energy: f64,
    /// Configuration that reached `best_energy`.
    pub best_spins: BTreeMap<Node, Spin>,
}

/// Run a cooling schedule on `model`.
///
/// Each step:
/// 1. Every `cooling_interval` steps, set the scheduled temperature (and the
///    pinning parameter under [`PinningPolicy::Adaptive`])
/// 2. One [`IsingModel::update`]
/// 3. Track the best standard energy; record a [`TracePoint`] every
///    `record_interval` steps and after the final step
///
/// `on_step` is called once per step (useful for progress bars). The run
/// stops with [`IsingError::Interrupted`] as soon as `interrupted` is set.
pub fn run_anneal(
    model: &mut IsingModel,
    config: &AnnealConfig,
    interrupted: &AtomicBool,
    on_step: &(dyn Fn() + Sync),
) -> Result<AnnealTrace> {
    config.validate()?;

    let n_steps = config.n_steps;
    let n_nodes = model.n_nodes();

    model.set_algorithm(config.algorithm);
    model.set_sequential(config.sequential);
    if let Some(init) = config.initial_spins {
        model.initialize_spins(init);
    }

    match config.pinning {
        PinningPolicy::Fixed(q) => model.set_pinning_parameter(q),
        PinningPolicy::HalfLargestEigenvalue => {
            let lambda = model.largest_eigenvalue();
            debug!("largest eigenvalue of -J: {lambda}");
            model.set_pinning_parameter(0.5 * lambda);
        }
        PinningPolicy::Adaptive => {}
    }

    info!(
        "anneal: {} on {} nodes, {} steps from T = {}",
        config.algorithm.name(),
        n_nodes,
        n_steps,
        config.initial_temperature
    );

    let mut records = Vec::with_capacity(n_steps / config.record_interval + 1);
    let mut best_energy = model.energy();
    let mut best_spins = model.spin_vector();

    for step in 0..n_steps {
        if interrupted.load(Ordering::Relaxed) {
            return Err(IsingError::Interrupted);
        }
        on_step();

        if step % config.cooling_interval == 0 {
            let t = config
                .schedule
                .temperature(config.initial_temperature, step, n_steps);
            model.set_temperature(t);
            if config.pinning == PinningPolicy::Adaptive {
                model.set_pinning_parameter(adaptive_pinning(model.temperature(), n_nodes));
            }
        }

        model.update();

        let energy = model.energy();
        if energy < best_energy {
            best_energy = energy;
            best_spins = model.spin_vector();
        }

        let done = step + 1;
        if done % config.record_interval == 0 || done == n_steps {
            records.push(TracePoint {
                step: done,
                temperature: model.temperature(),
                pinning: model.pinning_parameter(),
                energy: model.algorithm_energy(),
            });
        }
    }

    let final_energy = model.algorithm_energy();
    info!("anneal done: final energy {final_energy}, best energy {best_energy}");

    Ok(AnnealTrace {
        records,
        final_energy,
        best_energy,
        best_spins: model.nodes().iter().cloned().zip(best_spins).collect(),
    })
}
