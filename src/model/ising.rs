use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use super::node::{Edge, LinearBiases, Node, QuadraticBiases};
use super::spin::{spin_of, Spin};
use crate::config::{Algorithm, InitialSpins};
use crate::error::{IsingError, Result};
use crate::rng::RandomSource;

/// Default number of partitions a synchronous step is split into.
pub const DEFAULT_PARTITIONS: usize = 32;

/// Ising model state: fixed topology plus mutable spins and control parameters.
///
/// Nodes are indexed by their sorted order. Couplings are stored as a dense
/// symmetric `n_nodes * n_nodes` row-major array with a zero diagonal, the
/// field as a length-`n_nodes` array. Both are fixed after construction.
///
/// `spins` and `previous_spins` are two separate buffers; synchronous rules
/// snapshot the current configuration into `previous_spins` before writing.
pub struct IsingModel {
    pub(crate) nodes: Vec<Node>,
    pub(crate) index: BTreeMap<Node, usize>,
    /// Row-major coupling matrix, length `n_nodes * n_nodes`.
    pub(crate) couplings: Vec<f64>,
    /// External field, length `n_nodes`.
    pub(crate) field: Vec<f64>,
    /// Current configuration (+1/−1).
    pub(crate) spins: Vec<i8>,
    /// Configuration before the last synchronous step (+1/−1).
    pub(crate) previous_spins: Vec<i8>,
    pub(crate) temperature: f64,
    pub(crate) pinning: f64,
    pub(crate) flip_trial_rate: f64,
    pub(crate) algorithm: Algorithm,
    pub(crate) rng: RandomSource,
    pub(crate) partitions: usize,
    pub(crate) sequential: bool,
    pub(crate) hill_climbing_limit: Option<usize>,
}

impl IsingModel {
    /// Build a model from field and coupling maps.
    ///
    /// Every quadratic key must be `(smaller, larger)`. All spins start Up,
    /// temperature and pinning at 0, flip-trial rate at 1, algorithm Metropolis.
    /// The random source is seeded from entropy; call [`IsingModel::set_seed`]
    /// for reproducible runs.
    pub fn new(linear: &LinearBiases, quadratic: &QuadraticBiases) -> Result<Self> {
        let mut node_set: BTreeSet<Node> = linear.keys().cloned().collect();
        for ((a, b), &j) in quadratic {
            let edge = Edge::new(a.clone(), b.clone())?;
            if !j.is_finite() {
                return Err(IsingError::NonFiniteBias(format!(
                    "edge ({}, {})",
                    edge.first(),
                    edge.second()
                )));
            }
            node_set.insert(a.clone());
            node_set.insert(b.clone());
        }
        for (node, &h) in linear {
            if !h.is_finite() {
                return Err(IsingError::NonFiniteBias(format!("node {node}")));
            }
        }
        if node_set.is_empty() {
            return Err(IsingError::EmptyModel);
        }

        let nodes: Vec<Node> = node_set.into_iter().collect();
        let index: BTreeMap<Node, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        let n = nodes.len();

        let field: Vec<f64> = nodes
            .iter()
            .map(|node| linear.get(node).copied().unwrap_or(0.0))
            .collect();

        let mut couplings = vec![0.0f64; n * n];
        for ((a, b), &j) in quadratic {
            let (i, k) = (index[a], index[b]);
            couplings[i * n + k] = j;
            couplings[k * n + i] = j;
        }

        debug!(
            "built Ising model: {} nodes, {} couplings",
            n,
            quadratic.len()
        );

        let spins = vec![Spin::Up.value(); n];
        Ok(Self {
            nodes,
            index,
            couplings,
            field,
            previous_spins: spins.clone(),
            spins,
            temperature: 0.0,
            pinning: 0.0,
            flip_trial_rate: 1.0,
            algorithm: Algorithm::Metropolis,
            rng: RandomSource::new(None),
            partitions: DEFAULT_PARTITIONS,
            sequential: false,
            hill_climbing_limit: None,
        })
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes in canonical index order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn index_of(&self, node: &Node) -> Option<usize> {
        self.index.get(node).copied()
    }

    /// Coupling between two nodes in either order; `None` if a node is unknown.
    pub fn coupling(&self, a: &Node, b: &Node) -> Option<f64> {
        let (i, j) = (self.index_of(a)?, self.index_of(b)?);
        Some(self.couplings[i * self.n_nodes() + j])
    }

    pub fn field(&self, node: &Node) -> Option<f64> {
        self.index_of(node).map(|i| self.field[i])
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        if algorithm != self.algorithm {
            debug!("algorithm: {} -> {}", self.algorithm.name(), algorithm.name());
        }
        self.algorithm = algorithm;
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Set the temperature; negative (or NaN) input becomes 0.
    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature = if temperature >= 0.0 { temperature } else { 0.0 };
    }

    pub fn pinning_parameter(&self) -> f64 {
        self.pinning
    }

    /// Set the pinning parameter; negative (or NaN) input becomes 0.
    pub fn set_pinning_parameter(&mut self, pinning: f64) {
        self.pinning = if pinning >= 0.0 { pinning } else { 0.0 };
    }

    pub fn flip_trial_rate(&self) -> f64 {
        self.flip_trial_rate
    }

    /// Probability that a node adopts its candidate state in a synchronous step.
    ///
    /// Clamped to `[0, 1]`; NaN is rejected.
    pub fn set_flip_trial_rate(&mut self, rate: f64) -> Result<()> {
        if rate.is_nan() {
            return Err(IsingError::InvalidFlipTrialRate(rate));
        }
        self.flip_trial_rate = rate.clamp(0.0, 1.0);
        Ok(())
    }

    /// Reseed the random source; `None` reseeds from entropy.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        debug!("reseed: {seed:?}");
        self.rng = RandomSource::new(seed);
    }

    /// Number of partitions (and private generators) per synchronous step.
    ///
    /// Results of a seeded run depend on this value, not on thread count.
    pub fn set_partitions(&mut self, partitions: usize) {
        self.partitions = partitions.max(1);
    }

    pub fn partitions(&self) -> usize {
        self.partitions
    }

    /// Run synchronous steps on the calling thread. Results are identical.
    pub fn set_sequential(&mut self, sequential: bool) {
        self.sequential = sequential;
    }

    /// Cap on applied flips per hill-climbing call; `None` runs to a local minimum.
    pub fn set_hill_climbing_limit(&mut self, limit: Option<usize>) {
        self.hill_climbing_limit = limit;
    }

    /// Overwrite every spin, then copy the result into the previous-spin buffer.
    pub fn initialize_spins(&mut self, init: InitialSpins) {
        match init {
            InitialSpins::AllDown => self.spins.fill(Spin::Down.value()),
            InitialSpins::AllUp => self.spins.fill(Spin::Up.value()),
            InitialSpins::Uniform => {
                for s in self.spins.iter_mut() {
                    *s = if self.rng.bernoulli(0.5) {
                        Spin::Down.value()
                    } else {
                        Spin::Up.value()
                    };
                }
            }
        }
        self.previous_spins.copy_from_slice(&self.spins);
    }

    /// Current spin of every node.
    pub fn spins(&self) -> BTreeMap<Node, Spin> {
        self.nodes
            .iter()
            .zip(self.spins.iter())
            .map(|(n, &s)| (n.clone(), spin_of(s)))
            .collect()
    }

    pub fn spin(&self, node: &Node) -> Option<Spin> {
        self.index_of(node).map(|i| spin_of(self.spins[i]))
    }

    /// Current spins in canonical index order.
    pub fn spin_vector(&self) -> Vec<Spin> {
        self.spins.iter().map(|&s| spin_of(s)).collect()
    }

    /// Previous-spin buffer in canonical index order.
    pub fn previous_spin_vector(&self) -> Vec<Spin> {
        self.previous_spins.iter().map(|&s| spin_of(s)).collect()
    }

    /// Overwrite the listed nodes' spins; values must be −1 or +1.
    ///
    /// The whole map is checked before anything is written. Afterwards the
    /// previous-spin buffer is synced to the new configuration.
    pub fn set_spins(&mut self, values: &BTreeMap<Node, i64>) -> Result<()> {
        let mut updates = Vec::with_capacity(values.len());
        for (node, &v) in values {
            let i = self
                .index_of(node)
                .ok_or_else(|| IsingError::UnknownNode(node.clone()))?;
            let s = Spin::try_from(v).map_err(|value| IsingError::InvalidSpin {
                node: node.clone(),
                value,
            })?;
            updates.push((i, s));
        }
        for (i, s) in updates {
            self.spins[i] = s.value();
        }
        self.previous_spins.copy_from_slice(&self.spins);
        Ok(())
    }
}
