//! Ising spin model simulator.
//!
//! An [`IsingModel`] is built once from sparse field and coupling maps; its
//! spins are then evolved by one of several update rules selected with
//! [`Algorithm`] and advanced with [`IsingModel::update`]:
//!
//! - Metropolis and Glauber single-spin moves
//! - steepest-descent hill climbing
//! - stochastic cellular automata (SCA), momentum annealing (MA) and its
//!   modified variant (MMA), which update every spin synchronously and run
//!   partitioned over rayon with one private generator per partition
//!
//! [`run_anneal`] drives a cooling schedule over any of them.

pub mod config;
pub mod error;
pub mod mcmc;
pub mod model;
pub mod observables;
pub mod parallel;
pub mod report;
pub mod rng;
pub mod schedule;
pub mod simulation;

pub use config::{Algorithm, AnnealConfig, InitialSpins, PinningPolicy};
pub use error::{IsingError, Result};
pub use model::{Edge, IsingModel, LinearBiases, Node, QuadraticBiases, Spin};
pub use report::StateReport;
pub use rng::RandomSource;
pub use schedule::{adaptive_pinning, CoolingSchedule};
pub use simulation::{run_anneal, AnnealTrace, TracePoint};
