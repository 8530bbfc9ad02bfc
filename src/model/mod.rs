pub mod ising;
pub mod node;
pub mod spin;

pub use ising::{IsingModel, DEFAULT_PARTITIONS};
pub use node::{Edge, LinearBiases, Node, QuadraticBiases};
pub use spin::Spin;
