pub mod hill_climbing;
pub mod single_flip;
pub mod synchronous;

use crate::config::Algorithm;
use crate::model::IsingModel;
use synchronous::{synchronous_step, SyncRule};

impl IsingModel {
    /// Advance one step of the active algorithm.
    ///
    /// - Metropolis / Glauber: one move on one uniformly chosen node.
    /// - Hill climbing: steepest descent to a local minimum (or the flip limit).
    /// - SCA / MA / MMA: one synchronous step over every node.
    pub fn update(&mut self) {
        match self.algorithm {
            Algorithm::Metropolis => single_flip::metropolis_step(
                &self.couplings,
                &self.field,
                &mut self.spins,
                self.temperature,
                &mut self.rng,
            ),
            Algorithm::Glauber => single_flip::glauber_step(
                &self.couplings,
                &self.field,
                &mut self.spins,
                self.temperature,
                &mut self.rng,
            ),
            Algorithm::HillClimbing => {
                hill_climbing::hill_climb(
                    &self.couplings,
                    &self.field,
                    &mut self.spins,
                    self.hill_climbing_limit,
                );
            }
            Algorithm::Sca => synchronous_step(self, SyncRule::Sca),
            Algorithm::Ma => synchronous_step(self, SyncRule::Ma),
            Algorithm::Mma => synchronous_step(self, SyncRule::Mma),
        }
    }
}
