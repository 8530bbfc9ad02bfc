use std::fmt;

use crate::model::IsingModel;

/// Human-readable snapshot of a model: spins, field, couplings and parameters.
///
/// Borrowing view; building or printing it never touches the model.
pub struct StateReport<'a> {
    model: &'a IsingModel,
}

impl fmt::Display for StateReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.model;
        let n = m.n_nodes();

        writeln!(f, "Nodes:")?;
        let labels: Vec<String> = m.nodes.iter().map(|node| node.to_string()).collect();
        writeln!(f, "{}", labels.join(" "))?;

        writeln!(f, "Current spin configuration:")?;
        for &s in &m.spins {
            write!(f, "{s:>3}")?;
        }
        writeln!(f)?;

        writeln!(f, "External magnetic field:")?;
        for h in &m.field {
            write!(f, "{h:>10.4}")?;
        }
        writeln!(f)?;

        writeln!(f, "Coupling coefficients:")?;
        for row in m.couplings.chunks(n) {
            for j in row {
                write!(f, "{j:>10.4}")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Algorithm: {}", m.algorithm.name())?;
        writeln!(f, "Temperature: {}", m.temperature)?;
        writeln!(f, "Pinning parameter: {}", m.pinning)?;
        write!(f, "Flip trial rate: {}", m.flip_trial_rate)
    }
}

impl IsingModel {
    pub fn report(&self) -> StateReport<'_> {
        StateReport { model: self }
    }

    /// Text report of the full state, see [`StateReport`].
    pub fn dump_state(&self) -> String {
        self.report().to_string()
    }
}
