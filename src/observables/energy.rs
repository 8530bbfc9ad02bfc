use crate::model::{IsingModel, Node};

/// Local field at node `i`: `(row i of J) · s + h_i`.
///
/// `couplings`: row-major `n * n`, `spins`: length `n`, +1/−1.
#[inline]
pub(crate) fn local_field_at(couplings: &[f64], field: &[f64], spins: &[i8], i: usize) -> f64 {
    let n = spins.len();
    let row = &couplings[i * n..(i + 1) * n];
    let mut h = field[i];
    for (&j, &s) in row.iter().zip(spins.iter()) {
        h += j * s as f64;
    }
    h
}

/// Local field of every node, `J s + h`.
pub(crate) fn local_fields(couplings: &[f64], field: &[f64], spins: &[i8]) -> Vec<f64> {
    (0..spins.len())
        .map(|i| local_field_at(couplings, field, spins, i))
        .collect()
}

/// Standard Hamiltonian `-s^T (J s / 2 + h)`.
pub(crate) fn standard_energy(couplings: &[f64], field: &[f64], spins: &[i8]) -> f64 {
    let n = spins.len();
    let mut total = 0.0f64;
    for i in 0..n {
        let si = spins[i] as f64;
        let row = &couplings[i * n..(i + 1) * n];
        let mut js = 0.0f64;
        for (&j, &s) in row.iter().zip(spins.iter()) {
            js += j * s as f64;
        }
        total -= si * (0.5 * js + field[i]);
    }
    total
}

/// Hamiltonian of the two-layer system formed by `spins` and `previous`:
///
/// `-s^T J s / 2 - h · (s + s') / 2 + q (N - s · s') / 2`
pub(crate) fn bipartite_energy(
    couplings: &[f64],
    field: &[f64],
    spins: &[i8],
    previous: &[i8],
    pinning: f64,
) -> f64 {
    let n = spins.len();
    let mut quadratic = 0.0f64;
    let mut linear = 0.0f64;
    let mut overlap = 0i64;
    for i in 0..n {
        let si = spins[i] as f64;
        let row = &couplings[i * n..(i + 1) * n];
        let mut js = 0.0f64;
        for (&j, &s) in row.iter().zip(spins.iter()) {
            js += j * s as f64;
        }
        quadratic += si * js;
        linear += field[i] * (spins[i] as f64 + previous[i] as f64);
        overlap += spins[i] as i64 * previous[i] as i64;
    }
    -0.5 * quadratic - 0.5 * linear + 0.5 * pinning * (n as i64 - overlap) as f64
}

impl IsingModel {
    /// Local field at `node` under the current configuration.
    pub fn local_field(&self, node: &Node) -> Option<f64> {
        self.index_of(node)
            .map(|i| local_field_at(&self.couplings, &self.field, &self.spins, i))
    }

    /// Local field of every node, in canonical index order.
    pub fn local_field_vector(&self) -> Vec<f64> {
        local_fields(&self.couplings, &self.field, &self.spins)
    }

    /// Standard Hamiltonian of the current configuration.
    pub fn energy(&self) -> f64 {
        standard_energy(&self.couplings, &self.field, &self.spins)
    }

    /// Hamiltonian of the (current, previous) pair used by SCA, MA and MMA.
    pub fn energy_on_bipartite_graph(&self) -> f64 {
        bipartite_energy(
            &self.couplings,
            &self.field,
            &self.spins,
            &self.previous_spins,
            self.pinning,
        )
    }

    /// The energy variant matching the active algorithm.
    pub fn algorithm_energy(&self) -> f64 {
        if self.algorithm.uses_bipartite_energy() {
            self.energy_on_bipartite_graph()
        } else {
            self.energy()
        }
    }

    /// Mean spin.
    pub fn magnetization(&self) -> f64 {
        let sum: i64 = self.spins.iter().map(|&s| s as i64).sum();
        sum as f64 / self.n_nodes() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Algorithm, InitialSpins};
    use crate::model::{LinearBiases, QuadraticBiases};
    use std::collections::BTreeMap;

    fn triangle() -> IsingModel {
        let linear: LinearBiases = [(Node::from(0), 0.5), (Node::from(2), -1.0)].into();
        let quadratic: QuadraticBiases = [
            ((Node::from(0), Node::from(1)), 1.0),
            ((Node::from(0), Node::from(2)), -2.0),
            ((Node::from(1), Node::from(2)), 0.25),
        ]
        .into();
        IsingModel::new(&linear, &quadratic).unwrap()
    }

    #[test]
    fn test_local_field() {
        let m = triangle();
        // all up: h_0 = 1 - 2 + 0.5
        assert!((m.local_field(&Node::from(0)).unwrap() + 0.5).abs() < 1e-12);
        assert!((m.local_field(&Node::from(1)).unwrap() - 1.25).abs() < 1e-12);
        assert!((m.local_field(&Node::from(2)).unwrap() + 2.75).abs() < 1e-12);
        assert_eq!(m.local_field(&Node::from(7)), None);
        assert_eq!(m.local_field_vector().len(), 3);
    }

    #[test]
    fn test_energy_matches_pair_sum() {
        let mut m = triangle();
        let values: BTreeMap<Node, i64> = [(Node::from(1), -1)].into();
        m.set_spins(&values).unwrap();
        let s = [1.0, -1.0, 1.0];
        let j = [[0.0, 1.0, -2.0], [1.0, 0.0, 0.25], [-2.0, 0.25, 0.0]];
        let h = [0.5, 0.0, -1.0];
        let mut expected = 0.0;
        for a in 0..3 {
            expected -= h[a] * s[a];
            for b in a + 1..3 {
                expected -= j[a][b] * s[a] * s[b];
            }
        }
        assert!((m.energy() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_all_up_closed_form() {
        let mut m = triangle();
        m.initialize_spins(InitialSpins::AllUp);
        let expected = -(0.5 - 1.0) - (1.0 - 2.0 + 0.25);
        assert!((m.energy() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_bipartite_equals_standard_when_layers_agree() {
        // with s == s' the pinning term vanishes and the field term is h·s
        let mut m = triangle();
        m.set_pinning_parameter(5.0);
        m.initialize_spins(InitialSpins::AllDown);
        assert!((m.energy_on_bipartite_graph() - m.energy()).abs() < 1e-12);
    }

    #[test]
    fn test_bipartite_pinning_term() {
        let mut m = triangle();
        m.set_pinning_parameter(2.0);
        m.previous_spins = vec![1, -1, -1];
        m.spins = vec![1, 1, 1];
        // quadratic: -(1 - 2 + 0.25) ; linear: -0.5 * (0.5*2 + 0 + -1*0) ; pinning: 0.5*2*(3-(-1))
        let expected = 0.75 - 0.5 + 4.0;
        assert!((m.energy_on_bipartite_graph() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_algorithm_energy_dispatch() {
        let mut m = triangle();
        m.set_pinning_parameter(1.0);
        m.previous_spins = vec![-1, -1, -1];
        m.set_algorithm(Algorithm::Glauber);
        assert_eq!(m.algorithm_energy(), m.energy());
        m.set_algorithm(Algorithm::Ma);
        assert_eq!(m.algorithm_energy(), m.energy_on_bipartite_graph());
    }

    #[test]
    fn test_magnetization() {
        let mut m = triangle();
        assert_eq!(m.magnetization(), 1.0);
        m.initialize_spins(InitialSpins::AllDown);
        assert_eq!(m.magnetization(), -1.0);
    }
}
