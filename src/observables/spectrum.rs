use nalgebra::{DMatrix, SymmetricEigen};

use crate::model::IsingModel;

impl IsingModel {
    /// Largest eigenvalue of `-J`.
    ///
    /// Full symmetric eigen-decomposition, O(N^3). Meant for parameter setup
    /// (e.g. sizing the pinning parameter), not for per-step use.
    pub fn largest_eigenvalue(&self) -> f64 {
        let n = self.n_nodes();
        let neg = DMatrix::from_row_slice(n, n, &self.couplings).map(|j| -j);
        let eigen = SymmetricEigen::new(neg);
        eigen
            .eigenvalues
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{IsingModel, LinearBiases, Node, QuadraticBiases};

    #[test]
    fn test_two_node_eigenvalue() {
        // -J = [[0, 3], [3, 0]] has eigenvalues ±3
        let quadratic: QuadraticBiases = [((Node::from(0), Node::from(1)), -3.0)].into();
        let m = IsingModel::new(&LinearBiases::new(), &quadratic).unwrap();
        assert!((m.largest_eigenvalue() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_complete_graph_eigenvalue() {
        // J = -(1 1^T - I) on K_n, so -J has top eigenvalue n - 1
        let n = 6;
        let mut quadratic = QuadraticBiases::new();
        for i in 0..n {
            for j in i + 1..n {
                quadratic.insert((Node::from(i), Node::from(j)), -1.0);
            }
        }
        let m = IsingModel::new(&LinearBiases::new(), &quadratic).unwrap();
        assert!((m.largest_eigenvalue() - (n as f64 - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_isolated_node() {
        let linear: LinearBiases = [(Node::from("solo"), 1.0)].into();
        let m = IsingModel::new(&linear, &QuadraticBiases::new()).unwrap();
        assert_eq!(m.largest_eigenvalue(), 0.0);
    }
}
