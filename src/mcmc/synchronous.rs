use crate::model::{IsingModel, Spin};
use crate::observables::local_fields;
use crate::parallel::{par_over_partitions, partition};
use crate::rng::RandomSource;

/// Whole-vector update rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SyncRule {
    /// `sign(h_i + q s_i - T L_i)`, `L_i` logistic.
    Sca,
    /// `sign(h_i + q s_i - T E_i s'_i)`, `E_i` exponential, `s'` the previous layer.
    Ma,
    /// `sign(h_i + q s_i - T E_i s_i)`.
    Mma,
}

/// Noise term of node `i` under `rule`, drawn from the partition's generator.
#[inline]
fn noise(rule: SyncRule, rng: &mut RandomSource, spin: f64, previous: f64) -> f64 {
    match rule {
        SyncRule::Sca => rng.logistic(0.0, 1.0),
        SyncRule::Ma => rng.exponential(1.0) * previous,
        SyncRule::Mma => rng.exponential(1.0) * spin,
    }
}

/// One synchronous step of `rule` over every node.
///
/// All candidates are computed from the pre-step fields and spins. The node
/// range is split into `model.partitions` contiguous chunks, each with a
/// generator derived from the model's source on the calling thread. Within a
/// chunk, node `i` draws its noise and then, only when the flip-trial rate is
/// below 1, one Bernoulli deciding whether the candidate is adopted.
///
/// Afterwards `previous_spins` holds the pre-step configuration.
pub(crate) fn synchronous_step(model: &mut IsingModel, rule: SyncRule) {
    let n = model.n_nodes();
    let fields = local_fields(&model.couplings, &model.field, &model.spins);
    let old = &model.spins;
    let previous = &model.previous_spins;
    let pinning = model.pinning;
    let temperature = model.temperature;
    let rate = model.flip_trial_rate;

    let (chunk_len, n_chunks) = partition(n, model.partitions);
    let mut rngs = model.rng.split(n_chunks);
    let mut next = vec![0i8; n];

    par_over_partitions(
        &mut next,
        &mut rngs,
        chunk_len,
        model.sequential,
        |start, chunk, rng| {
            for (k, slot) in chunk.iter_mut().enumerate() {
                let i = start + k;
                let si = old[i] as f64;
                let eta = noise(rule, rng, si, previous[i] as f64);
                let candidate = Spin::from_sign(fields[i] + pinning * si - temperature * eta);
                *slot = if rate >= 1.0 || rng.bernoulli(rate) {
                    candidate.value()
                } else {
                    old[i]
                };
            }
        },
    );

    model.previous_spins = std::mem::replace(&mut model.spins, next);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Algorithm, InitialSpins};
    use crate::model::{LinearBiases, Node, QuadraticBiases};

    fn random_model(n: usize, seed: u64) -> IsingModel {
        let mut rng = RandomSource::new(Some(seed));
        let mut quadratic = QuadraticBiases::new();
        for i in 0..n {
            for j in i + 1..n {
                quadratic.insert(
                    (Node::from(i), Node::from(j)),
                    if rng.bernoulli(0.5) { 1.0 } else { -1.0 },
                );
            }
        }
        let linear: LinearBiases = (0..n)
            .map(|i| (Node::from(i), rng.uniform01() - 0.5))
            .collect();
        let mut m = IsingModel::new(&linear, &quadratic).unwrap();
        m.set_seed(Some(seed));
        m.initialize_spins(InitialSpins::Uniform);
        m
    }

    #[test]
    fn test_sca_matches_manual_rederivation() {
        let n = 37;
        let mut m = random_model(n, 17);
        m.set_partitions(5);
        m.set_temperature(0.8);
        m.set_pinning_parameter(1.5);

        let old = m.spins.clone();
        let fields = m.local_field_vector();
        let mut rng_copy = m.rng.clone();

        synchronous_step(&mut m, SyncRule::Sca);

        let (chunk_len, n_chunks) = partition(n, 5);
        let mut workers = rng_copy.split(n_chunks);
        let mut expected = vec![0i8; n];
        for i in 0..n {
            let eta = workers[i / chunk_len].logistic(0.0, 1.0);
            let x = fields[i] + 1.5 * old[i] as f64 - 0.8 * eta;
            expected[i] = if x < 0.0 { -1 } else { 1 };
        }
        assert_eq!(m.spins, expected);
        assert_eq!(m.previous_spins, old);
    }

    #[test]
    fn test_sequential_matches_parallel() {
        for rule in [SyncRule::Sca, SyncRule::Ma, SyncRule::Mma] {
            let mut a = random_model(50, 4);
            let mut b = random_model(50, 4);
            a.set_sequential(true);
            for m in [&mut a, &mut b] {
                m.set_temperature(1.0);
                m.set_pinning_parameter(0.5);
                m.set_flip_trial_rate(0.7).unwrap();
            }
            for _ in 0..20 {
                synchronous_step(&mut a, rule);
                synchronous_step(&mut b, rule);
                assert_eq!(a.spins, b.spins, "{rule:?}");
                assert_eq!(a.previous_spins, b.previous_spins, "{rule:?}");
            }
        }
    }

    #[test]
    fn test_zero_temperature_is_deterministic_sign() {
        let mut m = random_model(20, 8);
        m.set_pinning_parameter(0.25);
        let old = m.spins.clone();
        let fields = m.local_field_vector();
        synchronous_step(&mut m, SyncRule::Sca);
        for i in 0..20 {
            let x = fields[i] + 0.25 * old[i] as f64;
            assert_eq!(m.spins[i], Spin::from_sign(x).value());
        }
    }

    #[test]
    fn test_zero_field_zero_temperature_gives_up() {
        let linear: LinearBiases = [(Node::from(0), 0.0), (Node::from(1), 0.0)].into();
        let mut m = IsingModel::new(&linear, &QuadraticBiases::new()).unwrap();
        m.initialize_spins(InitialSpins::AllDown);
        synchronous_step(&mut m, SyncRule::Sca);
        assert_eq!(m.spins, vec![1, 1]);
    }

    #[test]
    fn test_ma_noise_uses_previous_layer() {
        // with T huge the noise term dominates: MA moves to -s', MMA to -s
        let mut m = random_model(12, 2);
        m.set_temperature(1e9);
        m.previous_spins = m
            .spins
            .iter()
            .enumerate()
            .map(|(i, &s)| if i % 2 == 0 { s } else { -s })
            .collect();
        let before_prev = m.previous_spins.clone();
        let before = m.spins.clone();

        synchronous_step(&mut m, SyncRule::Ma);
        let flipped_prev: Vec<i8> = before_prev.iter().map(|&s| -s).collect();
        assert_eq!(m.spins, flipped_prev);
        assert_eq!(m.previous_spins, before);

        let before = m.spins.clone();
        synchronous_step(&mut m, SyncRule::Mma);
        let flipped: Vec<i8> = before.iter().map(|&s| -s).collect();
        assert_eq!(m.spins, flipped);
        assert_eq!(m.previous_spins, before);
    }

    #[test]
    fn test_zero_flip_trial_rate_freezes_spins() {
        let mut m = random_model(30, 6);
        m.set_temperature(5.0);
        m.set_flip_trial_rate(0.0).unwrap();
        let before = m.spins.clone();
        m.set_algorithm(Algorithm::Sca);
        for _ in 0..10 {
            m.update();
        }
        assert_eq!(m.spins, before);
        assert_eq!(m.previous_spins, before);
    }

    #[test]
    fn test_partial_flip_trial_rate_adopts_fraction() {
        // every candidate is Down, so the Down count is the adoption count
        let n = 2000;
        let linear: LinearBiases = (0..n).map(|i| (Node::from(i), -10.0)).collect();
        let mut m = IsingModel::new(&linear, &QuadraticBiases::new()).unwrap();
        m.set_seed(Some(31));
        m.initialize_spins(InitialSpins::AllUp);
        m.set_flip_trial_rate(0.3).unwrap();

        let mut rng_copy = m.rng.clone();
        synchronous_step(&mut m, SyncRule::Sca);

        let (chunk_len, n_chunks) = partition(n, m.partitions());
        let mut workers = rng_copy.split(n_chunks);
        let mut expected = vec![1i8; n];
        for (i, slot) in expected.iter_mut().enumerate() {
            let worker = &mut workers[i / chunk_len];
            worker.logistic(0.0, 1.0);
            if worker.bernoulli(0.3) {
                *slot = -1;
            }
        }
        assert_eq!(m.spins, expected);

        let adopted = m.spins.iter().filter(|&&s| s == -1).count() as f64 / n as f64;
        assert!((adopted - 0.3).abs() < 0.05, "adopted {adopted}");
        assert!(m.previous_spins.iter().all(|&s| s == 1));
    }
}
