use crate::observables::local_field_at;
use crate::rng::RandomSource;

/// Logistic function that stays finite for any input, including ±inf.
#[inline]
pub(crate) fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// One Metropolis move on a uniformly chosen node.
///
/// `ΔE = 2 s_i h_i`; improving moves are always taken, others with
/// probability `exp(-ΔE / T)`. At `T <= 0` non-improving moves are never taken.
pub(crate) fn metropolis_step(
    couplings: &[f64],
    field: &[f64],
    spins: &mut [i8],
    temperature: f64,
    rng: &mut RandomSource,
) {
    let i = rng.uniform_int(spins.len());
    let h = local_field_at(couplings, field, spins, i);
    let eng_change = 2.0 * spins[i] as f64 * h;
    if eng_change < 0.0 {
        spins[i] = -spins[i];
    } else if temperature > 0.0 && rng.bernoulli((-eng_change / temperature).exp()) {
        spins[i] = -spins[i];
    }
}

/// One Glauber (heat-bath) move on a uniformly chosen node.
///
/// The node is set Up with probability `1 / (1 + exp(-2 h_i / T))`. At
/// `T <= 0` this is a step function of `h_i`, with a fair coin at `h_i = 0`.
pub(crate) fn glauber_step(
    couplings: &[f64],
    field: &[f64],
    spins: &mut [i8],
    temperature: f64,
    rng: &mut RandomSource,
) {
    let i = rng.uniform_int(spins.len());
    let h = local_field_at(couplings, field, spins, i);
    let x = if temperature > 0.0 {
        2.0 * h / temperature
    } else if h > 0.0 {
        f64::INFINITY
    } else if h < 0.0 {
        f64::NEG_INFINITY
    } else {
        0.0
    };
    spins[i] = if rng.bernoulli(sigmoid(x)) { 1 } else { -1 };
}
