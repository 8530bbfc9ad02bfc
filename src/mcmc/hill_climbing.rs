use log::trace;

use crate::observables::local_fields;

/// Steepest-descent local search over single spin flips.
///
/// Each pass scans every node for the flip with the most negative energy
/// change `2 s_i h_i` (lowest index wins ties) and applies only that flip.
/// Stops when no flip lowers the energy, or after `limit` flips.
///
/// Local fields are kept in sync incrementally, so a pass costs O(N).
/// Returns the number of flips applied.
pub(crate) fn hill_climb(
    couplings: &[f64],
    field: &[f64],
    spins: &mut [i8],
    limit: Option<usize>,
) -> usize {
    let n = spins.len();
    let mut fields = local_fields(couplings, field, spins);
    let mut n_flips = 0usize;

    loop {
        if limit.is_some_and(|l| n_flips >= l) {
            break;
        }

        let mut best_change = 0.0f64;
        let mut best_node = None;
        for i in 0..n {
            let eng_change = 2.0 * spins[i] as f64 * fields[i];
            if eng_change < best_change {
                best_change = eng_change;
                best_node = Some(i);
            }
        }

        let Some(i) = best_node else {
            break;
        };

        let new = -spins[i];
        spins[i] = new;
        let delta = 2.0 * new as f64;
        for (k, h) in fields.iter_mut().enumerate() {
            *h += couplings[k * n + i] * delta;
        }
        n_flips += 1;
        trace!("hill climbing: flip {i}, dE = {best_change}");
    }

    n_flips
}
