use rayon::prelude::*;

use crate::rng::RandomSource;

/// Dispatch a per-partition closure over contiguous chunks of `out`,
/// optionally in parallel.
///
/// Chunk `k` covers `out[k * chunk_len ..]` and is paired with `rngs[k]`; the
/// closure receives `(start_index, chunk, rng)`. Each task owns a disjoint
/// output slice and a private generator, so the result does not depend on
/// scheduling and is identical with `sequential` set.
///
/// When `sequential` is true, partitions are processed on the current thread
/// (no rayon overhead, best for small models).
pub fn par_over_partitions(
    out: &mut [i8],
    rngs: &mut [RandomSource],
    chunk_len: usize,
    sequential: bool,
    body: impl Fn(usize, &mut [i8], &mut RandomSource) + Send + Sync,
) {
    debug_assert!(chunk_len > 0);
    debug_assert!(rngs.len() * chunk_len >= out.len());

    if sequential {
        out.chunks_mut(chunk_len)
            .zip(rngs.iter_mut())
            .enumerate()
            .for_each(|(k, (chunk, rng))| body(k * chunk_len, chunk, rng));
    } else {
        out.par_chunks_mut(chunk_len)
            .zip(rngs.par_iter_mut())
            .enumerate()
            .for_each(|(k, (chunk, rng))| body(k * chunk_len, chunk, rng));
    }
}

/// Split `n` items into at most `partitions` contiguous chunks.
///
/// Returns `(chunk_len, n_chunks)`.
pub fn partition(n: usize, partitions: usize) -> (usize, usize) {
    let chunk_len = n.div_ceil(partitions.max(1)).max(1);
    (chunk_len, n.div_ceil(chunk_len))
}
