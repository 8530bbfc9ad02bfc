use rand::distributions::Open01;
use rand::{Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Seedable random source shared by every update rule of one model.
///
/// Wraps a single `Xoshiro256StarStar` stream. Parallel steps never touch this
/// generator from worker threads; they call [`RandomSource::split`] on the
/// calling thread and hand each partition its own private source.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: Xoshiro256StarStar,
}

impl RandomSource {
    /// Seed deterministically from `seed`, or from OS entropy when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => Xoshiro256StarStar::seed_from_u64(s),
            None => Xoshiro256StarStar::from_entropy(),
        };
        Self { rng }
    }

    /// Uniform index in `[0, n)`; always 0 when `n == 0`.
    pub fn uniform_int(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// `true` with probability `p`, clamped to `[0, 1]`. NaN counts as 0.
    pub fn bernoulli(&mut self, p: f64) -> bool {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        self.rng.gen_bool(p)
    }

    /// Uniform real in `[0, 1)`.
    pub fn uniform01(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Exponential draw with the given `rate` (> 0), by inverse CDF.
    pub fn exponential(&mut self, rate: f64) -> f64 {
        let u: f64 = self.rng.sample(Open01);
        -u.ln() / rate
    }

    /// Logistic draw: `loc + scale * ln(u / (1 - u))` with `u` in `(0, 1)`.
    pub fn logistic(&mut self, loc: f64, scale: f64) -> f64 {
        let u: f64 = self.rng.sample(Open01);
        loc + scale * (u / (1.0 - u)).ln()
    }

    /// Uniformly chosen element, `None` for an empty population.
    pub fn choice<'a, T>(&mut self, population: &'a [T]) -> Option<&'a T> {
        if population.is_empty() {
            return None;
        }
        population.get(self.uniform_int(population.len()))
    }

    /// Derive `n` independent sources, one per worker partition.
    ///
    /// Advances this source by exactly `n` draws, so the derived seeds depend
    /// only on this source's state and never on thread scheduling.
    pub fn split(&mut self, n: usize) -> Vec<RandomSource> {
        (0..n)
            .map(|_| Self {
                rng: Xoshiro256StarStar::seed_from_u64(self.rng.next_u64()),
            })
            .collect()
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new(None)
    }
}
