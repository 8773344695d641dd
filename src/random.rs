use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the coordinates drawn while placing and relocating mines.
pub trait MineSource {
    /// Returns a value in `0..bound`. `bound` is never zero.
    fn pick(&mut self, bound: usize) -> usize;
}

impl<S: MineSource + ?Sized> MineSource for Box<S> {
    fn pick(&mut self, bound: usize) -> usize { (**self).pick(bound) }
}

/// Uniform draws from any `rand` generator.
#[derive(Clone, Debug)]
pub struct RngSource<R> { rng: R }

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self { Self { rng } }
}

impl RngSource<StdRng> {
    /// Seed 0 asks for an entropy-seeded generator.
    pub fn from_seed(seed: u64) -> Self {
        let rng = if seed == 0 { StdRng::from_rng(&mut rand::rng()) } else { StdRng::seed_from_u64(seed) };
        Self { rng }
    }
}

impl<R: Rng> MineSource for RngSource<R> {
    fn pick(&mut self, bound: usize) -> usize { self.rng.random_range(0..bound) }
}

/// Replays a fixed list of values, wrapping around at the end. Each value is reduced modulo the
/// requested bound.
#[derive(Clone, Debug)]
pub struct SequenceSource {
    values: Vec<usize>,
    pos: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<usize>) -> Self { Self { values, pos: 0 } }
}

impl MineSource for SequenceSource {
    fn pick(&mut self, bound: usize) -> usize {
        if self.values.is_empty() { return 0; }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v % bound
    }
}
