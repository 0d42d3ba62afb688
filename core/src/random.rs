use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Reproducible stream of uniform draws feeding the fracture operators.
// Operators document the order in which they pull from it.
pub trait RandomSource {
    // Uniform float in [0, 1)
    fn float64(&mut self) -> f64;

    // Uniform integer in [0, n). `n` must be positive.
    fn intn(&mut self, n: usize) -> usize;

    // Fair coin
    fn coin(&mut self) -> bool {
        self.intn(2) == 0
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn float64(&mut self) -> f64 {
        (**self).float64()
    }

    fn intn(&mut self, n: usize) -> usize {
        (**self).intn(n)
    }
}

// ChaCha8 backed source, identical output for identical seeds on every platform
pub struct SeededRandom {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn float64(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    fn intn(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "intn needs a positive bound");
        self.rng.gen_range(0..n.max(1))
    }
}
