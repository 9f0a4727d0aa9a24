use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

// The engine only draws randomness while laying out the digits of a fresh
// board, so the RNG is passed to the constructors instead of living in the
// game state. Tests substitute deterministic implementations.
pub trait LayoutRng {
    fn shuffle_digits(&mut self, digits: &mut [u8]);
}

#[derive(Debug)]
pub struct BoardRng {
    rng: StdRng,
}

impl BoardRng {
    pub fn from_seed(seed: u64) -> Self {
        BoardRng {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for BoardRng {
    fn default() -> Self {
        let rng = StdRng::from_rng(rand::thread_rng()).unwrap();
        BoardRng { rng }
    }
}

impl LayoutRng for BoardRng {
    fn shuffle_digits(&mut self, digits: &mut [u8]) {
        digits.shuffle(&mut self.rng);
    }
}
