//! Roll sources: the injectable `[0, 1)` capability used by pool building
//! and picking.
use hmac::{Hmac, Mac};
use rand::rngs::ThreadRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

/// Source of uniform rolls in `[0, 1)`.
///
/// Any `FnMut() -> f64` closure is a roll source, so `|| 0.5` can be passed
/// anywhere a source is expected.
pub trait RollSource {
    fn next_roll(&mut self) -> f64;
}

impl<F> RollSource for F
where
    F: FnMut() -> f64,
{
    fn next_roll(&mut self) -> f64 {
        self()
    }
}

/// Replays a fixed list of rolls, cycling back to the start once exhausted.
///
/// An empty list always yields `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceRng {
    values: Vec<f64>,
    cursor: usize,
    draws: u64,
}

impl SequenceRng {
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
            draws: 0,
        }
    }

    /// Number of rolls handed out so far.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl RollSource for SequenceRng {
    fn next_roll(&mut self) -> f64 {
        self.draws = self.draws.saturating_add(1);
        let Some(value) = self.values.get(self.cursor).copied() else {
            return 0.0;
        };
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

/// Build a roll source that replays `values` in order.
#[must_use]
pub fn create_sequence_rng(values: impl Into<Vec<f64>>) -> SequenceRng {
    SequenceRng::new(values)
}

/// Adapts any `rand` generator into a counting roll source.
#[derive(Debug, Clone)]
pub struct RngRolls<R> {
    rng: R,
    draws: u64,
}

impl<R: RngCore> RngRolls<R> {
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng, draws: 0 }
    }

    /// Number of rolls drawn from the wrapped generator.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RollSource for RngRolls<R> {
    fn next_roll(&mut self) -> f64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.r#gen::<f64>()
    }
}

/// Seed-stable rolls for replays and reports.
pub type SeededRolls = RngRolls<ChaCha20Rng>;

impl SeededRolls {
    /// Construct a roll stream from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(derive_stream_seed(seed, b"faction-roll")))
    }
}

/// Rolls backed by the thread-local OS-seeded generator.
#[must_use]
pub fn thread_rolls() -> RngRolls<ThreadRng> {
    RngRolls::new(rand::thread_rng())
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0_u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}
