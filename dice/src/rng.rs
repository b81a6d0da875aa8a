//! Random sources used to roll dice.
//!
//! Evaluation never reaches for a hidden generator: every roll takes a
//! `&dyn RandomSource`. The process-wide [`global`] source exists for callers
//! that don't care about determinism.

use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform integer source shared across threads.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `[0, n)`. `n == 0` yields 0.
    fn next_in_range(&self, n: u32) -> u32;

    /// One face of an `sides`-sided die, in `[1, sides]` (0 for a zero-sided die).
    fn face(&self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.next_in_range(sides) + 1
    }
}

/// ChaCha-backed source; the mutex keeps concurrent rolls from tearing its state.
pub struct SeededSource {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Seed from the wall clock's nanoseconds.
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        tracing::debug!(seed, "seeding dice source from clock");
        Self::from_seed(seed)
    }
}

impl RandomSource for SeededSource {
    fn next_in_range(&self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.lock().gen_range(0..n)
    }
}

static GLOBAL: OnceLock<SeededSource> = OnceLock::new();

/// Process-wide source, seeded from the clock the first time it is touched.
pub fn global() -> &'static SeededSource {
    GLOBAL.get_or_init(SeededSource::from_time)
}

/// Replays a fixed list of 1-based faces, cycling when it runs out.
///
/// Each face is clamped to the die being rolled, so `from_scripted(vec![20])`
/// on a d6 draws 6. An empty script always draws the lowest face.
pub struct ScriptedSource {
    faces: Vec<u32>,
    cursor: Mutex<usize>,
}

impl ScriptedSource {
    pub fn from_scripted(faces: Vec<u32>) -> Self {
        Self {
            faces,
            cursor: Mutex::new(0),
        }
    }

    /// Number of draws served so far.
    pub fn draws(&self) -> usize {
        *self.cursor.lock()
    }
}

impl RandomSource for ScriptedSource {
    fn next_in_range(&self, n: u32) -> u32 {
        let mut cursor = self.cursor.lock();
        let face = if self.faces.is_empty() {
            1
        } else {
            self.faces[*cursor % self.faces.len()]
        };
        *cursor += 1;
        face.saturating_sub(1).min(n.saturating_sub(1))
    }
}
