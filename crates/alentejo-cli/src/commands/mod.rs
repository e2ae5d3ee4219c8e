//! CLI command implementations

pub mod heightfield;
pub mod terrain;
pub mod texture;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded generator when a seed is given, OS entropy otherwise
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
