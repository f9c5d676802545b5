use std::time::{SystemTime, UNIX_EPOCH};

use ndarray_rand::rand::{rngs::StdRng, SeedableRng};

/// Create the generator used to initialize every layer.
///
/// Build it once at startup and hand it to each [`Dense::new`](crate::layer::Dense::new).
/// Without an explicit `seed` it is seeded from the current clock reading.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(clock_seed);
    log::debug!("seeding layer initialization with {seed}");
    StdRng::seed_from_u64(seed)
}

fn clock_seed() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    now.as_secs() ^ u64::from(now.subsec_nanos()).rotate_left(32)
}
