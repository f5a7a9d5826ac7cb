//! Seed resolution and deterministic math.

use rand::Rng;

/// Exclusive upper bound of generated seeds.
pub const GENERATED_SEED_LIMIT: i64 = 1_000_000;

/// Draw a fresh seed from OS entropy, in `0..GENERATED_SEED_LIMIT`.
pub fn generate_seed() -> i64 {
    rand::rng().random_range(0..GENERATED_SEED_LIMIT)
}

/// Use the configured seed, or generate one.
pub fn resolve_seed(configured: Option<i64>) -> i64 {
    configured.unwrap_or_else(generate_seed)
}

/// Deterministic sine using libm (not platform libc).
#[inline]
pub fn det_sin(x: f64) -> f64 {
    libm::sin(x)
}

/// Deterministic cosine using libm.
#[inline]
pub fn det_cos(x: f64) -> f64 {
    libm::cos(x)
}
