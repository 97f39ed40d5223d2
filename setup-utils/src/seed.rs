use blake2s_simd::Params;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

/// BLAKE2s personalization used when expanding a seed into an RNG state.
pub const SEED_PERSONALIZATION: &[u8] = b"PTAUSEED";

/// Expands arbitrary seed material into a ChaCha20 RNG.
pub fn derive_rng_from_seed(seed: &[u8]) -> ChaChaRng {
    let seed_hash = Params::new()
        .personal(SEED_PERSONALIZATION)
        .to_state()
        .update(seed)
        .finalize();
    ChaChaRng::from_seed(*seed_hash.as_array())
}
