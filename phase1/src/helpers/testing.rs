use crate::{keypair, Accumulator, CeremonyParameters, PublicKey};
use setup_utils::*;

use ark_ec::{AffineRepr, CurveGroup};
use ark_std::UniformRand;

use rand::{thread_rng, Rng};

/// Returns a random affine curve point from the provided RNG.
pub fn random_point<C: AffineRepr>(rng: &mut impl Rng) -> C {
    C::Group::rand(rng).into_affine()
}

/// Returns a random affine curve point vector from the provided RNG.
pub fn random_point_vec<C: AffineRepr>(size: usize, rng: &mut impl Rng) -> Vec<C> {
    (0..size).map(|_| random_point(rng)).collect()
}

/// Helper for testing verification of a transformation.
/// It creates an initial accumulator and contributes to it with a key derived
/// from `seed`; the test must call verify on the returned values.
pub fn setup_verify<'a, E: PairingCurve>(
    parameters: &'a CeremonyParameters<E>,
    seed: &[u8],
) -> (Accumulator<'a, E>, Accumulator<'a, E>, PublicKey<E>, GenericArray<u8, U64>) {
    let before = Accumulator::new(parameters);
    let mut output = Vec::new();
    before.serialize(&mut output, UseCompression::No).unwrap();
    let digest = calculate_hash(&output);

    // Construct our keypair
    let mut rng = derive_rng_from_seed(seed);
    let (pubkey, privkey) = keypair::<E, _>(&mut rng, digest.as_ref()).expect("could not generate keypair");

    // transform the accumulator
    let mut after = before.clone();
    after.transform(&privkey).unwrap();
    // ensure that the key is not available to the verifier
    drop(privkey);

    (before, after, pubkey, digest)
}

/// Helper to generate a random accumulator given its parameters, along with
/// its serialized form.
pub fn generate_random_accumulator<E: PairingCurve>(
    parameters: &CeremonyParameters<E>,
    compressed: UseCompression,
) -> (Vec<u8>, Accumulator<E>) {
    let rng = &mut thread_rng();
    let acc = Accumulator {
        tau_powers_g1: random_point_vec(parameters.powers_g1_length, rng),
        tau_powers_g2: random_point_vec(parameters.powers_length, rng),
        alpha_tau_powers_g1: random_point_vec(parameters.powers_length, rng),
        beta_tau_powers_g1: random_point_vec(parameters.powers_length, rng),
        beta_g2: random_point(rng),
        parameters,
    };
    let mut buf = Vec::with_capacity(parameters.get_length(compressed));
    acc.serialize(&mut buf, compressed).unwrap();
    (buf, acc)
}
