use powersoftau::{ceremony, Accumulator, CeremonyParameters};
use setup_utils::{blank_hash, calculate_hash, derive_rng_from_seed, CheckForCorrectness, Error, UseCompression};

use ark_bls12_377::Bls12_377;
use ark_bn254::Bn254;
use ark_ec::AffineRepr;
use setup_utils::PairingCurve;

fn full_round<E: PairingCurve>(power: usize, batch_size: usize) {
    let parameters = CeremonyParameters::<E>::new(power, batch_size).unwrap();

    let mut challenge = Vec::new();
    let challenge_hash = ceremony::new_challenge(&mut challenge, &parameters).unwrap();
    assert_eq!(challenge.len(), parameters.accumulator_size);

    let mut response = Vec::new();
    let hashes = ceremony::contribute(
        challenge.as_slice(),
        &mut response,
        CheckForCorrectness::Full,
        &mut derive_rng_from_seed(b"test"),
        &parameters,
    )
    .unwrap();
    assert_eq!(hashes.challenge_hash, challenge_hash);
    assert_eq!(response.len(), parameters.contribution_size);

    let verified = ceremony::verify_transform(
        challenge.as_slice(),
        response.as_slice(),
        CheckForCorrectness::Full,
        &parameters,
    )
    .unwrap();
    assert_eq!(verified.response_hash, calculate_hash(&response));

    let accumulator = &verified.accumulator;
    assert_eq!(accumulator.tau_powers_g1.len(), parameters.powers_g1_length);
    assert_eq!(accumulator.tau_powers_g2.len(), parameters.powers_length);
    assert_eq!(accumulator.alpha_tau_powers_g1.len(), parameters.powers_length);
    assert_eq!(accumulator.beta_tau_powers_g1.len(), parameters.powers_length);
    assert_eq!(accumulator.tau_powers_g1[0], E::G1Affine::generator());

    // the next challenge decodes back to the verified accumulator
    let mut new_challenge = Vec::new();
    ceremony::write_challenge(&mut new_challenge, accumulator, verified.response_hash.as_ref()).unwrap();
    assert_eq!(new_challenge.len(), parameters.accumulator_size);
    assert_eq!(&new_challenge[..64], calculate_hash(&response).as_slice());
    let decoded = Accumulator::deserialize(
        &mut &new_challenge[64..],
        UseCompression::No,
        CheckForCorrectness::Full,
        &parameters,
    )
    .unwrap();
    assert_eq!(&decoded, accumulator);
}

#[test]
fn test_four_powers_bn254() {
    let parameters = CeremonyParameters::<Bn254>::new(2, 256).unwrap();
    assert_eq!(parameters.powers_g1_length, 7);
    assert_eq!(parameters.powers_length, 4);
    full_round::<Bn254>(2, 256);
}

#[test]
fn test_small_batches() {
    full_round::<Bn254>(3, 1);
    full_round::<Bls12_377>(2, 3);
}

fn respond(challenge: &[u8], seed: &[u8], parameters: &CeremonyParameters<Bn254>) -> Vec<u8> {
    let mut response = Vec::new();
    ceremony::contribute(
        challenge,
        &mut response,
        CheckForCorrectness::Full,
        &mut derive_rng_from_seed(seed),
        parameters,
    )
    .unwrap();
    response
}

#[test]
fn test_seeded_contribution_is_reproducible() {
    let parameters = CeremonyParameters::<Bn254>::new(2, 256).unwrap();
    let mut challenge = Vec::new();
    ceremony::new_challenge(&mut challenge, &parameters).unwrap();

    assert_eq!(
        respond(&challenge, b"test", &parameters),
        respond(&challenge, b"test", &parameters)
    );
    assert_ne!(
        respond(&challenge, b"test", &parameters),
        respond(&challenge, b"other", &parameters)
    );
}

#[test]
fn test_corrupted_response_is_rejected() {
    let parameters = CeremonyParameters::<Bn254>::new(2, 256).unwrap();
    let mut challenge = Vec::new();
    ceremony::new_challenge(&mut challenge, &parameters).unwrap();
    let response = respond(&challenge, b"test", &parameters);

    // every byte after the hash prefix belongs to a point, so flipping its
    // highest or lowest bit must be caught while decoding or by a pairing check
    for position in 64..response.len() {
        for bit in [0x80u8, 0x01] {
            let mut corrupted = response.clone();
            corrupted[position] ^= bit;
            let result = ceremony::verify_transform(
                challenge.as_slice(),
                corrupted.as_slice(),
                CheckForCorrectness::Full,
                &parameters,
            );
            assert!(
                result.is_err(),
                "flipping bit {:#x} of byte {} was accepted",
                bit,
                position
            );
        }
    }

    // a response to some other challenge
    let mut other = response.clone();
    other[..64].copy_from_slice(blank_hash().as_slice());
    let err = ceremony::verify_transform(challenge.as_slice(), other.as_slice(), CheckForCorrectness::Full, &parameters)
        .unwrap_err();
    assert!(matches!(err, Error::HashChainMismatch));
}
