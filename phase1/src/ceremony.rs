//! The steps of a ceremony over challenge and response streams.
//!
//! A challenge is `[previous hash][uncompressed accumulator]` and a response is
//! `[challenge hash][compressed accumulator][uncompressed public key]`, where each
//! hash is the BLAKE2b digest of the complete file it refers to.
use crate::{keypair, Accumulator, CeremonyParameters, PublicKey};
use setup_utils::{
    beacon_randomness, blank_hash, ensure_exhausted, get_rng, to_hex, CheckForCorrectness, Error, GenericArray,
    Groth16Params, HashReader, HashWriter, PairingCurve, Result, UseCompression, U64,
};

use rand::Rng;
use std::io::{self, Read, Write};
use tracing::{debug, info, info_span};

/// BLAKE2b-512 digest of a challenge or response file.
pub type Hash = GenericArray<u8, U64>;

/// The digests produced by a contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionHashes {
    /// Hash of the challenge which was transformed
    pub challenge_hash: Hash,
    /// Hash of the response which was written
    pub response_hash: Hash,
}

/// An accumulator which passed verification, ready to be written as the next challenge.
#[derive(Debug)]
pub struct VerifiedTransform<'a, E: PairingCurve> {
    pub accumulator: Accumulator<'a, E>,
    pub challenge_hash: Hash,
    pub response_hash: Hash,
}

/// Writes the genesis challenge and returns its hash.
pub fn new_challenge<W: Write, E: PairingCurve>(writer: W, parameters: &CeremonyParameters<E>) -> Result<Hash> {
    let span = info_span!("powersoftau-new");
    let _enter = span.enter();

    let accumulator = Accumulator::new(parameters);
    write_challenge(writer, &accumulator, blank_hash().as_ref())
}

/// Writes `[previous_hash][uncompressed accumulator]` and returns the hash of
/// everything written.
pub fn write_challenge<W: Write, E: PairingCurve>(
    writer: W,
    accumulator: &Accumulator<E>,
    previous_hash: &[u8],
) -> Result<Hash> {
    let hash_size = accumulator.parameters.hash_size;
    if previous_hash.len() != hash_size {
        return Err(Error::InvalidLength {
            expected: hash_size,
            got: previous_hash.len(),
        });
    }

    let mut writer = HashWriter::new(writer);
    writer.write_all(previous_hash)?;
    accumulator.serialize(&mut writer, UseCompression::No)?;
    writer.flush()?;

    let hash = writer.into_hash();
    info!("challenge written with hash {}", to_hex(hash.as_ref()));

    Ok(hash)
}

/// Reads a challenge, contributes fresh randomness from `rng` to it and writes
/// the response. The private key never leaves this function.
pub fn contribute<R: Read, W: Write, G: Rng, E: PairingCurve>(
    challenge: R,
    response: W,
    challenge_check: CheckForCorrectness,
    rng: &mut G,
    parameters: &CeremonyParameters<E>,
) -> Result<ContributionHashes> {
    let span = info_span!("powersoftau-contribute");
    let _enter = span.enter();

    let (mut accumulator, challenge_hash) = read_challenge(challenge, challenge_check, parameters)?;

    // The keypair is bound to the challenge we actually received
    let (public_key, private_key) = keypair::<E, _>(rng, challenge_hash.as_ref())?;
    accumulator.transform(&private_key)?;
    drop(private_key);
    debug!("private key destroyed");

    let mut response = HashWriter::new(response);
    response.write_all(challenge_hash.as_ref())?;
    accumulator.serialize(&mut response, UseCompression::Yes)?;
    public_key.write(&mut response)?;
    response.flush()?;

    let response_hash = response.into_hash();
    info!("response written with hash {}", to_hex(response_hash.as_ref()));

    Ok(ContributionHashes {
        challenge_hash,
        response_hash,
    })
}

/// Contributes deterministic randomness derived from a public beacon value by
/// iterating SHA256 `2^num_iterations_exp` times.
pub fn beacon<R: Read, W: Write, E: PairingCurve>(
    challenge: R,
    response: W,
    beacon_hash: [u8; 32],
    num_iterations_exp: usize,
    challenge_check: CheckForCorrectness,
    parameters: &CeremonyParameters<E>,
) -> Result<ContributionHashes> {
    let span = info_span!("powersoftau-beacon");
    let _enter = span.enter();

    let randomness = beacon_randomness(beacon_hash, num_iterations_exp)?;
    let mut rng = get_rng(&randomness)?;

    contribute(challenge, response, challenge_check, &mut rng, parameters)
}

/// Verifies that `response` is a valid transformation of `challenge`.
///
/// The response must start with the hash of the challenge; this is checked
/// before anything else of the response is decoded. The new accumulator and
/// the public key are always decoded with full checks.
pub fn verify_transform<'a, R1: Read, R2: Read, E: PairingCurve>(
    challenge: R1,
    response: R2,
    challenge_check: CheckForCorrectness,
    parameters: &'a CeremonyParameters<E>,
) -> Result<VerifiedTransform<'a, E>> {
    let span = info_span!("powersoftau-verify-transform");
    let _enter = span.enter();

    let (before, challenge_hash) = read_challenge(challenge, challenge_check, parameters)?;

    let expected = parameters.contribution_size;
    let mut response = HashReader::new(response);

    let mut response_challenge_hash = vec![0u8; parameters.hash_size];
    let read = response.read_exact(&mut response_challenge_hash).map_err(Error::from);
    truncated(read, response.bytes_read(), expected)?;
    if response_challenge_hash.as_slice() != challenge_hash.as_slice() {
        return Err(Error::HashChainMismatch);
    }
    debug!("response is chained to the challenge");

    let after = Accumulator::deserialize(&mut response, UseCompression::Yes, CheckForCorrectness::Full, parameters);
    let after = truncated(after, response.bytes_read(), expected)?;
    let public_key = PublicKey::read(&mut response, CheckForCorrectness::Full);
    let public_key = truncated(public_key, response.bytes_read(), expected)?;
    ensure_exhausted(&mut response, expected)?;
    let response_hash = response.into_hash();

    Accumulator::verify_transform(&before, &after, &public_key, challenge_hash.as_ref())?;
    info!("response {} is a valid transformation", to_hex(response_hash.as_ref()));

    Ok(VerifiedTransform {
        accumulator: after,
        challenge_hash,
        response_hash,
    })
}

/// Converts the first `2^phase2_power` powers of a challenge into Lagrange
/// coefficients and writes them uncompressed.
pub fn prepare_phase2<R: Read, W: Write, E: PairingCurve>(
    challenge: R,
    mut writer: W,
    phase2_power: usize,
    challenge_check: CheckForCorrectness,
    parameters: &CeremonyParameters<E>,
) -> Result<Groth16Params<E>> {
    let span = info_span!("powersoftau-prepare-phase2");
    let _enter = span.enter();

    let phase2_size = 1usize
        .checked_shl(phase2_power as u32)
        .ok_or(Error::InvalidDomainSize(phase2_power))?;

    let (accumulator, _) = read_challenge(challenge, challenge_check, parameters)?;
    let params = Groth16Params::<E>::new(
        phase2_size,
        accumulator.tau_powers_g1,
        accumulator.tau_powers_g2,
        accumulator.alpha_tau_powers_g1,
        accumulator.beta_tau_powers_g1,
        accumulator.beta_g2,
    )?;
    params.write(&mut writer, UseCompression::No)?;
    writer.flush()?;

    info!("wrote lagrange coefficients for 2^{} constraints", phase2_power);

    Ok(params)
}

/// Reads a complete challenge file and returns the accumulator with the hash
/// of the file. The embedded previous hash is logged but not trusted.
fn read_challenge<'a, R: Read, E: PairingCurve>(
    challenge: R,
    challenge_check: CheckForCorrectness,
    parameters: &'a CeremonyParameters<E>,
) -> Result<(Accumulator<'a, E>, Hash)> {
    let expected = parameters.accumulator_size;
    let mut challenge = HashReader::new(challenge);

    let mut previous_hash = vec![0u8; parameters.hash_size];
    let read = challenge.read_exact(&mut previous_hash).map_err(Error::from);
    truncated(read, challenge.bytes_read(), expected)?;
    info!("challenge builds on top of {}", to_hex(&previous_hash));

    let accumulator = Accumulator::deserialize(&mut challenge, UseCompression::No, challenge_check, parameters);
    let accumulator = truncated(accumulator, challenge.bytes_read(), expected)?;
    ensure_exhausted(&mut challenge, expected)?;

    let hash = challenge.into_hash();
    info!("challenge hash is {}", to_hex(hash.as_ref()));

    Ok((accumulator, hash))
}

/// Reports a stream which ended early as a `SizeMismatch`.
fn truncated<T>(result: Result<T>, bytes_read: usize, expected: usize) -> Result<T> {
    match result {
        Err(Error::IoError(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Err(Error::SizeMismatch {
            expected,
            got: bytes_read,
        }),
        other => other,
    }
}
