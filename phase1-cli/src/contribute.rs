use crate::files::{create_output, map_input, write_hash};
use powersoftau::{
    ceremony::{self, ContributionHashes},
    CeremonyParameters,
};
use setup_utils::{CheckForCorrectness, PairingCurve, Result};

use rand::Rng;
use std::io::Write;
use tracing::info;

/// Contributes the randomness of `rng` to the challenge and writes the response.
pub fn contribute<E: PairingCurve, R: Rng>(
    challenge_filename: &str,
    challenge_hash_filename: &str,
    response_filename: &str,
    response_hash_filename: &str,
    challenge_checks: CheckForCorrectness,
    rng: &mut R,
    parameters: &CeremonyParameters<E>,
) -> Result<()> {
    let challenge = map_input(challenge_filename, parameters.accumulator_size)?;
    let mut response = create_output(response_filename)?;

    info!("Computing and writing your contribution, this could take a while...");
    let hashes = ceremony::contribute(&challenge[..], &mut response, challenge_checks, rng, parameters)?;
    response.flush()?;

    write_hashes(challenge_hash_filename, response_hash_filename, &hashes)?;
    info!("Thank you for your participation, much appreciated! :)");

    Ok(())
}

/// Contributes the randomness derived from a public beacon value.
#[allow(clippy::too_many_arguments)]
pub fn beacon<E: PairingCurve>(
    challenge_filename: &str,
    challenge_hash_filename: &str,
    response_filename: &str,
    response_hash_filename: &str,
    beacon_hash: [u8; 32],
    num_iterations_exp: usize,
    challenge_checks: CheckForCorrectness,
    parameters: &CeremonyParameters<E>,
) -> Result<()> {
    let challenge = map_input(challenge_filename, parameters.accumulator_size)?;
    let mut response = create_output(response_filename)?;

    info!("Applying the beacon, this could take a while...");
    let hashes = ceremony::beacon(
        &challenge[..],
        &mut response,
        beacon_hash,
        num_iterations_exp,
        challenge_checks,
        parameters,
    )?;
    response.flush()?;

    write_hashes(challenge_hash_filename, response_hash_filename, &hashes)
}

fn write_hashes(challenge_hash_filename: &str, response_hash_filename: &str, hashes: &ContributionHashes) -> Result<()> {
    write_hash(
        challenge_hash_filename,
        "`challenge` file",
        hashes.challenge_hash.as_slice(),
    )?;
    write_hash(
        response_hash_filename,
        "Your contribution in `response` file",
        hashes.response_hash.as_slice(),
    )
}
