use crate::files::{create_output, map_input, write_hash};
use powersoftau::{ceremony, CeremonyParameters};
use setup_utils::{CheckForCorrectness, PairingCurve, Result};

use std::io::Write;
use tracing::info;

/// Verifies a response against its challenge. Only a valid response produces
/// the new challenge file.
pub fn verify_transform<E: PairingCurve>(
    challenge_filename: &str,
    response_filename: &str,
    response_hash_filename: &str,
    new_challenge_filename: &str,
    new_challenge_hash_filename: &str,
    challenge_checks: CheckForCorrectness,
    parameters: &CeremonyParameters<E>,
) -> Result<()> {
    let challenge = map_input(challenge_filename, parameters.accumulator_size)?;
    let response = map_input(response_filename, parameters.contribution_size)?;

    info!("Verifying a contribution to contain proper powers and correspond to the public key...");
    let verified = ceremony::verify_transform(&challenge[..], &response[..], challenge_checks, parameters)?;
    info!("Verification succeeded!");

    write_hash(
        response_hash_filename,
        "`response` file",
        verified.response_hash.as_slice(),
    )?;

    let mut writer = create_output(new_challenge_filename)?;
    let new_challenge_hash =
        ceremony::write_challenge(&mut writer, &verified.accumulator, verified.response_hash.as_slice())?;
    writer.flush()?;

    write_hash(
        new_challenge_hash_filename,
        "`new_challenge` file",
        new_challenge_hash.as_slice(),
    )?;
    info!("Your contribution was verified and the next challenge was written to `new_challenge` file");

    Ok(())
}
