use crate::files::{create_output, write_hash};
use powersoftau::{ceremony, CeremonyParameters};
use setup_utils::{PairingCurve, Result};

use std::io::Write;
use tracing::info;

pub fn new_challenge<E: PairingCurve>(
    challenge_filename: &str,
    challenge_hash_filename: &str,
    parameters: &CeremonyParameters<E>,
) -> Result<()> {
    info!(
        "Will generate an empty accumulator for 2^{} powers of tau",
        parameters.size
    );
    info!("In total will generate up to {} powers", parameters.powers_g1_length);

    let mut writer = create_output(challenge_filename)?;
    let hash = ceremony::new_challenge(&mut writer, parameters)?;
    writer.flush()?;

    write_hash(challenge_hash_filename, "Empty contribution", hash.as_slice())?;
    info!("Wrote a fresh accumulator to challenge file");

    Ok(())
}
