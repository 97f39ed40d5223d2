use crate::files::{create_output, map_input};
use powersoftau::{ceremony, CeremonyParameters};
use setup_utils::{CheckForCorrectness, PairingCurve, Result};

use tracing::info;

/// Writes the Lagrange coefficients for a circuit of `2^phase2_size` constraints.
/// The challenge is decoded with full checks.
pub fn prepare_phase2<E: PairingCurve>(
    challenge_filename: &str,
    phase2_filename: &str,
    phase2_size: usize,
    parameters: &CeremonyParameters<E>,
) -> Result<()> {
    let challenge = map_input(challenge_filename, parameters.accumulator_size)?;
    let writer = create_output(phase2_filename)?;

    ceremony::prepare_phase2(
        &challenge[..],
        writer,
        phase2_size,
        CheckForCorrectness::Full,
        parameters,
    )?;
    info!("Wrote the phase 2 parameters to {}", phase2_filename);

    Ok(())
}
