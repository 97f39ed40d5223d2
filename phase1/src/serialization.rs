use crate::{
    helpers::accumulator::{read_section, write_section},
    Accumulator, CeremonyParameters,
};
use setup_utils::{CheckForCorrectness, Deserializer, ElementType, PairingCurve, Result, Serializer, UseCompression};

use std::io::{Read, Write};

impl<'a, E: PairingCurve> Accumulator<'a, E> {
    /// Writes the accumulator without any hash prefix: tau_g1, tau_g2, alpha_g1,
    /// beta_g1 and finally beta_g2, with no length prefixes.
    pub fn serialize<W: Write>(&self, writer: &mut W, compression: UseCompression) -> Result<()> {
        let batch_size = self.parameters.batch_size;

        write_section(writer, &self.tau_powers_g1, compression, batch_size)?;
        write_section(writer, &self.tau_powers_g2, compression, batch_size)?;
        write_section(writer, &self.alpha_tau_powers_g1, compression, batch_size)?;
        write_section(writer, &self.beta_tau_powers_g1, compression, batch_size)?;
        writer.write_element(&self.beta_g2, compression)?;

        Ok(())
    }

    /// Reads an accumulator written by `serialize`. The first element failing
    /// `check_input_for_correctness` aborts with its section and index.
    pub fn deserialize<R: Read>(
        reader: &mut R,
        compression: UseCompression,
        check_input_for_correctness: CheckForCorrectness,
        parameters: &'a CeremonyParameters<E>,
    ) -> Result<Accumulator<'a, E>> {
        let batch_size = parameters.batch_size;
        let check = check_input_for_correctness;

        let tau_powers_g1 = read_section(
            reader,
            ElementType::TauG1,
            parameters.powers_g1_length,
            compression,
            check,
            batch_size,
        )?;
        let tau_powers_g2 = read_section(
            reader,
            ElementType::TauG2,
            parameters.powers_length,
            compression,
            check,
            batch_size,
        )?;
        let alpha_tau_powers_g1 = read_section(
            reader,
            ElementType::AlphaG1,
            parameters.powers_length,
            compression,
            check,
            batch_size,
        )?;
        let beta_tau_powers_g1 = read_section(
            reader,
            ElementType::BetaG1,
            parameters.powers_length,
            compression,
            check,
            batch_size,
        )?;
        let beta_g2 = reader.read_element(ElementType::BetaG2, 0, compression, check)?;

        Ok(Accumulator {
            tau_powers_g1,
            tau_powers_g2,
            alpha_tau_powers_g1,
            beta_tau_powers_g1,
            beta_g2,
            parameters,
        })
    }
}
