use crate::{Accumulator, CeremonyParameters};
use setup_utils::PairingCurve;

use ark_ec::AffineRepr;
use tracing::{info, info_span};

impl<'a, E: PairingCurve> Accumulator<'a, E> {
    /// Generates the initial accumulator, in which every element is the
    /// generator of its group (τ = α = β = 1).
    pub fn new(parameters: &'a CeremonyParameters<E>) -> Self {
        let span = info_span!("powersoftau-initialization");
        let _enter = span.enter();

        let one_g1 = E::G1Affine::generator();
        let one_g2 = E::G2Affine::generator();

        let accumulator = Accumulator {
            tau_powers_g1: vec![one_g1; parameters.powers_g1_length],
            tau_powers_g2: vec![one_g2; parameters.powers_length],
            alpha_tau_powers_g1: vec![one_g1; parameters.powers_length],
            beta_tau_powers_g1: vec![one_g1; parameters.powers_length],
            beta_g2: one_g2,
            parameters,
        };

        info!("initialization complete");

        accumulator
    }
}
