//! # powersoftau
//!
//! The accumulator of a powers of tau ceremony, the contributions which are
//! mixed into it and the pairing checks which make every contribution publicly
//! verifiable. The [`ceremony`] module chains these steps over readers and writers.
pub mod helpers;

pub mod objects;
pub use objects::*;

pub mod ceremony;
mod computation;
mod initialization;
mod key_generation;
pub use key_generation::keypair;
mod serialization;
mod verification;

use setup_utils::PairingCurve;

use derivative::Derivative;

/// `Accumulator` is the object that participants of the ceremony contribute
/// randomness to. It contains powers of the trapdoor `tau` in G1 and in G2 over
/// fixed generators, and additionally in G1 over two other generators of exponents
/// `alpha` and `beta` over those fixed generators. With M = 2<sup>power</sup>:
///
/// * (1, τ, τ<sup>2</sup>, ..., τ<sup>2M - 2</sup>, α, ατ, ..., ατ<sup>M - 1</sup>, β, βτ, ..., βτ<sup>M - 1</sup>)<sub>1</sub>
/// * (β, 1, τ, τ<sup>2</sup>, ..., τ<sup>M - 1</sup>)<sub>2</sub>
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Accumulator<'a, E: PairingCurve> {
    /// tau^0, tau^1, tau^2, ..., tau^{powers_g1_length - 1}
    pub tau_powers_g1: Vec<E::G1Affine>,
    /// tau^0, tau^1, tau^2, ..., tau^{powers_length - 1}
    pub tau_powers_g2: Vec<E::G2Affine>,
    /// alpha * tau^0, alpha * tau^1, ..., alpha * tau^{powers_length - 1}
    pub alpha_tau_powers_g1: Vec<E::G1Affine>,
    /// beta * tau^0, beta * tau^1, ..., beta * tau^{powers_length - 1}
    pub beta_tau_powers_g1: Vec<E::G1Affine>,
    /// beta
    pub beta_g2: E::G2Affine,
    /// The parameters used for the setup of this accumulator
    pub parameters: &'a CeremonyParameters<E>,
}

// The parameters are shared, only the elements are copied.
impl<'a, E: PairingCurve> Clone for Accumulator<'a, E> {
    fn clone(&self) -> Self {
        Self {
            tau_powers_g1: self.tau_powers_g1.clone(),
            tau_powers_g2: self.tau_powers_g2.clone(),
            alpha_tau_powers_g1: self.alpha_tau_powers_g1.clone(),
            beta_tau_powers_g1: self.beta_tau_powers_g1.clone(),
            beta_g2: self.beta_g2,
            parameters: self.parameters,
        }
    }
}

impl<'a, E: PairingCurve> PartialEq for Accumulator<'a, E> {
    fn eq(&self, other: &Self) -> bool {
        self.tau_powers_g1 == other.tau_powers_g1
            && self.tau_powers_g2 == other.tau_powers_g2
            && self.alpha_tau_powers_g1 == other.alpha_tau_powers_g1
            && self.beta_tau_powers_g1 == other.beta_tau_powers_g1
            && self.beta_g2 == other.beta_g2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Bn254, Fr};
    use ark_ec::CurveGroup;

    #[test]
    fn test_clone_shares_parameters() {
        let parameters = CeremonyParameters::<Bn254>::new(2, 2).unwrap();
        let accumulator = Accumulator::new(&parameters);
        let mut copy = accumulator.clone();
        assert!(std::ptr::eq(copy.parameters, accumulator.parameters));
        assert_eq!(copy, accumulator);

        copy.tau_powers_g1[1] = (copy.tau_powers_g1[1] * Fr::from(2u64)).into_affine();
        assert_ne!(copy, accumulator);
        assert_eq!(accumulator, Accumulator::new(&parameters));
    }
}
