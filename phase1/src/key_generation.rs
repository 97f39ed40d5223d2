use crate::{PrivateKey, PublicKey};
use setup_utils::{compute_g2_s, sample_nonzero_scalar, Error, KeyComponent, PairingCurve, Result};

use ark_ec::{AffineRepr, CurveGroup};
use rand::Rng;

/// Constructs a keypair given an RNG and a 64-byte transcript `digest`.
pub fn keypair<E: PairingCurve, R: Rng>(rng: &mut R, digest: &[u8]) -> Result<(PublicKey<E>, PrivateKey<E>)> {
    if digest.len() != 64 {
        return Err(Error::InvalidLength {
            expected: 64,
            got: digest.len(),
        });
    }

    // tau is a contribution to the "powers of tau", in a set of points of the form "tau^i * G"
    let tau = sample_nonzero_scalar::<E::ScalarField, _>(rng)?;
    // alpha and beta are a set of contributions in a form "alpha * tau^i * G" and that are required
    // for construction of the polynomials
    let alpha = sample_nonzero_scalar::<E::ScalarField, _>(rng)?;
    let beta = sample_nonzero_scalar::<E::ScalarField, _>(rng)?;

    let mut op = |x: E::ScalarField, component: KeyComponent| -> Result<_> {
        // Sample a random non-identity g^s
        let s = sample_nonzero_scalar::<E::ScalarField, _>(rng)?;
        let g1_s = (E::G1Affine::generator() * s).into_affine();
        // Compute g^{s*x}
        let g1_s_x = (g1_s * x).into_affine();
        // Hash into G2 as g^{s'}
        let g2_s = compute_g2_s::<E>(digest, &g1_s, &g1_s_x, component.personalization())?;
        // Compute g^{s'*x}
        let g2_s_x = (g2_s * x).into_affine();

        Ok(((g1_s, g1_s_x), g2_s_x))
    };

    // These "public keys" are required for the next participants to check that points are in fact
    // sequential powers
    let pk_tau = op(tau, KeyComponent::Tau)?;
    let pk_alpha = op(alpha, KeyComponent::Alpha)?;
    let pk_beta = op(beta, KeyComponent::Beta)?;

    Ok((
        PublicKey {
            tau_g1: pk_tau.0,
            alpha_g1: pk_alpha.0,
            beta_g1: pk_beta.0,
            tau_g2: pk_tau.1,
            alpha_g2: pk_alpha.1,
            beta_g2: pk_beta.1,
        },
        PrivateKey { tau, alpha, beta },
    ))
}
