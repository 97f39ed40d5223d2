use crate::{helpers::accumulator::apply_powers, Accumulator, PrivateKey};
use setup_utils::{rayon_cfg, PairingCurve, Result};

use ark_ec::CurveGroup;
use tracing::{debug, info, info_span, trace};

impl<'a, E: PairingCurve> Accumulator<'a, E> {
    ///
    /// Transforms the accumulator with a private key **which must be destroyed after
    /// this function is executed**.
    ///
    /// Each element is multiplied by the power of tau matching its index, and the
    /// alpha and beta sequences by alpha and beta on top of that. The existing
    /// exponents are kept, so two transforms compose.
    ///
    pub fn transform(&mut self, key: &PrivateKey<E>) -> Result<()> {
        let span = info_span!("powersoftau-transform");
        let _enter = span.enter();

        info!("starting...");

        let batch_size = self.parameters.batch_size;
        let (mut tau_g1, mut tau_g2, mut alpha_g1, mut beta_g1) = (Ok(()), Ok(()), Ok(()), Ok(()));

        rayon_cfg::scope(|s| {
            s.spawn(|_| {
                tau_g1 = apply_powers(&mut self.tau_powers_g1, &key.tau, None, batch_size);
                trace!("applied powers to tau_g1 elements");
            });
            s.spawn(|_| {
                tau_g2 = apply_powers(&mut self.tau_powers_g2, &key.tau, None, batch_size);
                trace!("applied powers to tau_g2 elements");
            });
            s.spawn(|_| {
                alpha_g1 = apply_powers(&mut self.alpha_tau_powers_g1, &key.tau, Some(&key.alpha), batch_size);
                trace!("applied powers to alpha_g1 elements");
            });
            s.spawn(|_| {
                beta_g1 = apply_powers(&mut self.beta_tau_powers_g1, &key.tau, Some(&key.beta), batch_size);
                trace!("applied powers to beta_g1 elements");
            });
        });
        tau_g1?;
        tau_g2?;
        alpha_g1?;
        beta_g1?;

        self.beta_g2 = (self.beta_g2 * key.beta).into_affine();
        debug!("beta_g2 transformed");

        info!("transform complete");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{keypair, CeremonyParameters};
    use setup_utils::{blank_hash, derive_rng_from_seed};

    use ark_bls12_377::Bls12_377;
    use ark_bn254::Bn254;
    use ark_ec::AffineRepr;
    use ark_ff::Field;

    fn transform_matches_secrets<E: PairingCurve>(batch: usize) {
        let parameters = CeremonyParameters::<E>::new(2, batch).unwrap();
        let mut accumulator = Accumulator::new(&parameters);
        let (_, key) = keypair::<E, _>(&mut derive_rng_from_seed(b"transform"), blank_hash().as_ref()).unwrap();
        accumulator.transform(&key).unwrap();

        let g1 = E::G1Affine::generator();
        let g2 = E::G2Affine::generator();
        for (i, el) in accumulator.tau_powers_g1.iter().enumerate() {
            assert_eq!(*el, (g1 * key.tau.pow([i as u64])).into_affine());
        }
        for i in 0..parameters.powers_length {
            let tau_i = key.tau.pow([i as u64]);
            assert_eq!(accumulator.tau_powers_g2[i], (g2 * tau_i).into_affine());
            assert_eq!(accumulator.alpha_tau_powers_g1[i], (g1 * (key.alpha * tau_i)).into_affine());
            assert_eq!(accumulator.beta_tau_powers_g1[i], (g1 * (key.beta * tau_i)).into_affine());
        }
        assert_eq!(accumulator.beta_g2, (g2 * key.beta).into_affine());
        // the generators are untouched
        assert_eq!(accumulator.tau_powers_g1[0], g1);
        assert_eq!(accumulator.tau_powers_g2[0], g2);
    }

    #[test]
    fn test_transform_bn254() {
        transform_matches_secrets::<Bn254>(256);
        transform_matches_secrets::<Bn254>(3);
    }

    #[test]
    fn test_transform_bls12_377() {
        transform_matches_secrets::<Bls12_377>(2);
    }

    #[test]
    fn test_transforms_compose() {
        let parameters = CeremonyParameters::<Bn254>::new(2, 2).unwrap();
        let rng = &mut derive_rng_from_seed(b"compose");
        let (_, key1) = keypair::<Bn254, _>(rng, blank_hash().as_ref()).unwrap();
        let (_, key2) = keypair::<Bn254, _>(rng, blank_hash().as_ref()).unwrap();

        let mut twice = Accumulator::new(&parameters);
        twice.transform(&key1).unwrap();
        twice.transform(&key2).unwrap();

        let combined = PrivateKey::<Bn254> {
            tau: key1.tau * key2.tau,
            alpha: key1.alpha * key2.alpha,
            beta: key1.beta * key2.beta,
        };
        let mut once = Accumulator::new(&parameters);
        once.transform(&combined).unwrap();

        assert_eq!(twice, once);
    }
}
