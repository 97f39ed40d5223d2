use crate::{
    helpers::accumulator::{check_blinding_factors, check_power_ratios, check_power_ratios_g2, compute_g2_s_key},
    Accumulator, PublicKey,
};
use setup_utils::{check_same_ratio, rayon_cfg, ElementType, Error, KeyComponent, PairingCurve, Result, VerificationError};

use ark_ec::AffineRepr;
use tracing::{debug, info, info_span};

impl<'a, E: PairingCurve> Accumulator<'a, E> {
    ///
    /// Verifies a transformation of the `Accumulator` with the `PublicKey`,
    /// given a 64-byte transcript `digest`.
    ///
    /// Checks the blinding points and proofs of knowledge of the key, that the
    /// generators were kept, that the first elements were multiplied by the
    /// committed secrets and finally that every sequence of both accumulators
    /// is a progression of powers of the same tau.
    ///
    pub fn verify_transform(before: &Self, after: &Self, key: &PublicKey<E>, digest: &[u8]) -> Result<()> {
        let span = info_span!("powersoftau-verification");
        let _enter = span.enter();

        info!("starting...");

        before.check_lengths()?;
        after.check_lengths()?;

        check_blinding_factors(key)?;
        debug!("blinding factors are valid");

        let [tau_g2_s, alpha_g2_s, beta_g2_s] = compute_g2_s_key(key, digest)?;

        // Compose into tuple form for convenience.
        let tau_single_g2_check = &(tau_g2_s, key.tau_g2);
        let alpha_single_g2_check = &(alpha_g2_s, key.alpha_g2);
        let beta_single_g2_check = &(beta_g2_s, key.beta_g2);

        // Check the proofs of knowledge for tau, alpha, and beta.
        {
            let check_ratios = [
                (&key.tau_g1, tau_single_g2_check, KeyComponent::Tau),
                (&key.alpha_g1, alpha_single_g2_check, KeyComponent::Alpha),
                (&key.beta_g1, beta_single_g2_check, KeyComponent::Beta),
            ];

            for (g1, g2, component) in check_ratios {
                check_same_ratio::<E>(g1, g2, VerificationError::InvalidProofOfKnowledge(component))?;
            }
            debug!("key ratios were correctly produced");
        }

        // Check that the first powers are the generators.
        if after.tau_powers_g1[0] != E::G1Affine::generator() {
            return Err(VerificationError::InvalidGenerator(ElementType::TauG1).into());
        }
        if after.tau_powers_g2[0] != E::G2Affine::generator() {
            return Err(VerificationError::InvalidGenerator(ElementType::TauG2).into());
        }

        // Check that tau^1 was multiplied correctly in G1 and G2.
        check_same_ratio::<E>(
            &(before.tau_powers_g1[1], after.tau_powers_g1[1]),
            tau_single_g2_check,
            VerificationError::InvalidContribution(ElementType::TauG1),
        )?;
        check_same_ratio::<E>(
            &key.tau_g1,
            &(before.tau_powers_g2[1], after.tau_powers_g2[1]),
            VerificationError::InvalidContribution(ElementType::TauG2),
        )?;

        // Check that alpha_g1[0] and beta_g1[0] were multiplied correctly.
        check_same_ratio::<E>(
            &(before.alpha_tau_powers_g1[0], after.alpha_tau_powers_g1[0]),
            alpha_single_g2_check,
            VerificationError::InvalidContribution(ElementType::AlphaG1),
        )?;
        check_same_ratio::<E>(
            &(before.beta_tau_powers_g1[0], after.beta_tau_powers_g1[0]),
            beta_single_g2_check,
            VerificationError::InvalidContribution(ElementType::BetaG1),
        )?;

        // beta_g2 must have moved by the same beta as beta_g1[0]
        check_same_ratio::<E>(
            &(before.beta_tau_powers_g1[0], after.beta_tau_powers_g1[0]),
            &(before.beta_g2, after.beta_g2),
            VerificationError::InvalidContribution(ElementType::BetaG2),
        )?;

        debug!("initial elements were computed correctly");

        before.verify_ratios()?;
        after.verify_ratios()?;

        info!("verification complete");

        Ok(())
    }

    /// Checks that every sequence of the accumulator is made of consecutive
    /// powers of the same tau, `batch_size` elements at a time.
    pub fn verify_ratios(&self) -> Result<()> {
        self.check_lengths()?;

        let batch_size = self.parameters.batch_size;
        let tau_g1_check = &(self.tau_powers_g1[0], self.tau_powers_g1[1]);
        let tau_g2_check = &(self.tau_powers_g2[0], self.tau_powers_g2[1]);

        let (mut tau_g1, mut tau_g2, mut alpha_g1, mut beta_g1) = (Ok(()), Ok(()), Ok(()), Ok(()));

        rayon_cfg::scope(|s| {
            s.spawn(|_| {
                tau_g1 = check_power_ratios::<E>(&self.tau_powers_g1, ElementType::TauG1, tau_g2_check, batch_size);
                debug!("tau_g1 ratios verified");
            });
            s.spawn(|_| {
                tau_g2 =
                    check_power_ratios_g2::<E>(&self.tau_powers_g2, ElementType::TauG2, tau_g1_check, batch_size);
                debug!("tau_g2 ratios verified");
            });
            s.spawn(|_| {
                alpha_g1 = check_power_ratios::<E>(
                    &self.alpha_tau_powers_g1,
                    ElementType::AlphaG1,
                    tau_g2_check,
                    batch_size,
                );
                debug!("alpha_g1 ratios verified");
            });
            s.spawn(|_| {
                beta_g1 =
                    check_power_ratios::<E>(&self.beta_tau_powers_g1, ElementType::BetaG1, tau_g2_check, batch_size);
                debug!("beta_g1 ratios verified");
            });
        });

        // report in a stable order regardless of which task finished first
        tau_g1?;
        tau_g2?;
        alpha_g1?;
        beta_g1?;

        Ok(())
    }

    /// The pairing checks index the first two powers, so each sequence must
    /// have exactly the length the parameters call for, and at least 2 elements.
    fn check_lengths(&self) -> Result<()> {
        let parameters = self.parameters;
        if parameters.powers_length < 2 {
            return Err(Error::InvalidLength {
                expected: 2,
                got: parameters.powers_length,
            });
        }

        let lengths = [
            (parameters.powers_g1_length, self.tau_powers_g1.len()),
            (parameters.powers_length, self.tau_powers_g2.len()),
            (parameters.powers_length, self.alpha_tau_powers_g1.len()),
            (parameters.powers_length, self.beta_tau_powers_g1.len()),
        ];
        for (expected, got) in lengths {
            if expected != got {
                return Err(Error::InvalidLength { expected, got });
            }
        }

        Ok(())
    }
}
