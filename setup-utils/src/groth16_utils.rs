/// Utilities to read/write and convert the Powers of Tau from Phase 1
/// to Phase 2-compatible Lagrange Coefficients.
use crate::{buffer_size, BatchDeserializer, CheckForCorrectness, Deserializer, ElementType, Error, PairingCurve, Result, Serializer, UseCompression};

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_poly::{domain::DomainCoeff, EvaluationDomain, Radix2EvaluationDomain};
use ark_std::cfg_into_iter;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::io::{Read, Write};
use tracing::{debug, info, info_span};

#[derive(Debug)]
pub struct Groth16Params<E: PairingCurve> {
    pub alpha_g1: E::G1Affine,
    pub beta_g1: E::G1Affine,
    pub beta_g2: E::G2Affine,
    pub coeffs_g1: Vec<E::G1Affine>,
    pub coeffs_g2: Vec<E::G2Affine>,
    pub alpha_coeffs_g1: Vec<E::G1Affine>,
    pub beta_coeffs_g1: Vec<E::G1Affine>,
    pub h_g1: Vec<E::G1Affine>,
}

impl<E: PairingCurve> PartialEq for Groth16Params<E> {
    fn eq(&self, other: &Self) -> bool {
        self.alpha_g1 == other.alpha_g1
            && self.beta_g1 == other.beta_g1
            && self.beta_g2 == other.beta_g2
            && self.coeffs_g1 == other.coeffs_g1
            && self.coeffs_g2 == other.coeffs_g2
            && self.alpha_coeffs_g1 == other.alpha_coeffs_g1
            && self.beta_coeffs_g1 == other.beta_coeffs_g1
            && self.h_g1 == other.h_g1
    }
}

/// Performs an IFFT over the provided evaluation domain to the provided
/// vector of affine points. It then normalizes and returns them back into
/// affine form
fn to_coeffs<F, C, D>(domain: &D, coeffs: &[C]) -> Vec<C>
where
    D: EvaluationDomain<F>,
    F: PrimeField,
    C: AffineRepr,
    C::Group: DomainCoeff<F>,
{
    let projective: Vec<C::Group> = coeffs.iter().map(|e| e.into_group()).collect();
    let coeffs = domain.ifft(&projective);
    C::Group::normalize_batch(&coeffs)
}

/// H query used in Groth16
/// x^i * (x^m - 1) for i in 0..=(m-2) a.k.a.
/// x^(i + m) - x^i for i in 0..=(m-2)
/// for radix2 evaluation domains
fn h_query_groth16<C: AffineRepr>(powers: &[C], degree: usize) -> Vec<C> {
    let h: Vec<C::Group> = cfg_into_iter!(0..degree - 1)
        .map(|i| powers[i + degree].into_group() - powers[i].into_group())
        .collect();
    C::Group::normalize_batch(&h)
}

impl<E: PairingCurve> Groth16Params<E> {
    /// Loads the Powers of Tau and transforms them to coefficient form
    /// in preparation of Phase 2
    pub fn new(
        phase2_size: usize,
        tau_powers_g1: Vec<E::G1Affine>,
        tau_powers_g2: Vec<E::G2Affine>,
        alpha_tau_powers_g1: Vec<E::G1Affine>,
        beta_tau_powers_g1: Vec<E::G1Affine>,
        beta_g2: E::G2Affine,
    ) -> Result<Self> {
        let span = info_span!("Groth16Utils_new");
        let _enter = span.enter();

        let available = tau_powers_g2
            .len()
            .min(alpha_tau_powers_g1.len())
            .min(beta_tau_powers_g1.len());
        if phase2_size < 2 || phase2_size > available || tau_powers_g1.len() < 2 * phase2_size - 1 {
            return Err(Error::InvalidDomainSize(phase2_size));
        }

        // Create the evaluation domain
        let domain = Radix2EvaluationDomain::<E::ScalarField>::new(phase2_size)
            .filter(|domain| domain.size() == phase2_size)
            .ok_or(Error::InvalidDomainSize(phase2_size))?;

        info!("converting powers of tau to lagrange coefficients");

        crossbeam::scope(|s| -> Result<_> {
            // Convert the accumulated powers to Lagrange coefficients
            let coeffs_g1 = s.spawn(|_| to_coeffs(&domain, &tau_powers_g1[0..phase2_size]));
            let coeffs_g2 = s.spawn(|_| to_coeffs(&domain, &tau_powers_g2[0..phase2_size]));
            let alpha_coeffs_g1 = s.spawn(|_| to_coeffs(&domain, &alpha_tau_powers_g1[0..phase2_size]));
            let beta_coeffs_g1 = s.spawn(|_| to_coeffs(&domain, &beta_tau_powers_g1[0..phase2_size]));
            // Calculate the query for the Groth16 proving system
            let h_g1 = s.spawn(|_| h_query_groth16(&tau_powers_g1, phase2_size));

            let coeffs_g1 = coeffs_g1.join()?;
            debug!("tau g1 coefficients calculated");
            let coeffs_g2 = coeffs_g2.join()?;
            debug!("tau g2 coefficients calculated");
            let alpha_coeffs_g1 = alpha_coeffs_g1.join()?;
            debug!("alpha tau g1 coefficients calculated");
            let beta_coeffs_g1 = beta_coeffs_g1.join()?;
            debug!("beta tau g1 coefficients calculated");
            let h_g1 = h_g1.join()?;
            debug!("h query coefficients calculated");

            info!("successfully created groth16 parameters from powers of tau");

            Ok(Groth16Params {
                alpha_g1: alpha_tau_powers_g1[0],
                beta_g1: beta_tau_powers_g1[0],
                beta_g2,
                coeffs_g1,
                coeffs_g2,
                alpha_coeffs_g1,
                beta_coeffs_g1,
                h_g1,
            })
        })?
    }

    /// Writes the data structure to the provided writer, in compressed or uncompressed form.
    pub fn write<W: Write>(&self, writer: &mut W, compression: UseCompression) -> Result<()> {
        // Needed by verifier for e(alpha, beta) and by the prover for A and C
        writer.write_element(&self.alpha_g1, compression)?;
        writer.write_element(&self.beta_g1, compression)?;
        writer.write_element(&self.beta_g2, compression)?;

        // Lagrange coefficients for the LC/IC queries and the A and B polynomials
        writer.write_elements_exact(&self.coeffs_g1, compression)?;
        writer.write_elements_exact(&self.coeffs_g2, compression)?;
        writer.write_elements_exact(&self.alpha_coeffs_g1, compression)?;
        writer.write_elements_exact(&self.beta_coeffs_g1, compression)?;

        // Bases for H polynomial computation
        writer.write_elements_exact(&self.h_g1, compression)?;

        Ok(())
    }

    /// Reads the first `num_constraints` coefficients from the provided processed
    /// Phase 1 transcript with size `phase1_size`.
    pub fn read<R: Read>(
        reader: &mut R,
        compressed: UseCompression,
        check_input_for_correctness: CheckForCorrectness,
        phase1_size: usize,
        num_constraints: usize,
    ) -> Result<Groth16Params<E>> {
        let span = info_span!("Groth16Utils_read");
        let _enter = span.enter();

        if num_constraints < 2 || num_constraints > phase1_size {
            return Err(Error::InvalidDomainSize(num_constraints));
        }

        let alpha_g1 = reader.read_element(ElementType::AlphaG1, 0, compressed, check_input_for_correctness)?;
        let beta_g1 = reader.read_element(ElementType::BetaG1, 0, compressed, check_input_for_correctness)?;
        let beta_g2 = reader.read_element(ElementType::BetaG2, 0, compressed, check_input_for_correctness)?;

        let g1_size = buffer_size::<E::G1Affine>(compressed);
        let g2_size = buffer_size::<E::G2Affine>(compressed);

        let mut section = |element_size: usize, total: usize| -> Result<Vec<u8>> {
            let mut buf = vec![0; total * element_size];
            reader.read_exact(&mut buf)?;
            buf.truncate(num_constraints.min(total) * element_size);
            Ok(buf)
        };
        let in_coeffs_g1 = section(g1_size, phase1_size)?;
        let in_coeffs_g2 = section(g2_size, phase1_size)?;
        let in_alpha_coeffs_g1 = section(g1_size, phase1_size)?;
        let in_beta_coeffs_g1 = section(g1_size, phase1_size)?;
        let mut in_h_g1 = section(g1_size, phase1_size - 1)?;
        in_h_g1.truncate((num_constraints - 1) * g1_size);

        info!("reading groth16 parameters...");
        // Read all elements in parallel
        // note: '??' is used for getting the result from the threaded operation,
        // and then getting the result from the function inside the thread)
        let check = check_input_for_correctness;
        crossbeam::scope(|s| -> Result<_> {
            let coeffs_g1 = s.spawn(|_| in_coeffs_g1.read_batch::<E::G1Affine>(ElementType::TauG1, compressed, check));
            let coeffs_g2 = s.spawn(|_| in_coeffs_g2.read_batch::<E::G2Affine>(ElementType::TauG2, compressed, check));
            let alpha_coeffs_g1 =
                s.spawn(|_| in_alpha_coeffs_g1.read_batch::<E::G1Affine>(ElementType::AlphaG1, compressed, check));
            let beta_coeffs_g1 =
                s.spawn(|_| in_beta_coeffs_g1.read_batch::<E::G1Affine>(ElementType::BetaG1, compressed, check));
            let h_g1 = s.spawn(|_| in_h_g1.read_batch::<E::G1Affine>(ElementType::TauG1, compressed, check));

            let coeffs_g1 = coeffs_g1.join()??;
            debug!("read tau g1 coefficients");
            let coeffs_g2 = coeffs_g2.join()??;
            debug!("read tau g2 coefficients");
            let alpha_coeffs_g1 = alpha_coeffs_g1.join()??;
            debug!("read alpha g1 coefficients");
            let beta_coeffs_g1 = beta_coeffs_g1.join()??;
            debug!("read beta g1 coefficients");
            let h_g1 = h_g1.join()??;
            debug!("read h query coefficients");

            info!("successfully read groth16 parameters");

            Ok(Groth16Params {
                alpha_g1,
                beta_g1,
                beta_g2,
                coeffs_g1,
                coeffs_g2,
                alpha_coeffs_g1,
                beta_coeffs_g1,
                h_g1,
            })
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_powers_of_tau;

    use ark_bls12_377::Bls12_377;
    use ark_bn254::Bn254;
    use ark_ec::pairing::Pairing;
    use ark_std::UniformRand;
    use rand::thread_rng;

    type Powers<E> = (
        Vec<<E as Pairing>::G1Affine>,
        Vec<<E as Pairing>::G2Affine>,
        Vec<<E as Pairing>::G1Affine>,
        Vec<<E as Pairing>::G1Affine>,
        <E as Pairing>::G2Affine,
    );

    /// Builds the powers of tau for random secrets directly.
    fn powers_for_random_secrets<E: PairingCurve>(powers_length: usize) -> (Powers<E>, E::ScalarField, E::ScalarField) {
        let rng = &mut thread_rng();
        let tau = E::ScalarField::rand(rng);
        let alpha = E::ScalarField::rand(rng);
        let beta = E::ScalarField::rand(rng);

        let g1 = E::G1Affine::generator();
        let g2 = E::G2Affine::generator();
        let exps = generate_powers_of_tau(&tau, 0, 2 * powers_length - 1);
        let tau_g1 = exps.iter().map(|e| (g1 * e).into_affine()).collect();
        let tau_g2 = exps[..powers_length].iter().map(|e| (g2 * e).into_affine()).collect();
        let alpha_g1 = exps[..powers_length].iter().map(|e| (g1 * (alpha * e)).into_affine()).collect();
        let beta_g1 = exps[..powers_length].iter().map(|e| (g1 * (beta * e)).into_affine()).collect();
        let beta_g2 = (g2 * beta).into_affine();

        ((tau_g1, tau_g2, alpha_g1, beta_g1, beta_g2), alpha, beta)
    }

    fn lagrange_coefficients_sum_to_generator<E: PairingCurve>(powers_length: usize, phase2_size: usize) {
        let ((tau_g1, tau_g2, alpha_g1, beta_g1, beta_g2), alpha, _) = powers_for_random_secrets::<E>(powers_length);
        let params = Groth16Params::<E>::new(phase2_size, tau_g1.clone(), tau_g2, alpha_g1, beta_g1, beta_g2).unwrap();

        assert_eq!(params.coeffs_g1.len(), phase2_size);
        assert_eq!(params.h_g1.len(), phase2_size - 1);

        // the lagrange polynomials of a domain sum up to one
        let sum_g1: E::G1 = params.coeffs_g1.iter().map(|c| c.into_group()).sum();
        assert_eq!(sum_g1.into_affine(), E::G1Affine::generator());
        let sum_g2: E::G2 = params.coeffs_g2.iter().map(|c| c.into_group()).sum();
        assert_eq!(sum_g2.into_affine(), E::G2Affine::generator());
        let sum_alpha: E::G1 = params.alpha_coeffs_g1.iter().map(|c| c.into_group()).sum();
        assert_eq!(sum_alpha.into_affine(), (E::G1Affine::generator() * alpha).into_affine());

        assert_eq!(
            params.h_g1[0],
            (tau_g1[phase2_size].into_group() - tau_g1[0].into_group()).into_affine()
        );
    }

    fn read_write_curve<E: PairingCurve>(powers_length: usize, phase2_size: usize, compressed: UseCompression) {
        let ((tau_g1, tau_g2, alpha_g1, beta_g1, beta_g2), _, _) = powers_for_random_secrets::<E>(powers_length);
        let groth_params = Groth16Params::<E>::new(phase2_size, tau_g1, tau_g2, alpha_g1, beta_g1, beta_g2).unwrap();

        let mut writer: Vec<u8> = vec![];
        groth_params.write(&mut writer, compressed).unwrap();
        let deserialized = Groth16Params::<E>::read(
            &mut &writer[..],
            compressed,
            CheckForCorrectness::Full,
            phase2_size,
            phase2_size,
        )
        .unwrap();
        assert_eq!(deserialized, groth_params);

        let subset = phase2_size / 2;
        let deserialized_subset = Groth16Params::<E>::read(
            &mut &writer[..],
            compressed,
            CheckForCorrectness::Full,
            phase2_size,
            subset,
        )
        .unwrap();
        assert_eq!(&deserialized_subset.coeffs_g1[..], &groth_params.coeffs_g1[..subset]);
        assert_eq!(&deserialized_subset.coeffs_g2[..], &groth_params.coeffs_g2[..subset]);
        assert_eq!(
            &deserialized_subset.alpha_coeffs_g1[..],
            &groth_params.alpha_coeffs_g1[..subset]
        );
        assert_eq!(
            &deserialized_subset.beta_coeffs_g1[..],
            &groth_params.beta_coeffs_g1[..subset]
        );
        // h_query is 1 less element
        assert_eq!(&deserialized_subset.h_g1[..], &groth_params.h_g1[..subset - 1]);
    }

    #[test]
    fn lagrange_coefficients_bn254() {
        lagrange_coefficients_sum_to_generator::<Bn254>(8, 8);
        lagrange_coefficients_sum_to_generator::<Bn254>(8, 4);
    }

    #[test]
    fn lagrange_coefficients_bls12_377() {
        lagrange_coefficients_sum_to_generator::<Bls12_377>(4, 4);
    }

    #[test]
    fn read_write_bn254() {
        read_write_curve::<Bn254>(8, 8, UseCompression::Yes);
        read_write_curve::<Bn254>(8, 4, UseCompression::No);
    }

    #[test]
    fn large_phase2_fails() {
        let ((tau_g1, tau_g2, alpha_g1, beta_g1, beta_g2), _, _) = powers_for_random_secrets::<Bn254>(8);
        let err = Groth16Params::<Bn254>::new(16, tau_g1, tau_g2, alpha_g1, beta_g1, beta_g2).unwrap_err();
        assert!(matches!(err, Error::InvalidDomainSize(16)));
    }

    #[test]
    fn non_power_of_two_fails() {
        let ((tau_g1, tau_g2, alpha_g1, beta_g1, beta_g2), _, _) = powers_for_random_secrets::<Bn254>(8);
        let err = Groth16Params::<Bn254>::new(6, tau_g1, tau_g2, alpha_g1, beta_g1, beta_g2).unwrap_err();
        assert!(matches!(err, Error::InvalidDomainSize(6)));
    }
}
