//! Accumulator which operates on batches of data
use crate::PublicKey;
use setup_utils::*;

use ark_ec::AffineRepr;
use ark_std::cfg_iter;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::io::{Read, Write};
use tracing::trace;

/// Writes `elements` in `batch_size` chunks, encoding each chunk in parallel.
pub(crate) fn write_section<W: Write, C: AffineRepr>(
    writer: &mut W,
    elements: &[C],
    compression: UseCompression,
    batch_size: usize,
) -> Result<()> {
    let size = buffer_size::<C>(compression);
    let mut buffer = vec![0u8; batch_size * size];
    for chunk in elements.chunks(batch_size) {
        let output = &mut buffer[..chunk.len() * size];
        output.write_batch(chunk, compression)?;
        writer.write_all(output)?;
    }

    Ok(())
}

/// Reads `length` elements in `batch_size` chunks. Every chunk is read in full
/// before it gets decoded in parallel.
pub(crate) fn read_section<R: Read, C: CurveElement>(
    reader: &mut R,
    element: ElementType,
    length: usize,
    compression: UseCompression,
    check_for_correctness: CheckForCorrectness,
    batch_size: usize,
) -> Result<Vec<C>> {
    let size = buffer_size::<C>(compression);
    let mut elements = Vec::with_capacity(length);
    let mut buffer = vec![0u8; batch_size * size];
    for start in (0..length).step_by(batch_size) {
        let end = std::cmp::min(start + batch_size, length);
        let input = &mut buffer[..(end - start) * size];
        reader.read_exact(input)?;
        elements.extend(input.read_batch_from::<C>(element, start, compression, check_for_correctness)?);
        trace!("read {} elements {}..{}", element, start, end);
    }

    Ok(elements)
}

/// Multiplies the i-th element by `tau^i` (times `coeff` if given), one
/// `batch_size` chunk at a time.
pub(crate) fn apply_powers<C: AffineRepr>(
    elements: &mut [C],
    tau: &C::ScalarField,
    coeff: Option<&C::ScalarField>,
    batch_size: usize,
) -> Result<()> {
    for (i, chunk) in elements.chunks_mut(batch_size).enumerate() {
        let start = i * batch_size;
        let end = start + chunk.len();
        let powers = generate_powers_of_tau(tau, start, end);
        batch_exp(chunk, &powers, coeff)?;
        trace!("applied powers to elements {}..{}", start, end);
    }

    Ok(())
}

/// Given a public key and the accumulator's digest, it hashes each G1 element
/// along with the digest, and then hashes it to G2.
pub(crate) fn compute_g2_s_key<E: PairingCurve>(key: &PublicKey<E>, digest: &[u8]) -> Result<[E::G2Affine; 3]> {
    Ok([
        compute_g2_s::<E>(digest, &key.tau_g1.0, &key.tau_g1.1, KeyComponent::Tau.personalization())?,
        compute_g2_s::<E>(digest, &key.alpha_g1.0, &key.alpha_g1.1, KeyComponent::Alpha.personalization())?,
        compute_g2_s::<E>(digest, &key.beta_g1.0, &key.beta_g1.1, KeyComponent::Beta.personalization())?,
    ])
}

/// The blinding points must not be the identity and must be pairwise distinct.
pub(crate) fn check_blinding_factors<E: PairingCurve>(key: &PublicKey<E>) -> Result<()> {
    let factors = [
        (key.tau_g1.0, KeyComponent::Tau),
        (key.alpha_g1.0, KeyComponent::Alpha),
        (key.beta_g1.0, KeyComponent::Beta),
    ];
    for (i, (s, component)) in factors.iter().enumerate() {
        if s.is_zero() || factors[..i].iter().any(|(other, _)| other == s) {
            return Err(VerificationError::InvalidBlindingFactor(*component).into());
        }
    }

    Ok(())
}

/// Splits `0..length` into ranges of at most `batch_size` elements (never fewer
/// than 2) where each range starts at the last element of the previous one.
pub(crate) fn ratio_ranges(length: usize, batch_size: usize) -> Vec<(usize, usize)> {
    let step = std::cmp::max(batch_size, 2) - 1;
    (0..length.saturating_sub(1))
        .step_by(step)
        .map(|start| (start, std::cmp::min(start + step + 1, length)))
        .collect()
}

/// Checks that the G1 `elements` form a geometric progression whose ratio
/// matches the one of the provided `check` pair
pub(crate) fn check_power_ratios<E: PairingCurve>(
    elements: &[E::G1Affine],
    element: ElementType,
    check: &(E::G2Affine, E::G2Affine),
    batch_size: usize,
) -> Result<()> {
    let ranges = ratio_ranges(elements.len(), batch_size);
    cfg_iter!(ranges).try_for_each(|&(start, end)| {
        check_same_ratio::<E>(
            &power_pairs(&elements[start..end])?,
            check,
            VerificationError::InvalidRatio { element, start, end },
        )
    })
}

/// Same as `check_power_ratios` for a progression in G2
pub(crate) fn check_power_ratios_g2<E: PairingCurve>(
    elements: &[E::G2Affine],
    element: ElementType,
    check: &(E::G1Affine, E::G1Affine),
    batch_size: usize,
) -> Result<()> {
    let ranges = ratio_ranges(elements.len(), batch_size);
    cfg_iter!(ranges).try_for_each(|&(start, end)| {
        check_same_ratio::<E>(
            check,
            &power_pairs(&elements[start..end])?,
            VerificationError::InvalidRatio { element, start, end },
        )
    })
}
