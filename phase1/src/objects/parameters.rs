use setup_utils::{buffer_size, Error, PairingCurve, Result, UseCompression};

use derivative::Derivative;
use std::marker::PhantomData;

/// The sizes of the group elements of a curve
#[derive(Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""), PartialEq(bound = ""), Eq(bound = ""))]
pub struct CurveParameters<E> {
    /// Size of a G1 Element
    pub g1_size: usize,
    /// Size of a G2 Element
    pub g2_size: usize,
    /// Size of a compressed G1 Element
    pub g1_compressed_size: usize,
    /// Size of a compressed G2 Element
    pub g2_compressed_size: usize,
    #[derivative(Debug = "ignore")]
    engine_type: PhantomData<E>,
}

impl<E: PairingCurve> CurveParameters<E> {
    pub fn new() -> CurveParameters<E> {
        CurveParameters {
            g1_size: buffer_size::<E::G1Affine>(UseCompression::No),
            g2_size: buffer_size::<E::G2Affine>(UseCompression::No),
            g1_compressed_size: buffer_size::<E::G1Affine>(UseCompression::Yes),
            g2_compressed_size: buffer_size::<E::G2Affine>(UseCompression::Yes),
            engine_type: PhantomData,
        }
    }
}

impl<E: PairingCurve> Default for CurveParameters<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// The parameters used for the trusted setup ceremony
#[derive(Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""), PartialEq(bound = ""), Eq(bound = ""))]
pub struct CeremonyParameters<E> {
    /// The type of the curve being used
    pub curve: CurveParameters<E>,
    /// The number of Powers of Tau G1 elements which will be accumulated
    pub powers_g1_length: usize,
    /// The number of Powers of Tau Alpha/Beta/G2 elements which will be accumulated
    pub powers_length: usize,
    /// The circuit size exponent (ie length will be 2^size),
    /// depends on the computation you want to support.
    pub size: usize,
    /// How many elements are processed at once.
    pub batch_size: usize,
    /// Size of the used public key
    pub public_key_size: usize,
    /// Total size of the challenge file
    pub accumulator_size: usize,
    /// Total size of the response file
    pub contribution_size: usize,
    /// Size of the hash of the previous contribution
    pub hash_size: usize,
}

impl<E: PairingCurve> CeremonyParameters<E> {
    /// Constructs a new ceremony parameters object from the type of provided curve.
    /// A `batch_size` of 0 is treated as 1.
    pub fn new(size: usize, batch_size: usize) -> Result<Self> {
        Self::new_with_curve(CurveParameters::<E>::new(), size, batch_size)
    }

    /// Constructs a new ceremony parameters object from the directly provided curve parameters.
    /// Fails with `InvalidPower` unless `1 <= size < usize::BITS - 2` and every file size fits
    /// in a `usize`.
    pub fn new_with_curve(curve: CurveParameters<E>, size: usize, batch_size: usize) -> Result<Self> {
        if size == 0 || size >= usize::BITS as usize - 2 {
            return Err(Error::InvalidPower(size));
        }
        let overflow = || Error::InvalidPower(size);

        // BLAKE2b-512 digests
        let hash_size = 64;

        // 2^{size}
        let powers_length = 1usize << size;
        // 2^{size+1} - 1
        let powers_g1_length = (powers_length << 1) - 1;

        // (2M - 1) g1 + M (g2 + 2 g1) + g2, in either encoding
        let accumulator_body = |g1: usize, g2: usize| -> Option<usize> {
            let tau_g1 = powers_g1_length.checked_mul(g1)?;
            let others = g1.checked_mul(2)?.checked_add(g2)?.checked_mul(powers_length)?;
            tau_g1.checked_add(others)?.checked_add(g2)
        };

        let public_key_size =
            // tau, alpha, beta in g2
            3 * curve.g2_size +
            // (s1, s1*tau), (s2, s2*alpha), (s3, s3*beta) in g1
            6 * curve.g1_size;

        let accumulator_size = accumulator_body(curve.g1_size, curve.g2_size)
            // Hash of the previous contribution
            .and_then(|body| body.checked_add(hash_size))
            .ok_or_else(overflow)?;

        let contribution_size = accumulator_body(curve.g1_compressed_size, curve.g2_compressed_size)
            // Hash of the challenge and the public key of the contributor
            .and_then(|body| body.checked_add(hash_size + public_key_size))
            .ok_or_else(overflow)?;

        Ok(Self {
            curve,
            powers_g1_length,
            powers_length,
            size,
            batch_size: std::cmp::max(batch_size, 1),
            public_key_size,
            accumulator_size,
            contribution_size,
            hash_size,
        })
    }

    /// Returns the length of the hash prefixed accumulator depending on if it's compressed or not
    pub fn get_length(&self, compressed: UseCompression) -> usize {
        match compressed {
            UseCompression::Yes => self.contribution_size - self.public_key_size,
            UseCompression::No => self.accumulator_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_377::Bls12_377;
    use ark_bn254::Bn254;

    fn curve_parameters_test<E: PairingCurve>(g1: usize, g2: usize, g1_compressed: usize, g2_compressed: usize) {
        let p = CurveParameters::<E>::new();
        assert_eq!(p.g1_size, g1);
        assert_eq!(p.g2_size, g2);
        assert_eq!(p.g1_compressed_size, g1_compressed);
        assert_eq!(p.g2_compressed_size, g2_compressed);
    }

    #[test]
    fn test_parameter_sizes() {
        curve_parameters_test::<Bn254>(64, 128, 32, 64);
        curve_parameters_test::<Bls12_377>(96, 192, 48, 96);
    }

    #[test]
    fn test_file_sizes_bn254() {
        let parameters = CeremonyParameters::<Bn254>::new(2, 256).unwrap();
        assert_eq!(parameters.powers_length, 4);
        assert_eq!(parameters.powers_g1_length, 7);
        assert_eq!(parameters.accumulator_size, 7 * 64 + 4 * (128 + 2 * 64) + 128 + 64);
        assert_eq!(parameters.public_key_size, 768);
        assert_eq!(parameters.contribution_size, 7 * 32 + 4 * (64 + 2 * 32) + 64 + 64 + 768);
        assert_eq!(parameters.get_length(UseCompression::No), parameters.accumulator_size);
        assert_eq!(parameters.get_length(UseCompression::Yes), 7 * 32 + 4 * (64 + 2 * 32) + 64 + 64);
    }

    #[test]
    fn test_zero_batch_size_is_clamped() {
        let parameters = CeremonyParameters::<Bn254>::new(3, 0).unwrap();
        assert_eq!(parameters.batch_size, 1);
    }

    #[test]
    fn test_unsupported_powers_are_rejected() {
        for size in [0, 62, 63, 64, 200] {
            let err = CeremonyParameters::<Bn254>::new(size, 256).unwrap_err();
            assert!(matches!(err, Error::InvalidPower(s) if s == size));
        }
        // file sizes overflow long before the power itself does
        assert!(matches!(
            CeremonyParameters::<Bn254>::new(58, 256),
            Err(Error::InvalidPower(58))
        ));
        assert_eq!(CeremonyParameters::<Bn254>::new(1, 256).unwrap().powers_g1_length, 3);
    }
}
