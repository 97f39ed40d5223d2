use setup_utils::{CheckForCorrectness, Deserializer, ElementType, PairingCurve, Result, Serializer, UseCompression};

use derivative::Derivative;
use std::io::{Read, Write};

/// Contains terms of the form (s<sub>1</sub>, s<sub>1</sub><sup>x</sup>, H(s<sub>1</sub><sup>x</sup>)<sub>2</sub>, H(s<sub>1</sub><sup>x</sup>)<sub>2</sub><sup>x</sup>)
/// for all x in τ, α and β, and some s chosen randomly by its creator. The function H "hashes into" the group G2.
/// No points in the public key may be the identity.
///
/// The elements in G2 are used to verify transformations of the accumulator. By its nature, the public key proves
/// knowledge of τ, α and β.
///
/// It is necessary to verify `same_ratio`((s<sub>1</sub>, s<sub>1</sub><sup>x</sup>), (H(s<sub>1</sub><sup>x</sup>)<sub>2</sub>, H(s<sub>1</sub><sup>x</sup>)<sub>2</sub><sup>x</sup>)).
#[derive(Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""), PartialEq(bound = ""), Eq(bound = ""))]
pub struct PublicKey<E: PairingCurve> {
    pub tau_g1: (E::G1Affine, E::G1Affine),
    pub alpha_g1: (E::G1Affine, E::G1Affine),
    pub beta_g1: (E::G1Affine, E::G1Affine),
    pub tau_g2: E::G2Affine,
    pub alpha_g2: E::G2Affine,
    pub beta_g2: E::G2Affine,
}

impl<E: PairingCurve> PublicKey<E> {
    /// Number of points in a serialized key.
    pub const NUM_ELEMENTS: usize = 9;

    /// Writes the key uncompressed: the three G1 pairs followed by the three G2 points.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let g1 = [
            self.tau_g1.0,
            self.tau_g1.1,
            self.alpha_g1.0,
            self.alpha_g1.1,
            self.beta_g1.0,
            self.beta_g1.1,
        ];
        writer.write_elements_exact(&g1, UseCompression::No)?;
        writer.write_elements_exact(&[self.tau_g2, self.alpha_g2, self.beta_g2], UseCompression::No)?;

        Ok(())
    }

    /// Reads an uncompressed key. Failing points are reported with their
    /// position 0..9 inside the key.
    pub fn read<R: Read>(reader: &mut R, check_for_correctness: CheckForCorrectness) -> Result<Self> {
        let g1: Vec<E::G1Affine> =
            reader.read_elements_exact(ElementType::PublicKey, 6, UseCompression::No, check_for_correctness)?;
        let g2 = (6..Self::NUM_ELEMENTS)
            .map(|index| {
                reader.read_element::<E::G2Affine>(
                    ElementType::PublicKey,
                    index,
                    UseCompression::No,
                    check_for_correctness,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PublicKey {
            tau_g1: (g1[0], g1[1]),
            alpha_g1: (g1[2], g1[3]),
            beta_g1: (g1[4], g1[5]),
            tau_g2: g2[0],
            alpha_g2: g2[1],
            beta_g2: g2[2],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{keypair, CeremonyParameters};
    use setup_utils::{blank_hash, DecodingFailure, Error};

    use ark_bls12_377::Bls12_377;
    use ark_bn254::Bn254;
    use ark_ec::AffineRepr;
    use rand::thread_rng;

    fn public_key_roundtrip<E: PairingCurve>() {
        let parameters = CeremonyParameters::<E>::new(1, 1).unwrap();
        let (pubkey, _) = keypair::<E, _>(&mut thread_rng(), blank_hash().as_ref()).unwrap();

        let mut buf = Vec::new();
        pubkey.write(&mut buf).unwrap();
        assert_eq!(buf.len(), parameters.public_key_size);

        let deserialized = PublicKey::<E>::read(&mut buf.as_slice(), CheckForCorrectness::Full).unwrap();
        assert_eq!(deserialized, pubkey);
    }

    #[test]
    fn test_public_key_serialization() {
        public_key_roundtrip::<Bn254>();
        public_key_roundtrip::<Bls12_377>();
    }

    #[test]
    fn test_identity_in_key_is_rejected() {
        let (mut pubkey, _) = keypair::<Bn254, _>(&mut thread_rng(), blank_hash().as_ref()).unwrap();
        pubkey.alpha_g2 = <Bn254 as ark_ec::pairing::Pairing>::G2Affine::zero();

        let mut buf = Vec::new();
        pubkey.write(&mut buf).unwrap();

        let err = PublicKey::<Bn254>::read(&mut buf.as_slice(), CheckForCorrectness::Full).unwrap_err();
        match err {
            Error::PointDecodingError { element, index, reason } => {
                assert_eq!(element, ElementType::PublicKey);
                assert_eq!(index, 7);
                assert_eq!(reason, DecodingFailure::PointAtInfinity);
            }
            e => panic!("unexpected error {:?}", e),
        }
    }
}
