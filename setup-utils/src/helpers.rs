use crate::{
    errors::{Error, VerificationError},
    Result,
};

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::Field;
use ark_serialize::CanonicalSerialize;
use ark_std::{cfg_into_iter, cfg_iter_mut, UniformRand};
use blake2::{digest::generic_array::GenericArray, Blake2b512, Digest};
use rand::{rngs::OsRng, thread_rng, Rng, RngCore, SeedableRng};
use rand_chacha::ChaChaRng;
use sha2::Sha256;
use typenum::consts::U64;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::io::{self, BufRead, Read, Write};
use tracing::info;

/// How many times a zero scalar is redrawn before giving up.
pub const MAX_SCALAR_ATTEMPTS: usize = 16;

/// Generate the powers by raising `tau` to all powers in `start..end`
pub fn generate_powers_of_tau<F: Field>(tau: &F, start: usize, end: usize) -> Vec<F> {
    cfg_into_iter!(start..end).map(|i| tau.pow([i as u64])).collect()
}

/// Prints a hash 16 bytes per line, grouped by 4 bytes.
pub fn print_hash(hash: &[u8]) {
    for line in hash.chunks(16) {
        print!("\t");
        for section in line.chunks(4) {
            for b in section {
                print!("{:02x}", b);
            }
            print!(" ");
        }
        println!();
    }
}

/// Exponentiate a large number of points, with an optional coefficient to be applied to the
/// exponent.
pub fn batch_exp<C: AffineRepr>(bases: &mut [C], exps: &[C::ScalarField], coeff: Option<&C::ScalarField>) -> Result<()> {
    if bases.len() != exps.len() {
        return Err(Error::InvalidLength {
            expected: bases.len(),
            got: exps.len(),
        });
    }
    // raise the base to the exponent and assign it back to the base
    // this will return the points as projective
    let points: Vec<C::Group> = cfg_iter_mut!(bases)
        .zip(exps)
        .map(|(base, exp)| {
            // If a coefficient was provided, multiply the exponent
            // by that coefficient
            let exp = match coeff {
                Some(coeff) => *exp * coeff,
                None => *exp,
            };

            *base * exp
        })
        .collect();
    let points = C::Group::normalize_batch(&points);
    cfg_iter_mut!(bases)
        .zip(points)
        .for_each(|(base, affine)| *base = affine);

    Ok(())
}

/// Draws a uniformly random non-zero scalar, redrawing on zero.
pub fn sample_nonzero_scalar<F: Field, R: Rng + ?Sized>(rng: &mut R) -> Result<F> {
    for _ in 0..MAX_SCALAR_ATTEMPTS {
        let scalar = F::rand(rng);
        if !scalar.is_zero() {
            return Ok(scalar);
        }
    }
    Err(Error::ScalarSamplingFailed(MAX_SCALAR_ATTEMPTS))
}

/// Mixes 1024 bytes of system randomness with a line of text read from
/// `user_input` and returns the BLAKE2b hash of both.
pub fn user_system_randomness<R: BufRead>(mut user_input: R) -> Result<Vec<u8>> {
    let mut h = Blake2b512::default();

    // Gather 1024 bytes of entropy from the system
    let mut system_entropy = [0u8; 1024];
    OsRng.fill_bytes(&mut system_entropy);
    h.update(system_entropy);

    let mut line = String::new();
    user_input.read_line(&mut line)?;
    h.update(line.as_bytes());

    Ok(h.finalize().to_vec())
}

/// Iterates SHA256 `2^num_iterations_exp` times over the beacon value and
/// prints 1024 of the intermediate states so that the computation can be
/// checked in parallel.
pub fn beacon_randomness(mut beacon_hash: [u8; 32], num_iterations_exp: usize) -> Result<[u8; 32]> {
    if !(10..=63).contains(&num_iterations_exp) {
        return Err(Error::InvalidBeaconIterations(num_iterations_exp));
    }
    let iterations = 1u64 << num_iterations_exp;
    let print_every = 1u64 << (num_iterations_exp - 10);

    for i in 0..iterations {
        if i % print_every == 0 {
            println!("{}: {}", i, to_hex(&beacon_hash));
        }

        let mut h = Sha256::new();
        h.update(beacon_hash);
        beacon_hash.copy_from_slice(&h.finalize());
    }

    println!("Final result of beacon: {}", to_hex(&beacon_hash));
    info!("beacon randomness derived after 2^{} iterations", num_iterations_exp);

    Ok(beacon_hash)
}

/// Lowercase hex rendering of a hash, used in logs.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Interpret the first 32 bytes of the digest as the seed of a ChaCha RNG
pub fn get_rng(digest: &[u8]) -> Result<ChaChaRng> {
    Ok(ChaChaRng::from_seed(from_slice(digest)?))
}

/// Abstraction over a writer which hashes the data being written.
pub struct HashWriter<W: Write> {
    writer: W,
    hasher: Blake2b512,
}

impl<W: Write> HashWriter<W> {
    /// Construct a new `HashWriter` given an existing `writer` by value.
    pub fn new(writer: W) -> Self {
        HashWriter {
            writer,
            hasher: Blake2b512::default(),
        }
    }

    /// Destroy this writer and return the hash of what was written.
    pub fn into_hash(self) -> GenericArray<u8, U64> {
        self.hasher.finalize()
    }
}

impl<W: Write> Write for HashWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let bytes = self.writer.write(buf)?;

        if bytes > 0 {
            self.hasher.update(&buf[0..bytes]);
        }

        Ok(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Abstraction over a reader which hashes the data being read.
pub struct HashReader<R: Read> {
    reader: R,
    hasher: Blake2b512,
    bytes_read: usize,
}

impl<R: Read> HashReader<R> {
    /// Construct a new `HashReader` given an existing `reader` by value.
    pub fn new(reader: R) -> Self {
        HashReader {
            reader,
            hasher: Blake2b512::default(),
            bytes_read: 0,
        }
    }

    /// Number of bytes which went through the reader so far.
    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    /// Destroy this reader and return the hash of what was read.
    pub fn into_hash(self) -> GenericArray<u8, U64> {
        self.hasher.finalize()
    }
}

impl<R: Read> Read for HashReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let bytes = self.reader.read(buf)?;

        if bytes > 0 {
            self.hasher.update(&buf[0..bytes]);
            self.bytes_read += bytes;
        }

        Ok(bytes)
    }
}

/// Calculate the BLAKE2b hash of an in-memory file.
pub fn calculate_hash(input_map: &[u8]) -> GenericArray<u8, U64> {
    let chunk_size = 1 << 30; // read by 1GB from map
    let mut hasher = Blake2b512::default();
    for chunk in input_map.chunks(chunk_size) {
        hasher.update(chunk);
    }
    hasher.finalize()
}

/// Compute BLAKE2b("")
pub fn blank_hash() -> GenericArray<u8, U64> {
    Blake2b512::new().finalize()
}

/// Hashes to G2 using the first 32 bytes of `digest` as the seed of a
/// ChaCha RNG from which a random point is sampled.
pub fn hash_to_g2<E: Pairing>(digest: &[u8]) -> Result<E::G2> {
    let mut rng = get_rng(digest)?;
    Ok(E::G2::rand(&mut rng))
}

/// Copies the first 32 bytes of `bytes`.
pub fn from_slice(bytes: &[u8]) -> Result<[u8; 32]> {
    let mut array = [0; 32];
    if bytes.len() < array.len() {
        return Err(Error::InvalidLength {
            expected: array.len(),
            got: bytes.len(),
        });
    }
    array.copy_from_slice(&bytes[..32]);
    Ok(array)
}

/// Multiplies both vectors by the same random scalars and sums them up,
/// so that `(s, s^x)` holds for the result if it held for every pair.
fn merge_pairs<G: AffineRepr>(v1: &[G], v2: &[G]) -> Result<(G, G)> {
    if v1.len() != v2.len() {
        return Err(Error::InvalidLength {
            expected: v1.len(),
            got: v2.len(),
        });
    }
    let rng = &mut thread_rng();

    let randomness: Vec<G::ScalarField> = (0..v1.len()).map(|_| G::ScalarField::rand(rng)).collect();

    let s = G::Group::msm_unchecked(v1, &randomness).into_affine();
    let sx = G::Group::msm_unchecked(v2, &randomness).into_affine();

    Ok((s, sx))
}

/// Construct a single pair (s, s^x) for a vector of
/// the form [1, x, x^2, x^3, ...].
pub fn power_pairs<G: AffineRepr>(v: &[G]) -> Result<(G, G)> {
    if v.len() < 2 {
        return Err(Error::InvalidLength {
            expected: 2,
            got: v.len(),
        });
    }
    merge_pairs(&v[0..(v.len() - 1)], &v[1..])
}

/// Checks if pairs have the same ratio.
/// Under the hood uses pairing to check
/// x1/x2 = y1/y2 => x1*y2 = x2*y1
pub fn same_ratio<E: Pairing>(g1: &(E::G1Affine, E::G1Affine), g2: &(E::G2Affine, E::G2Affine)) -> bool {
    E::pairing(g1.0, g2.1) == E::pairing(g1.1, g2.0)
}

/// Like `same_ratio`, failing with `err` when the ratios differ.
pub fn check_same_ratio<E: Pairing>(
    g1: &(E::G1Affine, E::G1Affine),
    g2: &(E::G2Affine, E::G2Affine),
    err: VerificationError,
) -> Result<()> {
    if !same_ratio::<E>(g1, g2) {
        return Err(err.into());
    }
    Ok(())
}

/// Compute BLAKE2b(personalization | transcript | g^s | g^{s*x})
/// and then hash it to G2
pub fn compute_g2_s<E: Pairing>(
    digest: &[u8],
    g1_s: &E::G1Affine,
    g1_s_x: &E::G1Affine,
    personalization: u8,
) -> Result<E::G2Affine> {
    let mut h = Blake2b512::default();
    h.update([personalization]);
    h.update(digest);
    let mut data = Vec::with_capacity(2 * g1_s.compressed_size());
    g1_s.serialize_compressed(&mut data)?;
    g1_s_x.serialize_compressed(&mut data)?;
    h.update(&data);
    Ok(hash_to_g2::<E>(h.finalize().as_ref())?.into_affine())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_377::Bls12_377;
    use ark_bn254::{Bn254, Fr, G1Affine, G2Affine};
    use ark_ff::{One, Zero};

    #[test]
    fn test_hash_to_g2() {
        test_hash_to_g2_curve::<Bn254>();
        test_hash_to_g2_curve::<Bls12_377>();
    }

    fn test_hash_to_g2_curve<E: Pairing>() {
        let mut digest: Vec<u8> = (1..=33).collect();
        let first = hash_to_g2::<E>(&digest).unwrap();
        // only the first 32 bytes are used
        digest[32] = 34;
        assert_eq!(first, hash_to_g2::<E>(&digest).unwrap());
        digest[31] = 33;
        assert_ne!(first, hash_to_g2::<E>(&digest).unwrap());

        assert!(hash_to_g2::<E>(&digest[..31]).is_err());
    }

    #[test]
    fn test_same_ratio() {
        let rng = &mut thread_rng();

        let s = Fr::rand(rng);
        let g1 = G1Affine::generator();
        let g2 = G2Affine::generator();
        let g1_s = (g1 * s).into_affine();
        let g2_s = (g2 * s).into_affine();

        assert!(same_ratio::<Bn254>(&(g1, g1_s), &(g2, g2_s)));
        assert!(!same_ratio::<Bn254>(&(g1_s, g1), &(g2, g2_s)));
        assert_eq!(
            check_same_ratio::<Bn254>(
                &(g1_s, g1),
                &(g2, g2_s),
                VerificationError::InvalidGenerator(crate::ElementType::TauG1)
            )
            .unwrap_err()
            .to_string(),
            "Error during verification: Invalid generator for TauG1 powers"
        );
    }

    #[test]
    fn test_power_pairs() {
        let rng = &mut thread_rng();

        let mut v = vec![];
        let x = Fr::rand(rng);
        let mut acc = Fr::one();
        for _ in 0..100 {
            v.push((G1Affine::generator() * acc).into_affine());
            acc *= x;
        }

        let gx = (G2Affine::generator() * x).into_affine();

        assert!(same_ratio::<Bn254>(
            &power_pairs(&v).unwrap(),
            &(G2Affine::generator(), gx)
        ));

        v[1] = (v[1] * Fr::rand(rng)).into_affine();

        assert!(!same_ratio::<Bn254>(
            &power_pairs(&v).unwrap(),
            &(G2Affine::generator(), gx)
        ));

        assert!(power_pairs(&v[..1]).is_err());
    }

    #[test]
    fn test_generate_powers_of_tau() {
        let tau = Fr::from(3u64);
        let powers = generate_powers_of_tau(&tau, 2, 5);
        assert_eq!(powers, vec![Fr::from(9u64), Fr::from(27u64), Fr::from(81u64)]);
    }

    #[test]
    fn test_batch_exp() {
        let rng = &mut thread_rng();
        let mut bases = vec![G1Affine::generator(); 5];
        let exps: Vec<Fr> = (0..5).map(|_| Fr::rand(rng)).collect();
        let coeff = Fr::rand(rng);

        batch_exp(&mut bases, &exps, Some(&coeff)).unwrap();
        for (base, exp) in bases.iter().zip(&exps) {
            assert_eq!(*base, (G1Affine::generator() * (*exp * coeff)).into_affine());
        }

        assert!(batch_exp(&mut bases, &exps[..4], None).is_err());
    }

    #[test]
    fn test_hash_reader_and_writer_are_transparent() {
        let data: Vec<u8> = (0..=255).collect();

        let mut writer = HashWriter::new(vec![]);
        writer.write_all(&data).unwrap();
        let write_hash = writer.into_hash();

        let mut reader = HashReader::new(&data[..]);
        let mut read_back = vec![];
        reader.read_to_end(&mut read_back).unwrap();
        assert_eq!(reader.bytes_read(), data.len());
        let read_hash = reader.into_hash();

        assert_eq!(read_back, data);
        assert_eq!(write_hash, read_hash);
        assert_eq!(write_hash, calculate_hash(&data));
        assert_ne!(write_hash, blank_hash());
    }

    #[test]
    fn test_blank_hash_is_hash_of_nothing() {
        assert_eq!(blank_hash(), calculate_hash(&[]));
        assert_eq!(
            blank_hash()[..4],
            [0x78, 0x6a, 0x02, 0xf7]
        );
    }

    #[test]
    fn test_beacon_randomness() {
        let seed = [7u8; 32];
        let first = beacon_randomness(seed, 10).unwrap();
        assert_eq!(first, beacon_randomness(seed, 10).unwrap());
        assert_ne!(first, seed);

        assert!(matches!(
            beacon_randomness(seed, 9),
            Err(Error::InvalidBeaconIterations(9))
        ));
        assert!(matches!(
            beacon_randomness(seed, 64),
            Err(Error::InvalidBeaconIterations(64))
        ));
    }

    #[test]
    fn test_user_system_randomness_differs_between_runs() {
        let a = user_system_randomness(&b"same text\n"[..]).unwrap();
        let b = user_system_randomness(&b"same text\n"[..]).unwrap();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn test_sample_nonzero_scalar() {
        let rng = &mut thread_rng();
        let s: Fr = sample_nonzero_scalar(rng).unwrap();
        assert!(!s.is_zero());
    }
}
