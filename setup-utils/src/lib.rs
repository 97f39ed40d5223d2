//! # setup-utils
//!
//! Utilities for running powers of tau ceremonies over pairing friendly curves.
//! Provides traits for batched writing and reading group elements to buffers,
//! the hash chain primitives and the pairing helpers used during verification.
pub mod errors;
pub use errors::{DecodingFailure, Error, VerificationError};

/// A convenience result type for returning errors
pub type Result<T> = std::result::Result<T, Error>;

mod curve;
pub use curve::{CurveElement, PairingCurve};

mod groth16_utils;
pub use groth16_utils::Groth16Params;

mod elements;
pub use elements::{check_element, CheckForCorrectness, ElementType, KeyComponent, UseCompression};

mod helpers;
pub use helpers::*;

mod io;
pub use io::{buffer_size, ensure_exhausted, BatchDeserializer, BatchSerializer, Deserializer, Serializer};

pub mod rayon_cfg;

mod seed;
pub use seed::{derive_rng_from_seed, SEED_PERSONALIZATION};

// Re-exports for handling hashes
pub use blake2::digest::generic_array::GenericArray;
pub use typenum::U64;

pub use ark_std::{cfg_chunks, cfg_chunks_mut, cfg_into_iter, cfg_iter, cfg_iter_mut};
