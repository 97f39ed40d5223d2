use crate::{ElementType, KeyComponent};

use ark_serialize::SerializationError;

use std::{fmt, io};
use thiserror::Error;

/// Errors that might occur while running the ceremony.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Disk IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error in arkworks: {0}")]
    ArkSerializationError(#[from] SerializationError),
    #[error("Could not decode {element} element at index {index}: {reason}")]
    PointDecodingError {
        element: ElementType,
        index: usize,
        reason: DecodingFailure,
    },
    #[error("Unexpected input size: expected {expected} bytes, got {got}")]
    SizeMismatch { expected: usize, got: usize },
    #[error("The response was not produced from this challenge (hash chain mismatch)")]
    HashChainMismatch,
    #[error("Error during verification: {0}")]
    VerificationError(#[from] VerificationError),
    #[error("Invalid variable length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("Could not sample a non-zero scalar after {0} attempts")]
    ScalarSamplingFailed(usize),
    #[error("Beacon iteration exponent must be between 10 and 63 (got {0})")]
    InvalidBeaconIterations(usize),
    #[error("Unsupported circuit power {0}")]
    InvalidPower(usize),
    #[error("Cannot build an evaluation domain of size {0}")]
    InvalidDomainSize(usize),
    #[error("Crossbeam error during while joining the thread")]
    CrossBeamError,
}

impl From<Box<dyn std::any::Any + Send>> for Error {
    fn from(_: Box<dyn std::any::Any + Send>) -> Error {
        Error::CrossBeamError
    }
}

/// The reason a serialized group element was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecodingFailure {
    WrongLength,
    InvalidEncoding,
    NotOnCurve,
    NotInSubgroup,
    PointAtInfinity,
}

impl fmt::Display for DecodingFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecodingFailure::WrongLength => write!(f, "wrong byte length"),
            DecodingFailure::InvalidEncoding => write!(f, "invalid encoding"),
            DecodingFailure::NotOnCurve => write!(f, "not on curve"),
            DecodingFailure::NotInSubgroup => write!(f, "not in the prime order subgroup"),
            DecodingFailure::PointAtInfinity => write!(f, "point at infinity"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum VerificationError {
    #[error("Invalid blinding factor in the {0} part of the public key")]
    InvalidBlindingFactor(KeyComponent),
    #[error("Invalid proof of knowledge for {0}")]
    InvalidProofOfKnowledge(KeyComponent),
    /// The first power of Tau was not the generator of that group
    #[error("Invalid generator for {0} powers")]
    InvalidGenerator(ElementType),
    /// The new accumulator is not the old one multiplied by the committed secret
    #[error("{0} was not transformed by the committed secret")]
    InvalidContribution(ElementType),
    /// Consecutive powers in the range do not share the same ratio
    #[error("Invalid ratio for {element} powers in range {start}..{end}")]
    InvalidRatio {
        element: ElementType,
        start: usize,
        end: usize,
    },
}
