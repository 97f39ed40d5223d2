//! Utilities for writing and reading group elements to buffers compressed and uncompressed
mod read;
pub use read::{BatchDeserializer, Deserializer};

mod write;
pub use write::{BatchSerializer, Serializer};

use crate::{Error, Result, UseCompression};

use ark_ec::AffineRepr;
use std::io::{self, Read};

/// The number of bytes a single element occupies in the requested encoding.
pub fn buffer_size<C: AffineRepr>(compression: UseCompression) -> usize {
    C::generator().serialized_size(compression.into())
}

/// Fails with `SizeMismatch` if `reader` still has bytes left once an input
/// of `expected` bytes has been parsed.
pub fn ensure_exhausted<R: Read>(reader: &mut R, expected: usize) -> Result<()> {
    let remaining = io::copy(reader, &mut io::sink())? as usize;
    if remaining != 0 {
        return Err(Error::SizeMismatch {
            expected,
            got: expected + remaining,
        });
    }
    Ok(())
}
