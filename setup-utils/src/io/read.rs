use crate::{buffer_size, check_element, CheckForCorrectness, CurveElement, DecodingFailure, ElementType, Error, Result, UseCompression};

use ark_serialize::{CanonicalSerialize, SerializationError, Validate};
use ark_std::cfg_chunks;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::io::Read;

/// Used for reading 1 group element at a time from a stream
pub trait Deserializer {
    /// Reads 1 compressed or uncompressed element. Decoding failures are
    /// attributed to `element` at position `index`.
    fn read_element<G: CurveElement>(
        &mut self,
        element: ElementType,
        index: usize,
        compression: UseCompression,
        check_correctness: CheckForCorrectness,
    ) -> Result<G>;

    /// Reads exact number of elements
    fn read_elements_exact<G: CurveElement>(
        &mut self,
        element: ElementType,
        num: usize,
        compression: UseCompression,
        check_correctness: CheckForCorrectness,
    ) -> Result<Vec<G>> {
        (0..num)
            .map(|index| self.read_element(element, index, compression, check_correctness))
            .collect()
    }
}

pub trait BatchDeserializer {
    /// Reads multiple elements from the buffer
    fn read_batch<G: CurveElement>(
        &self,
        element: ElementType,
        compression: UseCompression,
        check_correctness: CheckForCorrectness,
    ) -> Result<Vec<G>> {
        self.read_batch_from(element, 0, compression, check_correctness)
    }

    /// Reads multiple elements from the buffer, where the first one sits at
    /// position `first_index` of its section
    fn read_batch_from<G: CurveElement>(
        &self,
        element: ElementType,
        first_index: usize,
        compression: UseCompression,
        check_correctness: CheckForCorrectness,
    ) -> Result<Vec<G>>;
}

/// Decodes a single point from exactly one element's worth of bytes.
pub(crate) fn decode_element<G: CurveElement>(
    bytes: &[u8],
    compression: UseCompression,
    check_correctness: CheckForCorrectness,
) -> std::result::Result<G, DecodingFailure> {
    if bytes.len() != buffer_size::<G>(compression) {
        return Err(DecodingFailure::WrongLength);
    }

    // curve and subgroup membership are checked below so that failures
    // can be reported precisely
    let point = G::deserialize_with_mode(bytes, compression.into(), Validate::No).map_err(|err| match err {
        SerializationError::InvalidData if compression == UseCompression::Yes => DecodingFailure::NotOnCurve,
        SerializationError::IoError(_) | SerializationError::NotEnoughSpace => DecodingFailure::WrongLength,
        _ => DecodingFailure::InvalidEncoding,
    })?;

    // only the canonical encoding of a point is accepted
    let mut canonical = Vec::with_capacity(bytes.len());
    point
        .serialize_with_mode(&mut canonical, compression.into())
        .map_err(|_| DecodingFailure::InvalidEncoding)?;
    if canonical != bytes {
        return Err(DecodingFailure::InvalidEncoding);
    }

    check_element(&point, check_correctness)?;

    Ok(point)
}

impl<R: Read> Deserializer for R {
    fn read_element<G: CurveElement>(
        &mut self,
        element: ElementType,
        index: usize,
        compression: UseCompression,
        check_correctness: CheckForCorrectness,
    ) -> Result<G> {
        let mut buf = vec![0; buffer_size::<G>(compression)];
        self.read_exact(&mut buf)?;
        decode_element(&buf, compression, check_correctness)
            .map_err(|reason| Error::PointDecodingError { element, index, reason })
    }
}

// We implement this specifically for slices so that we can take advantage
// of parallel iterators
impl BatchDeserializer for [u8] {
    fn read_batch_from<G: CurveElement>(
        &self,
        element: ElementType,
        first_index: usize,
        compression: UseCompression,
        check_correctness: CheckForCorrectness,
    ) -> Result<Vec<G>> {
        let size = buffer_size::<G>(compression);
        if self.len() % size != 0 {
            return Err(Error::InvalidLength {
                expected: (self.len() / size + 1) * size,
                got: self.len(),
            });
        }

        let decoded: Vec<_> = cfg_chunks!(self, size)
            .map(|buf| decode_element(buf, compression, check_correctness))
            .collect();

        // report the lowest failing index whatever order the chunks were decoded in
        decoded
            .into_iter()
            .enumerate()
            .map(|(i, point)| {
                point.map_err(|reason| Error::PointDecodingError {
                    element,
                    index: first_index + i,
                    reason,
                })
            })
            .collect()
    }
}
