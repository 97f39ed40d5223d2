//! Utilities for writing group elements to buffers in parallel
use crate::{buffer_size, Error, Result, UseCompression};

use ark_ec::AffineRepr;
use ark_std::cfg_chunks_mut;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::io::Write;

/// Used for writing elements to a buffer directly
pub trait Serializer {
    /// Writes a compressed or uncompressed element to the buffer
    fn write_element(&mut self, element: &impl AffineRepr, compression: UseCompression) -> Result<()>;

    /// Writes a list of elements serially
    fn write_elements_exact<G: AffineRepr>(&mut self, elements: &[G], compression: UseCompression) -> Result<()> {
        elements
            .iter()
            .try_for_each(|el| self.write_element(el, compression))
    }
}

pub trait BatchSerializer {
    /// Writes multiple elements to the buffer. The buffer must hold exactly
    /// `elements.len()` encoded elements.
    fn write_batch<G: AffineRepr>(&mut self, elements: &[G], compression: UseCompression) -> Result<()>;
}

impl<W: Write> Serializer for W {
    fn write_element(&mut self, element: &impl AffineRepr, compression: UseCompression) -> Result<()> {
        element.serialize_with_mode(self, compression.into())?;
        Ok(())
    }
}

impl BatchSerializer for [u8] {
    fn write_batch<G: AffineRepr>(&mut self, elements: &[G], compression: UseCompression) -> Result<()> {
        let element_size = buffer_size::<G>(compression);
        if self.len() != elements.len() * element_size {
            return Err(Error::InvalidLength {
                expected: elements.len() * element_size,
                got: self.len(),
            });
        }

        cfg_chunks_mut!(self, element_size)
            .zip(elements)
            .map(|(mut buf, element)| buf.write_element(element, compression))
            .collect()
    }
}
