use setup_utils::{print_hash, Error, Result};

use memmap::{Mmap, MmapOptions};
use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
};
use tracing::info;

/// Memory maps an input file after checking that it has exactly `expected` bytes.
pub(crate) fn map_input(fname: &str, expected: usize) -> Result<Mmap> {
    let reader = OpenOptions::new().read(true).open(fname)?;
    let got = reader.metadata()?.len() as usize;
    if got != expected {
        return Err(Error::SizeMismatch { expected, got });
    }

    let map = unsafe { MmapOptions::new().map(&reader)? };
    Ok(map)
}

/// Creates an output file, refusing to overwrite an existing one.
pub(crate) fn create_output(fname: &str) -> Result<BufWriter<File>> {
    let writer = OpenOptions::new().write(true).create_new(true).open(fname)?;
    Ok(BufWriter::new(writer))
}

/// Prints `hash` for the operator and stores its raw bytes in `fname`.
pub(crate) fn write_hash(fname: &str, description: &str, hash: &[u8]) -> Result<()> {
    info!("{} has hash:", description);
    print_hash(hash);
    File::create(fname)?.write_all(hash)?;
    Ok(())
}
