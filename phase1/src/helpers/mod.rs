pub(crate) mod accumulator;

pub mod converters;
pub use converters::*;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
