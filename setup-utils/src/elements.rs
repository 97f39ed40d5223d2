use crate::{CurveElement, DecodingFailure};

use ark_serialize::Compress;

use std::fmt;

/// Determines if point compression should be used.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum UseCompression {
    Yes,
    No,
}

impl fmt::Display for UseCompression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            UseCompression::Yes => write!(f, "Yes"),
            UseCompression::No => write!(f, "No"),
        }
    }
}

impl From<UseCompression> for Compress {
    fn from(compression: UseCompression) -> Compress {
        match compression {
            UseCompression::Yes => Compress::Yes,
            UseCompression::No => Compress::No,
        }
    }
}

/// Determines which checks are run on every decoded point.
///
/// Points are always required to be on the curve. `No` must only be used
/// for data this process produced itself.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CheckForCorrectness {
    /// In the prime order subgroup and not the identity
    Full,
    OnlyNonZero,
    OnlyInGroup,
    No,
}

impl fmt::Display for CheckForCorrectness {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CheckForCorrectness::Full => write!(f, "Full"),
            CheckForCorrectness::OnlyNonZero => write!(f, "OnlyNonZero"),
            CheckForCorrectness::OnlyInGroup => write!(f, "OnlyInGroup"),
            CheckForCorrectness::No => write!(f, "No"),
        }
    }
}

/// The sections of a serialized accumulator and contribution.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementType {
    TauG1,
    TauG2,
    AlphaG1,
    BetaG1,
    BetaG2,
    PublicKey,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ElementType::TauG1 => write!(f, "TauG1"),
            ElementType::TauG2 => write!(f, "TauG2"),
            ElementType::AlphaG1 => write!(f, "AlphaG1"),
            ElementType::BetaG1 => write!(f, "BetaG1"),
            ElementType::BetaG2 => write!(f, "BetaG2"),
            ElementType::PublicKey => write!(f, "PublicKey"),
        }
    }
}

/// The secrets committed to by a public key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyComponent {
    Tau,
    Alpha,
    Beta,
}

impl KeyComponent {
    /// Domain separation tag used when hashing this component into G2.
    pub fn personalization(&self) -> u8 {
        match *self {
            KeyComponent::Tau => 0,
            KeyComponent::Alpha => 1,
            KeyComponent::Beta => 2,
        }
    }
}

impl fmt::Display for KeyComponent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KeyComponent::Tau => write!(f, "tau"),
            KeyComponent::Alpha => write!(f, "alpha"),
            KeyComponent::Beta => write!(f, "beta"),
        }
    }
}

/// Runs the checks requested by `check_for_correctness` on a decoded point.
pub fn check_element<C: CurveElement>(
    element: &C,
    check_for_correctness: CheckForCorrectness,
) -> Result<(), DecodingFailure> {
    if !element.on_curve() {
        return Err(DecodingFailure::NotOnCurve);
    }

    let (non_zero, in_group) = match check_for_correctness {
        CheckForCorrectness::Full => (true, true),
        CheckForCorrectness::OnlyNonZero => (true, false),
        CheckForCorrectness::OnlyInGroup => (false, true),
        CheckForCorrectness::No => (false, false),
    };

    if non_zero && element.is_zero() {
        return Err(DecodingFailure::PointAtInfinity);
    }
    if in_group && !element.in_prime_order_subgroup() {
        return Err(DecodingFailure::NotInSubgroup);
    }

    Ok(())
}
