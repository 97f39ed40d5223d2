//! The curve capabilities the ceremony relies on.
use ark_ec::{
    pairing::Pairing,
    short_weierstrass::{Affine, SWCurveConfig},
    AffineRepr,
};

/// An affine group element which can report whether it satisfies the curve
/// equation and whether it lies in the prime order subgroup.
pub trait CurveElement: AffineRepr {
    fn on_curve(&self) -> bool;

    /// Assumes that `on_curve` holds.
    fn in_prime_order_subgroup(&self) -> bool;
}

impl<P: SWCurveConfig> CurveElement for Affine<P> {
    fn on_curve(&self) -> bool {
        self.is_on_curve()
    }

    fn in_prime_order_subgroup(&self) -> bool {
        self.is_in_correct_subgroup_assuming_on_curve()
    }
}

/// A pairing engine whose groups can be validated element by element.
pub trait PairingCurve: Pairing<G1Affine: CurveElement, G2Affine: CurveElement> {}

impl<E> PairingCurve for E where E: Pairing<G1Affine: CurveElement, G2Affine: CurveElement> {}
