use setup_utils::PairingCurve;

/// Contains the secrets τ, α and β that the participant of the ceremony must destroy.
///
/// Deliberately neither `Debug` nor serializable.
pub struct PrivateKey<E: PairingCurve> {
    pub tau: E::ScalarField,
    pub alpha: E::ScalarField,
    pub beta: E::ScalarField,
}
