mod parameters;
pub use parameters::*;

mod private_key;
pub use private_key::PrivateKey;

mod public_key;
pub use public_key::PublicKey;
