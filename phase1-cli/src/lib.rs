mod files;

mod new_challenge;
pub use new_challenge::new_challenge;

mod contribute;
pub use contribute::{beacon, contribute};

mod verify_transform;
pub use verify_transform::verify_transform;

mod prepare_phase2;
pub use prepare_phase2::prepare_phase2;

use powersoftau::helpers::{correctness_from_str, curve_from_str, CurveKind};
use setup_utils::CheckForCorrectness;

use gumdrop::Options;

#[derive(Debug, Options, Clone)]
pub struct PowersOfTauOpts {
    help: bool,
    #[options(
        help = "the elliptic curve to use",
        default = "bn254",
        parse(try_from_str = "curve_from_str")
    )]
    pub curve_kind: CurveKind,
    #[options(help = "the size of batches to process", default = "256")]
    pub batch_size: usize,
    #[options(help = "the circuit power (circuit size will be 2^{power})", default = "21")]
    pub power: usize,
    #[options(command)]
    pub command: Option<Command>,
}

// The supported commands
#[derive(Debug, Options, Clone)]
pub enum Command {
    #[options(help = "creates the genesis challenge of the ceremony")]
    New(NewOpts),
    #[options(help = "contribute to the ceremony by producing a response to a challenge")]
    Contribute(ContributeOpts),
    #[options(help = "contribute randomness via a random beacon (e.g. a bitcoin block header hash)")]
    Beacon(BeaconOpts),
    // this receives a challenge + response file, verifies it and generates a new challenge
    #[options(help = "verify a response against its challenge and generate the next challenge")]
    VerifyTransform(VerifyTransformOpts),
    #[options(help = "compute the Lagrange coefficients of a challenge for phase 2")]
    PreparePhase2(PreparePhase2Opts),
}

#[derive(Debug, Options, Clone)]
pub struct NewOpts {
    help: bool,
    #[options(help = "the challenge file name to be created", default = "challenge")]
    pub challenge_fname: String,
    #[options(help = "the new challenge file hash", default = "challenge.hash")]
    pub challenge_hash_fname: String,
}

#[derive(Debug, Options, Clone)]
pub struct ContributeOpts {
    help: bool,
    #[options(help = "a file with a hex encoded seed, for reproducible contributions")]
    pub seed: Option<String>,
    #[options(help = "the provided challenge file", default = "challenge")]
    pub challenge_fname: String,
    #[options(help = "the provided challenge file hash", default = "challenge.hash")]
    pub challenge_hash_fname: String,
    #[options(help = "the response file which will be generated", default = "response")]
    pub response_fname: String,
    #[options(help = "the response file which will be generated hash", default = "response.hash")]
    pub response_hash_fname: String,
    #[options(
        help = "the checks to run on the points of the challenge (full, only_in_group, only_non_zero, no)",
        default = "full",
        parse(try_from_str = "correctness_from_str")
    )]
    pub challenge_checks: CheckForCorrectness,
}

#[derive(Debug, Options, Clone)]
pub struct BeaconOpts {
    help: bool,
    #[options(help = "the provided challenge file", default = "challenge")]
    pub challenge_fname: String,
    #[options(help = "the provided challenge file hash", default = "challenge.hash")]
    pub challenge_hash_fname: String,
    #[options(help = "the response file which will be generated", default = "response")]
    pub response_fname: String,
    #[options(help = "the response file which will be generated hash", default = "response.hash")]
    pub response_hash_fname: String,
    #[options(
        help = "the beacon hash to be used for the contribution",
        default = "0000000000000000000a558a61ddc8ee4e488d647a747fe4dcc362fe2026c620"
    )]
    pub beacon_hash: String,
    #[options(help = "the beacon hash is iterated 2^{num_iterations_exp} times", default = "42")]
    pub num_iterations_exp: usize,
    #[options(
        help = "the checks to run on the points of the challenge (full, only_in_group, only_non_zero, no)",
        default = "full",
        parse(try_from_str = "correctness_from_str")
    )]
    pub challenge_checks: CheckForCorrectness,
}

#[derive(Debug, Options, Clone)]
pub struct VerifyTransformOpts {
    help: bool,
    #[options(help = "the provided challenge file", default = "challenge")]
    pub challenge_fname: String,
    #[options(help = "the provided response file which will be verified", default = "response")]
    pub response_fname: String,
    #[options(help = "the response file hash", default = "response.verified.hash")]
    pub response_hash_fname: String,
    #[options(
        help = "the new challenge file which will be generated in response",
        default = "new_challenge"
    )]
    pub new_challenge_fname: String,
    #[options(
        help = "the new challenge file which will be generated in response hash",
        default = "new_challenge.hash"
    )]
    pub new_challenge_hash_fname: String,
    #[options(
        help = "the checks to run on the points of the challenge (full, only_in_group, only_non_zero, no)",
        default = "full",
        parse(try_from_str = "correctness_from_str")
    )]
    pub challenge_checks: CheckForCorrectness,
}

#[derive(Debug, Options, Clone)]
pub struct PreparePhase2Opts {
    help: bool,
    #[options(help = "the verified challenge which will be processed for phase 2", default = "challenge")]
    pub challenge_fname: String,
    #[options(
        help = "the file which will contain the FFT coefficients processed for phase 2",
        default = "phase1"
    )]
    pub phase2_fname: String,
    #[options(help = "the size (in powers) of the phase 2 circuit", default = "21")]
    pub phase2_size: usize,
}
