use powersoftau::{helpers::CurveKind, CeremonyParameters};
use powersoftau_cli::{beacon, contribute, new_challenge, prepare_phase2, verify_transform, Command, PowersOfTauOpts};
use setup_utils::{derive_rng_from_seed, get_rng, user_system_randomness, Error, PairingCurve, Result};

use ark_bls12_377::Bls12_377;
use ark_bn254::Bn254;

use gumdrop::Options;
use std::{
    fs::read_to_string,
    io::{self, ErrorKind},
    process,
    time::Instant,
};
use tracing::error;
use tracing_subscriber::{
    filter::EnvFilter,
    fmt::{time::ChronoUtc, Subscriber},
};

fn decode_hex(hex_string: &str) -> Result<Vec<u8>> {
    hex::decode(hex_string.trim()).map_err(|e| Error::IoError(io::Error::new(ErrorKind::InvalidData, e)))
}

fn execute_cmd<E: PairingCurve>(opts: &PowersOfTauOpts, command: Command) -> Result<()> {
    let parameters = CeremonyParameters::<E>::new(opts.power, opts.batch_size)?;

    match command {
        Command::New(opt) => new_challenge(&opt.challenge_fname, &opt.challenge_hash_fname, &parameters),
        Command::Contribute(opt) => {
            let mut rng = match &opt.seed {
                Some(seed_fname) => derive_rng_from_seed(&decode_hex(&read_to_string(seed_fname)?)?),
                None => {
                    println!("Type some random text and press [ENTER] to provide additional entropy...");
                    get_rng(&user_system_randomness(io::stdin().lock())?)?
                }
            };
            contribute(
                &opt.challenge_fname,
                &opt.challenge_hash_fname,
                &opt.response_fname,
                &opt.response_hash_fname,
                opt.challenge_checks,
                &mut rng,
                &parameters,
            )
        }
        Command::Beacon(opt) => {
            let beacon_hash = decode_hex(&opt.beacon_hash)?;
            let beacon_hash = <[u8; 32]>::try_from(beacon_hash.as_slice()).map_err(|_| Error::InvalidLength {
                expected: 32,
                got: beacon_hash.len(),
            })?;
            beacon(
                &opt.challenge_fname,
                &opt.challenge_hash_fname,
                &opt.response_fname,
                &opt.response_hash_fname,
                beacon_hash,
                opt.num_iterations_exp,
                opt.challenge_checks,
                &parameters,
            )
        }
        Command::VerifyTransform(opt) => verify_transform(
            &opt.challenge_fname,
            &opt.response_fname,
            &opt.response_hash_fname,
            &opt.new_challenge_fname,
            &opt.new_challenge_hash_fname,
            opt.challenge_checks,
            &parameters,
        ),
        Command::PreparePhase2(opt) => {
            prepare_phase2(&opt.challenge_fname, &opt.phase2_fname, opt.phase2_size, &parameters)
        }
    }
}

fn main() {
    Subscriber::builder()
        .with_target(false)
        .with_timer(ChronoUtc::rfc_3339())
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts: PowersOfTauOpts = PowersOfTauOpts::parse_args_default_or_exit();

    let command = opts.clone().command.unwrap_or_else(|| {
        eprintln!("No command was provided.");
        eprintln!("{}", PowersOfTauOpts::usage());
        process::exit(2)
    });

    let now = Instant::now();
    let result = match opts.curve_kind {
        CurveKind::Bn254 => execute_cmd::<Bn254>(&opts, command),
        CurveKind::Bls12_377 => execute_cmd::<Bls12_377>(&opts, command),
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let new_now = Instant::now();
    println!("Executing {:?} took: {:?}", opts, new_now.duration_since(now));
}
