//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use env_logger::{Env, Target};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .init();
    if let Err(err) = saferoute_cli::run() {
        eprintln!("saferoute: {err}");
        std::process::exit(1);
    }
}
