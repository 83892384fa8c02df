// src/main.rs

use nvr::cli::{self, CliArgs};
use nvr::config::EnvOverrides;
use nvr::engine::Outcome;
use nvr::errors::NvrError;
use nvr::{logging, run};

#[tokio::main]
async fn main() {
    let env = EnvOverrides::from_env();

    // A nested build must never fail on its arguments, so parse errors only
    // count for a fresh invocation.
    let args = match cli::try_parse() {
        Ok(args) => args,
        Err(_) if env.running => CliArgs::default(),
        Err(err) => err.exit(),
    };

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("nvr: {err:#}");
    }

    match run(args, env).await {
        Ok(Outcome::Merged { function, routes }) => {
            eprintln!("nvr: routed {} pattern(s) to {function}", routes.len());
        }
        Ok(_) => {}
        Err(err) => {
            match &err {
                NvrError::Usage(msg) => eprintln!("{msg}"),
                _ => eprintln!("nvr error: {err}"),
            }
            std::process::exit(err.exit_code());
        }
    }
}
