use std::io;
use std::process::ExitCode;

use lscols::{Config, Flags, SystemClock, SystemIdentity};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from(Flags::from_args());
    log::debug!("{config:?}");

    let mut stdout = io::stdout().lock();
    match lscols::run(&config, &SystemIdentity::new(), &SystemClock, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}: {error}", env!("CARGO_PKG_NAME"));
            ExitCode::FAILURE
        }
    }
}
