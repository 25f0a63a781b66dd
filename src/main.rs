mod cli;
mod command_handlers;
mod config;
mod error;
mod host;
mod ops;
mod platform;

use clap::Parser;
use std::path::Path;
use std::process::ExitCode;

use crate::cli::Cli;
use crate::config::SetupConfig;
use crate::error::ProvisionError;
use crate::host::HostOps;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli, host::host()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            if let Some(cause) = std::error::Error::source(&e) {
                eprintln!("  caused by: {cause}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli, host: &dyn HostOps) -> Result<(), ProvisionError> {
    let identifier = cli
        .platform
        .clone()
        .unwrap_or_else(platform::current_identifier);
    // An unknown platform exits 1 even when the config file is broken.
    ops::resolve_platform(&identifier)?;
    let cfg = load_config(cli.config.as_deref())?;
    command_handlers::dispatch::dispatch(cli.command, &cfg, host, &identifier)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SetupConfig> {
    let cwd = std::env::current_dir()?;
    Ok(SetupConfig::load(path)?.resolve_paths(&cwd))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
