use crate::error::{ProvisionError, Step};
use crate::host::{HostOps, Invocation};
use crate::platform::Platform;
use std::path::{Path, PathBuf};

pub fn resolve_platform(identifier: &str) -> Result<Platform, ProvisionError> {
    Platform::from_identifier(identifier)
        .ok_or_else(|| ProvisionError::UnsupportedPlatform(identifier.to_string()))
}

/// Runs one external step; a non-zero exit or a failed spawn aborts with `step`.
pub fn run_step(host: &dyn HostOps, step: Step, invocation: &Invocation) -> Result<(), ProvisionError> {
    log::info!("running {invocation}");
    match host.run(invocation) {
        Ok(0) => Ok(()),
        Ok(code) => Err(ProvisionError::step(
            step,
            format!("`{invocation}` exited with code {code}"),
        )),
        Err(e) => Err(ProvisionError::step(
            step,
            format!("`{invocation}` could not be started: {e:#}"),
        )),
    }
}

pub fn ensure_output_dir(host: &dyn HostOps, dir: &Path) -> Result<(), ProvisionError> {
    if host.dir_exists(dir) {
        return Ok(());
    }
    log::debug!("creating {}", dir.display());
    host.create_dir_all(dir)?;
    Ok(())
}

/// Downloads `url` to `<dir>/<file_name>` and returns the written path.
pub fn retrieve(
    host: &dyn HostOps,
    dir: &Path,
    url: &str,
    file_name: &str,
) -> Result<PathBuf, ProvisionError> {
    let dest = dir.join(file_name);
    println!("Downloading {url}");
    host.fetch(url, &dest).map_err(|source| ProvisionError::Fetch {
        url: url.to_string(),
        source,
    })?;
    Ok(dest)
}

pub fn apt_get(args: &[&str], elevate: bool) -> Invocation {
    Invocation::new("apt-get")
        .args(args.iter().copied())
        .elevated(elevate)
}

/// GitHub Actions workflow command; the runner picks the variable up for later steps.
pub fn set_env_line(name: &str, value: &str) -> String {
    format!("::set-env name={name}::{value}")
}
