use crate::command_handlers::vulkan;
use crate::config::SetupConfig;
use crate::error::{ProvisionError, Step};
use crate::host::HostOps;
use crate::ops;
use crate::platform::Platform;

/// Everything a CI build needs. Today that is only the Vulkan SDK.
pub fn setup_ci(identifier: &str, cfg: &SetupConfig, host: &dyn HostOps) -> Result<(), ProvisionError> {
    match ops::resolve_platform(identifier)? {
        Platform::Windows | Platform::MacOs => vulkan::install_vulkan(identifier, cfg, host, true)?,
        Platform::Linux => {
            println!("Installing Vulkan for Debian-based systems...");
            ops::run_step(
                host,
                Step::PackageRepository,
                &ops::apt_get(&["update"], cfg.elevate),
            )?;
            ops::run_step(
                host,
                Step::PackageInstall,
                &ops::apt_get(&["install", "-y", cfg.vulkan.linux_package.as_str()], cfg.elevate),
            )?;
        }
    }
    println!("Dependencies should be set up.");
    Ok(())
}
