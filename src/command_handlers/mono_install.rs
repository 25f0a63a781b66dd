use crate::config::SetupConfig;
use crate::error::{ProvisionError, Step};
use crate::host::{path_arg, HostOps, Invocation};
use crate::ops;
use crate::platform::Platform;

const LINUX_INSTRUCTIONS: &str = "https://www.mono-project.com/download/stable/#download-lin";
const MSIEXEC: &str = "C:\\Windows\\System32\\msiexec.exe";

/// Installs a prebuilt Mono. On Linux only `ci` runs go through apt; a
/// developer machine is pointed at the distribution instructions instead.
pub fn install_mono(
    identifier: &str,
    cfg: &SetupConfig,
    host: &dyn HostOps,
    ci: bool,
) -> Result<(), ProvisionError> {
    let platform = ops::resolve_platform(identifier)?;
    match platform {
        Platform::Windows => {
            println!("Installing Mono {} for Windows...", cfg.mono.full_version());
            ops::ensure_output_dir(host, &cfg.output_dir)?;
            let msi = ops::retrieve(host, &cfg.output_dir, &cfg.mono.windows_msi_url(), "mono.msi")?;
            ops::run_step(
                host,
                Step::RunInstaller,
                &Invocation::new(MSIEXEC).args(["/i".to_string(), path_arg(&msi), "/quiet".to_string()]),
            )?;
        }
        Platform::MacOs => {
            println!("Installing Mono {} for macOS...", cfg.mono.full_version());
            ops::ensure_output_dir(host, &cfg.output_dir)?;
            let pkg = ops::retrieve(host, &cfg.output_dir, &cfg.mono.macos_pkg_url(), "mono.pkg")?;
            ops::run_step(
                host,
                Step::RunInstaller,
                &Invocation::new("installer")
                    .args(["-pkg".to_string(), path_arg(&pkg), "-target".to_string(), "/".to_string()])
                    .elevated(cfg.elevate),
            )?;
        }
        Platform::Linux if ci => {
            println!("Installing Mono for Ubuntu 20.04...");
            install_from_apt(cfg, host)?;
        }
        Platform::Linux => {
            println!("See {LINUX_INSTRUCTIONS} for installation instructions.");
            return Ok(());
        }
    }
    println!("Successfully installed Mono!");
    Ok(())
}

fn install_from_apt(cfg: &SetupConfig, host: &dyn HostOps) -> Result<(), ProvisionError> {
    let mono = &cfg.mono;
    let repository = [
        ops::apt_get(&["install", "-y", "gnupg", "ca-certificates"], cfg.elevate),
        Invocation::new("apt-key")
            .args(["adv", "--keyserver", mono.apt_keyserver.as_str(), "--recv-keys", mono.apt_key.as_str()])
            .elevated(cfg.elevate),
        source_list_writer(cfg),
        ops::apt_get(&["update"], cfg.elevate),
    ];
    for step in &repository {
        ops::run_step(host, Step::PackageRepository, step)?;
    }
    ops::run_step(
        host,
        Step::PackageInstall,
        &ops::apt_get(&["install", "-y", mono.apt_package.as_str()], cfg.elevate),
    )
}

/// The list file is root-owned, so the line is piped through `tee` rather than redirected.
fn source_list_writer(cfg: &SetupConfig) -> Invocation {
    let tee = if cfg.elevate { "sudo tee" } else { "tee" };
    let script = format!(
        "echo \"{}\" | {tee} {}",
        cfg.mono.apt_repository, cfg.mono.apt_list
    );
    Invocation::new("bash").args(["-c".to_string(), script])
}
