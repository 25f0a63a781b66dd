use crate::config::SetupConfig;
use crate::error::{ProvisionError, Step};
use crate::host::{path_arg, HostOps, Invocation};
use crate::ops;
use crate::platform::Platform;

type Handler = fn(&SetupConfig, &dyn HostOps) -> Result<Option<String>, ProvisionError>;

/// Installs the pinned Vulkan SDK. With `gh_actions`, reports the SDK
/// location as `VULKAN_SDK` for later workflow steps.
pub fn install_vulkan(
    identifier: &str,
    cfg: &SetupConfig,
    host: &dyn HostOps,
    gh_actions: bool,
) -> Result<(), ProvisionError> {
    let platform = ops::resolve_platform(identifier)?;
    let handler: Handler = match platform {
        Platform::Windows => install_windows,
        Platform::MacOs => install_macos,
        // Distribution packages (libvulkan-dev) cover Linux.
        Platform::Linux => return Err(ProvisionError::UnsupportedPlatform(identifier.to_string())),
    };

    println!("Installing the {platform} Vulkan SDK {}...", cfg.vulkan.version);
    ops::ensure_output_dir(host, &cfg.output_dir)?;
    let sdk_path = handler(cfg, host)?;

    if gh_actions {
        let Some(sdk_path) = sdk_path else {
            return Err(ProvisionError::Configuration(
                "home directory unknown; cannot report VULKAN_SDK".into(),
            ));
        };
        host.emit(&ops::set_env_line("VULKAN_SDK", &sdk_path));
    }
    println!("Successfully installed the Vulkan SDK!");
    Ok(())
}

fn install_windows(cfg: &SetupConfig, host: &dyn HostOps) -> Result<Option<String>, ProvisionError> {
    let url = cfg.vulkan.windows_installer_url();
    let installer = ops::retrieve(host, &cfg.output_dir, &url, "vulkan_installer.exe")?;
    ops::run_step(
        host,
        Step::RunInstaller,
        &Invocation::new(path_arg(&installer)).arg("/S"),
    )?;
    Ok(Some(cfg.vulkan.windows_sdk_path()))
}

fn install_macos(cfg: &SetupConfig, host: &dyn HostOps) -> Result<Option<String>, ProvisionError> {
    let image_name = cfg.vulkan.disk_image_name();
    let url = cfg.vulkan.disk_image_url();
    let image = ops::retrieve(host, &cfg.output_dir, &url, &format!("{image_name}.dmg"))?;

    ops::run_step(
        host,
        Step::MountImage,
        &Invocation::new("hdiutil")
            .args(["attach".to_string(), path_arg(&image)])
            .elevated(cfg.elevate),
    )?;
    let app = format!("/Volumes/{image_name}/InstallVulkan.app/Contents/MacOS/InstallVulkan");
    ops::run_step(
        host,
        Step::InstallFromImage,
        &Invocation::new(app)
            .args(["in", "--al", "-c"])
            .elevated(cfg.elevate),
    )?;
    Ok(host
        .home_dir()
        .map(|home| cfg.vulkan.macos_sdk_path(&home)))
}
