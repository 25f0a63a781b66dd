use crate::cli::Commands;
use crate::command_handlers::mono_build::{self, InstallPolicy};
use crate::command_handlers::{mono_install, setup_ci, vulkan};
use crate::config::SetupConfig;
use crate::error::ProvisionError;
use crate::host::HostOps;

pub fn dispatch(
    cmd: Commands,
    cfg: &SetupConfig,
    host: &dyn HostOps,
    identifier: &str,
) -> Result<(), ProvisionError> {
    log::debug!("platform identifier: {identifier}");
    match cmd {
        Commands::Vulkan { gh_actions } => vulkan::install_vulkan(identifier, cfg, host, gh_actions),
        Commands::BuildMono {
            install,
            no_install,
        } => {
            let policy = InstallPolicy::resolve(install, no_install, cfg.mono.install);
            mono_build::build_mono(identifier, cfg, host, policy)
        }
        Commands::InstallMono { ci } => mono_install::install_mono(identifier, cfg, host, ci),
        Commands::SetupCi => setup_ci::setup_ci(identifier, cfg, host),
    }
}
