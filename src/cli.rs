use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    name = "sge-setup",
    about = "Provision the Vulkan SDK and the Mono runtime for SGE builds"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config (defaults to ./sge-setup.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Platform identifier to provision for (Windows, Darwin, Linux). Defaults to the running OS.
    #[arg(long, global = true, value_name = "ID")]
    pub platform: Option<String>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Exit codes: 0 ok, 1 unsupported platform, 4 download failed, 6 bad
/// configuration; 2, 3 and 5 name the failing step of each command.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download and silently install the pinned Vulkan SDK (Windows, macOS)
    #[command(alias = "install-vulkan")]
    Vulkan {
        /// Print `::set-env name=VULKAN_SDK::<path>` for GitHub Actions
        #[arg(long, alias = "ci")]
        gh_actions: bool,
    },
    /// Clone and build Mono from source (Windows, macOS, Linux)
    BuildMono {
        /// Run `make install` after a Unix build without asking
        #[arg(long, conflicts_with = "no_install")]
        install: bool,
        /// Never run `make install` after a Unix build
        #[arg(long)]
        no_install: bool,
    },
    /// Install a prebuilt Mono (msi on Windows, pkg on macOS, apt on Linux CI)
    InstallMono {
        /// Allow system package installation on Linux
        #[arg(long)]
        ci: bool,
    },
    /// Set up every dependency a CI build needs
    SetupCi,
}
