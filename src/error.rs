use std::fmt;
use thiserror::Error;

/// A point in a provisioning sequence that can fail. Each one maps to its
/// own exit code so an operator can tell from the status which call broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Fetch,
    RunInstaller,
    MountImage,
    InstallFromImage,
    Clone,
    Configure,
    Build,
    InstallBuild,
    PackageRepository,
    PackageInstall,
}

impl Step {
    pub fn exit_code(self) -> u8 {
        match self {
            Step::RunInstaller | Step::MountImage | Step::Clone | Step::PackageRepository => 2,
            Step::InstallFromImage | Step::Configure | Step::PackageInstall => 3,
            Step::Fetch | Step::Build => 4,
            Step::InstallBuild => 5,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::Fetch => "download",
            Step::RunInstaller => "installer",
            Step::MountImage => "disk image mount",
            Step::InstallFromImage => "install from disk image",
            Step::Clone => "clone",
            Step::Configure => "configure",
            Step::Build => "build",
            Step::InstallBuild => "install",
            Step::PackageRepository => "package repository setup",
            Step::PackageInstall => "package install",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("unsupported platform '{0}'")]
    UnsupportedPlatform(String),
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("{step} failed: {detail}")]
    Step { step: Step, detail: String },
    #[error("{0}")]
    Configuration(String),
}

impl ProvisionError {
    pub fn step(step: Step, detail: impl Into<String>) -> Self {
        ProvisionError::Step {
            step,
            detail: detail.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            ProvisionError::UnsupportedPlatform(_) => 1,
            ProvisionError::Fetch { .. } => Step::Fetch.exit_code(),
            ProvisionError::Step { step, .. } => step.exit_code(),
            ProvisionError::Configuration(_) => 6,
        }
    }
}

impl From<anyhow::Error> for ProvisionError {
    fn from(e: anyhow::Error) -> Self {
        ProvisionError::Configuration(format!("{e:#}"))
    }
}
