use anyhow::{bail, Context, Result};
use fs_err as fs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "sge-setup.toml";

/// Fixed versions, URLs and paths. Every key is optional in `sge-setup.toml`;
/// omitted keys fall back to the pinned defaults below.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SetupConfig {
    /// Downloaded installers land here. Never cleaned up.
    pub output_dir: PathBuf,
    /// Prefix privileged commands with `sudo`.
    pub elevate: bool,
    pub vulkan: VulkanConfig,
    pub mono: MonoConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VulkanConfig {
    pub version: String,
    pub download_base: String,
    pub windows_install_root: String,
    /// Distribution package `setup-ci` installs on Linux runners.
    pub linux_package: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonoConfig {
    pub version: String,
    pub build: String,
    pub repository: String,
    pub source_dir: PathBuf,
    pub install_prefix: String,
    pub visual_studio_root: PathBuf,
    pub visual_studio_editions: Vec<String>,
    pub download_base: String,
    /// Skip the interactive install question after a source build.
    pub install: Option<bool>,
    pub apt_keyserver: String,
    pub apt_key: String,
    pub apt_repository: String,
    pub apt_list: String,
    pub apt_package: String,
}

impl Default for SetupConfig {
    fn default() -> Self {
        SetupConfig {
            output_dir: PathBuf::from("build"),
            elevate: true,
            vulkan: VulkanConfig::default(),
            mono: MonoConfig::default(),
        }
    }
}

impl Default for VulkanConfig {
    fn default() -> Self {
        VulkanConfig {
            version: "1.2.182.0".into(),
            download_base: "https://sdk.lunarg.com/sdk/download".into(),
            windows_install_root: "C:\\VulkanSDK".into(),
            linux_package: "libvulkan-dev".into(),
        }
    }
}

impl Default for MonoConfig {
    fn default() -> Self {
        MonoConfig {
            version: "6.12.0".into(),
            build: "107".into(),
            repository: "https://github.com/mono/mono.git".into(),
            source_dir: PathBuf::from("build").join("mono"),
            install_prefix: "/usr/local".into(),
            visual_studio_root: PathBuf::from("C:\\Program Files\\Microsoft Visual Studio\\2022"),
            visual_studio_editions: vec![
                "Enterprise".into(),
                "Professional".into(),
                "Community".into(),
            ],
            download_base: "https://download.mono-project.com/archive".into(),
            install: None,
            apt_keyserver: "hkp://keyserver.ubuntu.com:80".into(),
            apt_key: "3FA7E0328081BFF6A14DA29AA6A19B38D3D831EF".into(),
            apt_repository: "deb https://download.mono-project.com/repo/ubuntu stable-focal main"
                .into(),
            apt_list: "/etc/apt/sources.list.d/mono-official-stable.list".into(),
            apt_package: "mono-complete".into(),
        }
    }
}

impl VulkanConfig {
    pub fn windows_installer_url(&self) -> String {
        format!(
            "{base}/{v}/windows/VulkanSDK-{v}-Installer.exe",
            base = self.download_base,
            v = self.version
        )
    }

    /// Also the volume name the image mounts under.
    pub fn disk_image_name(&self) -> String {
        format!("vulkansdk-macos-{}", self.version)
    }

    pub fn disk_image_url(&self) -> String {
        format!(
            "{}/{}/mac/{}.dmg",
            self.download_base,
            self.version,
            self.disk_image_name()
        )
    }

    pub fn windows_sdk_path(&self) -> String {
        format!("{}\\{}", self.windows_install_root, self.version)
    }

    pub fn macos_sdk_path(&self, home: &Path) -> String {
        format!("{}/VulkanSDK/{}/macOS", home.display(), self.version)
    }
}

impl MonoConfig {
    pub fn full_version(&self) -> String {
        format!("{}.{}", self.version, self.build)
    }

    pub fn windows_msi_url(&self) -> String {
        format!(
            "{}/{}/windows-installer/mono-{}-x64-0.msi",
            self.download_base,
            self.version,
            self.full_version()
        )
    }

    pub fn macos_pkg_url(&self) -> String {
        format!(
            "{}/{}/macos-10-universal/MonoFramework-MDK-{}.macos10.xamarin.universal.pkg",
            self.download_base,
            self.version,
            self.full_version()
        )
    }
}

impl SetupConfig {
    /// An explicit path must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };
        if !path.exists() {
            if required {
                bail!("config file {} not found", path.display());
            }
            log::debug!("no {} present, using built-in defaults", path.display());
            return Ok(SetupConfig::default());
        }
        let data = fs::read_to_string(&path)?;
        let cfg: SetupConfig =
            toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
        log::debug!("loaded {}", path.display());
        Ok(cfg)
    }

    /// Anchors relative directories at `base` so later steps are cwd-independent.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if self.output_dir.is_relative() {
            self.output_dir = base.join(&self.output_dir);
        }
        if self.mono.source_dir.is_relative() {
            self.mono.source_dir = base.join(&self.mono.source_dir);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pin_vendor_urls() {
        let cfg = SetupConfig::default();
        assert_eq!(
            cfg.vulkan.windows_installer_url(),
            "https://sdk.lunarg.com/sdk/download/1.2.182.0/windows/VulkanSDK-1.2.182.0-Installer.exe"
        );
        assert_eq!(
            cfg.vulkan.disk_image_url(),
            "https://sdk.lunarg.com/sdk/download/1.2.182.0/mac/vulkansdk-macos-1.2.182.0.dmg"
        );
        assert_eq!(cfg.vulkan.windows_sdk_path(), "C:\\VulkanSDK\\1.2.182.0");
        assert_eq!(
            cfg.mono.windows_msi_url(),
            "https://download.mono-project.com/archive/6.12.0/windows-installer/mono-6.12.0.107-x64-0.msi"
        );
    }

    #[test]
    fn macos_sdk_path_under_home() {
        let cfg = VulkanConfig::default();
        assert_eq!(
            cfg.macos_sdk_path(Path::new("/Users/ci")),
            "/Users/ci/VulkanSDK/1.2.182.0/macOS"
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("setup.toml");
        std::fs::write(
            &path,
            "elevate = false\n[vulkan]\nversion = \"1.3.250.1\"\n[mono]\ninstall = true\n",
        )
        .unwrap();
        let cfg = SetupConfig::load(Some(path.as_path())).unwrap();
        assert!(!cfg.elevate);
        assert_eq!(cfg.vulkan.version, "1.3.250.1");
        assert_eq!(cfg.vulkan.download_base, "https://sdk.lunarg.com/sdk/download");
        assert_eq!(cfg.mono.install, Some(true));
        assert_eq!(cfg.mono.version, "6.12.0");
        assert_eq!(cfg.output_dir, PathBuf::from("build"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SetupConfig::load(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("setup.toml");
        std::fs::write(&path, "[vulkan]\nverison = \"1.0\"\n").unwrap();
        assert!(SetupConfig::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn relative_dirs_resolve_against_base() {
        let base = std::env::temp_dir();
        let cfg = SetupConfig::default().resolve_paths(&base);
        assert_eq!(cfg.output_dir, base.join("build"));
        assert_eq!(cfg.mono.source_dir, base.join("build").join("mono"));
    }
}
