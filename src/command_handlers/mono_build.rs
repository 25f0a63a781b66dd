use crate::config::SetupConfig;
use crate::error::{ProvisionError, Step};
use crate::host::{path_arg, HostOps, Invocation};
use crate::ops;
use crate::platform::Platform;

const BUILD_DOCS: &str = "https://www.mono-project.com/docs/compiling-mono/";

/// What to do after a successful Unix build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPolicy {
    Ask,
    Always,
    Never,
}

impl InstallPolicy {
    /// Command-line flags win over the config file; neither means ask.
    pub fn resolve(install: bool, no_install: bool, configured: Option<bool>) -> Self {
        match (install, no_install, configured) {
            (true, _, _) => InstallPolicy::Always,
            (_, true, _) => InstallPolicy::Never,
            (_, _, Some(true)) => InstallPolicy::Always,
            (_, _, Some(false)) => InstallPolicy::Never,
            _ => InstallPolicy::Ask,
        }
    }
}

pub fn build_mono(
    identifier: &str,
    cfg: &SetupConfig,
    host: &dyn HostOps,
    policy: InstallPolicy,
) -> Result<(), ProvisionError> {
    let platform = ops::resolve_platform(identifier)?;
    println!("If any error occurs, please refer to the documentation on building mono ({BUILD_DOCS})");

    preflight(cfg, host, platform)?;
    clone(cfg, host)?;

    println!("Building mono for platform: {}", platform.identifier());
    match platform {
        Platform::Windows => build_windows(cfg, host)?,
        Platform::MacOs | Platform::Linux => build_unix(cfg, host, platform, policy)?,
    }
    println!("Successfully built mono!");
    Ok(())
}

fn preflight(cfg: &SetupConfig, host: &dyn HostOps, platform: Platform) -> Result<(), ProvisionError> {
    let mut required = Vec::new();
    if !host.dir_exists(&cfg.mono.source_dir) {
        required.push("git");
    }
    if platform != Platform::Windows {
        required.push("make");
    }
    for tool in required {
        match host.locate(tool) {
            Some(path) => log::debug!("{tool} -> {}", path.display()),
            None => {
                return Err(ProvisionError::step(
                    Step::Configure,
                    format!("`{tool}` not found on PATH"),
                ))
            }
        }
    }
    Ok(())
}

fn clone(cfg: &SetupConfig, host: &dyn HostOps) -> Result<(), ProvisionError> {
    let dir = &cfg.mono.source_dir;
    println!("Cloning mono...");
    if host.dir_exists(dir) {
        println!("{} already exists - skipping", dir.display());
        return Ok(());
    }
    ops::run_step(
        host,
        Step::Clone,
        &Invocation::new("git").args(["clone".to_string(), cfg.mono.repository.clone(), path_arg(dir)]),
    )?;
    println!("Successfully cloned mono!");
    Ok(())
}

fn build_unix(
    cfg: &SetupConfig,
    host: &dyn HostOps,
    platform: Platform,
    policy: InstallPolicy,
) -> Result<(), ProvisionError> {
    let src = &cfg.mono.source_dir;
    let mut configure = Invocation::new(path_arg(&src.join("autogen.sh")))
        .arg(format!("--prefix={}", cfg.mono.install_prefix))
        .current_dir(src);
    if platform == Platform::MacOs {
        configure = configure.arg("--disable-nls");
    }
    ops::run_step(host, Step::Configure, &configure)?;
    ops::run_step(host, Step::Build, &Invocation::new("make").current_dir(src))?;

    if should_install(host, &cfg.mono.install_prefix, policy)? {
        ops::run_step(
            host,
            Step::InstallBuild,
            &Invocation::new("make")
                .arg("install")
                .current_dir(src)
                .elevated(cfg.elevate),
        )?;
        println!("Installed mono to {}", cfg.mono.install_prefix);
    }
    Ok(())
}

fn should_install(host: &dyn HostOps, prefix: &str, policy: InstallPolicy) -> Result<bool, ProvisionError> {
    match policy {
        InstallPolicy::Always => return Ok(true),
        InstallPolicy::Never => return Ok(false),
        InstallPolicy::Ask => {}
    }
    let prompt = format!("Install to {prefix}? [y/N] ");
    loop {
        let answer = host
            .read_line(&prompt)
            .map_err(|e| ProvisionError::step(Step::InstallBuild, format!("reading answer: {e:#}")))?;
        let Some(line) = answer else {
            // stdin closed: nobody to ask
            return Ok(false);
        };
        match parse_answer(&line) {
            Some(answer) => return Ok(answer),
            None => println!("Invalid answer - try again"),
        }
    }
}

fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_lowercase().as_str() {
        "" | "n" => Some(false),
        "y" => Some(true),
        _ => None,
    }
}

fn build_windows(cfg: &SetupConfig, host: &dyn HostOps) -> Result<(), ProvisionError> {
    let root = &cfg.mono.visual_studio_root;
    let vs = cfg
        .mono
        .visual_studio_editions
        .iter()
        .map(|edition| root.join(edition))
        .find(|dir| host.dir_exists(dir))
        .ok_or_else(|| {
            ProvisionError::step(
                Step::Configure,
                format!("Visual Studio 2022 not found under {}", root.display()),
            )
        })?;

    let msbuild = vs.join("MSBuild").join("Current").join("Bin").join("MSBuild.exe");
    if !host.file_exists(&msbuild) {
        return Err(ProvisionError::step(
            Step::Configure,
            format!("MSBuild not found at {}", msbuild.display()),
        ));
    }

    let solution = cfg.mono.source_dir.join("msvc").join("mono.sln");
    ops::run_step(
        host,
        Step::Build,
        &Invocation::new(path_arg(&msbuild)).args([
            "-noLogo".to_string(),
            "-p:Configuration=Release".to_string(),
            path_arg(&solution),
        ]),
    )
}
