use crate::host::{HostOps, Invocation};
use anyhow::{anyhow, Context, Result};
use fs_err as fs;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

pub static NATIVE_HOST: Native = Native;

pub struct Native;

impl HostOps for Native {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        // Installers are hundreds of MB; the default 30s client timeout would cut them off.
        let client = Client::builder()
            .user_agent(concat!("sge-setup/", env!("CARGO_PKG_VERSION")))
            .timeout(None::<Duration>)
            .build()
            .context("building HTTP client")?;
        let resp = client
            .get(url)
            .send()
            .with_context(|| format!("GET {url}"))?;
        if !resp.status().is_success() {
            return Err(anyhow!("download failed {}", resp.status()));
        }

        let len = resp.content_length();
        let pb = match len {
            Some(len) => ProgressBar::new(len),
            None => ProgressBar::new_spinner(),
        };
        pb.set_style(ProgressStyle::with_template(progress_template(len))?);
        let name = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| url.to_string());
        pb.set_message(format!("GET {name}"));
        pb.enable_steady_tick(Duration::from_millis(120));

        let mut file = fs::File::create(dest)?;
        let mut body = pb.wrap_read(resp);
        std::io::copy(&mut body, &mut file).with_context(|| format!("reading body of {url}"))?;
        file.flush()?;
        file.sync_all()?;
        pb.finish_and_clear();
        log::debug!("wrote {}", dest.display());
        Ok(())
    }

    fn run(&self, invocation: &Invocation) -> Result<i32> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        if let Some(dir) = &invocation.cwd {
            cmd.current_dir(dir);
        }
        let status = cmd
            .status()
            .with_context(|| format!("spawning {}", invocation.program))?;
        // Killed by a signal on unix: no code.
        Ok(status.code().unwrap_or(-1))
    }

    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("creating dir {path:?}"))
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn read_line(&self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn emit(&self, line: &str) {
        println!("{line}");
    }
}

/// Without a Content-Length there is no total to show.
fn progress_template(len: Option<u64>) -> &'static str {
    match len {
        Some(_) => "{spinner} {msg} {bytes}/{total_bytes} ({bytes_per_sec})",
        None => "{spinner} {msg} {bytes} ({bytes_per_sec})",
    }
}
