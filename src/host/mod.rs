use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};

mod native;
#[cfg(test)]
pub mod fake;

pub use native::NATIVE_HOST as ConcreteHost;

pub fn host() -> &'static dyn HostOps {
    &ConcreteHost
}

/// Every side effect a provisioning procedure performs goes through here.
pub trait HostOps {
    /// Blocking GET of `url`, body written to `dest`. The file is closed on return.
    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
    /// Runs the process to completion and returns its exit code.
    fn run(&self, invocation: &Invocation) -> Result<i32>;
    fn dir_exists(&self, path: &Path) -> bool;
    fn file_exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn locate(&self, program: &str) -> Option<PathBuf>;
    fn home_dir(&self) -> Option<PathBuf>;
    /// `None` once input is exhausted.
    fn read_line(&self, prompt: &str) -> Result<Option<String>>;
    fn emit(&self, line: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Invocation {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Wraps the command in `sudo` when `elevate` is set.
    pub fn elevated(self, elevate: bool) -> Self {
        if !elevate {
            return self;
        }
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(self.program);
        args.extend(self.args);
        Invocation {
            program: "sudo".into(),
            args,
            cwd: self.cwd,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for a in &self.args {
            write!(f, " {a}")?;
        }
        Ok(())
    }
}

pub fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
