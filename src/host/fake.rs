//! Recording host for unit tests: scripted exit codes, no real side effects.

use crate::host::{HostOps, Invocation};
use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Fetch { url: String, dest: PathBuf },
    Run(Invocation),
    CreateDir(PathBuf),
    Prompt(String),
    Emit(String),
}

#[derive(Default)]
pub struct FakeHost {
    events: RefCell<Vec<Event>>,
    existing: RefCell<HashSet<PathBuf>>,
    failures: Vec<(String, i32)>,
    unstartable: Vec<String>,
    missing_tools: HashSet<String>,
    answers: RefCell<VecDeque<String>>,
    home: Option<PathBuf>,
    fetch_fails: bool,
    stdin_broken: bool,
}

impl FakeHost {
    pub fn new() -> Self {
        FakeHost {
            home: Some(PathBuf::from("/home/ci")),
            ..Default::default()
        }
    }

    /// Any command whose rendered form contains `needle` exits with `code`.
    pub fn fail_when(mut self, needle: &str, code: i32) -> Self {
        self.failures.push((needle.to_string(), code));
        self
    }

    pub fn cannot_start(mut self, program: &str) -> Self {
        self.unstartable.push(program.to_string());
        self
    }

    pub fn with_existing(self, path: impl Into<PathBuf>) -> Self {
        self.existing.borrow_mut().insert(path.into());
        self
    }

    pub fn without_tool(mut self, name: &str) -> Self {
        self.missing_tools.insert(name.to_string());
        self
    }

    pub fn with_answers<I: IntoIterator<Item = &'static str>>(self, answers: I) -> Self {
        self.answers
            .borrow_mut()
            .extend(answers.into_iter().map(|a| format!("{a}\n")));
        self
    }

    pub fn without_home(mut self) -> Self {
        self.home = None;
        self
    }

    pub fn with_broken_stdin(mut self) -> Self {
        self.stdin_broken = true;
        self
    }

    pub fn failing_fetch(mut self) -> Self {
        self.fetch_fails = true;
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn fetched_urls(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Fetch { url, .. } => Some(url),
                _ => None,
            })
            .collect()
    }

    pub fn commands(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Run(inv) => Some(inv.to_string()),
                _ => None,
            })
            .collect()
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Run(inv) => Some(inv),
                _ => None,
            })
            .collect()
    }

    pub fn created_dirs(&self) -> Vec<PathBuf> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::CreateDir(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn emitted(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Emit(l) => Some(l),
                _ => None,
            })
            .collect()
    }

    pub fn prompts(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Prompt(_)))
            .count()
    }
}

impl HostOps for FakeHost {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        self.events.borrow_mut().push(Event::Fetch {
            url: url.to_string(),
            dest: dest.to_path_buf(),
        });
        if self.fetch_fails {
            return Err(anyhow!("download failed 404 Not Found"));
        }
        self.existing.borrow_mut().insert(dest.to_path_buf());
        Ok(())
    }

    fn run(&self, invocation: &Invocation) -> Result<i32> {
        self.events.borrow_mut().push(Event::Run(invocation.clone()));
        if self.unstartable.iter().any(|p| *p == invocation.program) {
            return Err(anyhow!("program not found"));
        }
        let rendered = invocation.to_string();
        Ok(self
            .failures
            .iter()
            .find(|(needle, _)| rendered.contains(needle.as_str()))
            .map(|(_, code)| *code)
            .unwrap_or(0))
    }

    fn dir_exists(&self, path: &Path) -> bool {
        self.existing.borrow().contains(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.existing.borrow().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.events
            .borrow_mut()
            .push(Event::CreateDir(path.to_path_buf()));
        self.existing.borrow_mut().insert(path.to_path_buf());
        Ok(())
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        if self.missing_tools.contains(program) {
            None
        } else {
            Some(PathBuf::from("/usr/bin").join(program))
        }
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn read_line(&self, prompt: &str) -> Result<Option<String>> {
        self.events
            .borrow_mut()
            .push(Event::Prompt(prompt.to_string()));
        if self.stdin_broken {
            return Err(anyhow!("stdin: input/output error"));
        }
        Ok(self.answers.borrow_mut().pop_front())
    }

    fn emit(&self, line: &str) {
        self.events.borrow_mut().push(Event::Emit(line.to_string()));
    }
}
