use std::fmt;

/// Operating systems the provisioning procedures know about. Each procedure
/// matches on this exhaustively, so adding a variant forces a decision in
/// every one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Exact-string lookup; "windows" or "darwin" do not match.
    pub fn from_identifier(id: &str) -> Option<Self> {
        match id {
            "Windows" => Some(Platform::Windows),
            "Darwin" => Some(Platform::MacOs),
            "Linux" => Some(Platform::Linux),
            _ => None,
        }
    }

    pub fn identifier(self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "Darwin",
            Platform::Linux => "Linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
        };
        f.write_str(name)
    }
}

/// Identifier of the OS this binary is running on.
pub fn current_identifier() -> String {
    identifier_for_os(std::env::consts::OS)
}

fn identifier_for_os(os: &str) -> String {
    match os {
        "windows" => "Windows".to_string(),
        "macos" => "Darwin".to_string(),
        "linux" => "Linux".to_string(),
        other => other.to_string(),
    }
}
