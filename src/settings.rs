use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://alumconnect-s4c7.onrender.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Persistent user settings loaded from ~/.config/alum-board.toml
#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    /// Base URL of the platform API
    pub api_url: Option<String>,

    /// Where the login session (token + user) is stored
    pub session_file: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Log file path (the terminal itself is the UI)
    pub log_file: Option<String>,
}

impl Settings {
    /// Load from the default config path. Returns Default if missing or malformed.
    pub fn load() -> Self {
        if let Some(path) = config_path() {
            Self::load_from(&path)
        } else {
            Self::default()
        }
    }

    fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match toml::from_str::<Settings>(&content) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Warning: failed to parse {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Returns ~/.config/alum-board.toml (XDG-style).
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("alum-board.toml"))
}

/// Returns ~/.config/alum-board/session.json.
pub fn default_session_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("alum-board").join("session.json"))
}

/// Returns <cache dir>/alum-board.log, falling back to the temp dir.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("alum-board.log")
}
