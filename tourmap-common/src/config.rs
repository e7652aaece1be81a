//! Configuration loading and root folder resolution
//!
//! Every setting resolves through the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file never causes termination; defaults apply.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

pub const ENV_ROOT_FOLDER: &str = "TOURMAP_ROOT_FOLDER";
pub const ENV_ADMIN_PASSWORD: &str = "TOURMAP_ADMIN_PASSWORD";
pub const ENV_PORT: &str = "TOURMAP_PORT";

pub const DEFAULT_PORT: u16 = 5730;
/// Matches the deployment default; override it anywhere but a demo box
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Optional overrides read from the TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<String>,
    pub admin_password: Option<String>,
    pub port: Option<u16>,
}

/// Locate and parse the config file, if one exists
///
/// Looks in the user config directory (`~/.config/tourmap/config.toml` on
/// Linux), then `/etc/tourmap/config.toml` on Unix.
pub fn load_config_file() -> Option<TomlConfig> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("tourmap").join("config.toml"));
    }
    if cfg!(unix) {
        candidates.push(PathBuf::from("/etc/tourmap/config.toml"));
    }

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<TomlConfig>(&content) {
                Ok(config) => return Some(config),
                Err(e) => {
                    warn!("Ignoring malformed config file {}: {}", path.display(), e);
                    return None;
                }
            },
            Err(e) => {
                warn!("Could not read config file {}: {}", path.display(), e);
                return None;
            }
        }
    }
    None
}

/// Resolve the data root folder (blob documents live under `<root>/data/`)
pub fn resolve_root_folder(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ENV_ROOT_FOLDER) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Some(config) = load_config_file() {
        if let Some(root_folder) = config.root_folder {
            return PathBuf::from(root_folder);
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("tourmap"))
        .unwrap_or_else(|| PathBuf::from("./tourmap_data"))
}

/// Resolve the Admin Gate shared secret
pub fn resolve_admin_password(cli_arg: Option<&str>) -> String {
    if let Some(password) = cli_arg {
        return password.to_string();
    }
    if let Ok(password) = std::env::var(ENV_ADMIN_PASSWORD) {
        return password;
    }
    if let Some(config) = load_config_file() {
        if let Some(password) = config.admin_password {
            return password;
        }
    }
    DEFAULT_ADMIN_PASSWORD.to_string()
}

/// Resolve the HTTP listen port
pub fn resolve_port(cli_arg: Option<u16>) -> u16 {
    if let Some(port) = cli_arg {
        return port;
    }
    if let Ok(raw) = std::env::var(ENV_PORT) {
        match raw.parse::<u16>() {
            Ok(port) => return port,
            Err(_) => warn!("Ignoring non-numeric {}: {}", ENV_PORT, raw),
        }
    }
    if let Some(config) = load_config_file() {
        if let Some(port) = config.port {
            return port;
        }
    }
    DEFAULT_PORT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins_over_everything() {
        let resolved = resolve_root_folder(Some(Path::new("/tmp/tour-data")));
        assert_eq!(resolved, PathBuf::from("/tmp/tour-data"));

        assert_eq!(resolve_admin_password(Some("s3cret")), "s3cret");
        assert_eq!(resolve_port(Some(8080)), 8080);
    }

    #[test]
    fn default_root_folder_is_non_empty() {
        assert!(!default_root_folder().as_os_str().is_empty());
    }

    #[test]
    fn toml_config_parses_partial_overrides() {
        let config: TomlConfig = toml::from_str("port = 9000").unwrap();
        assert_eq!(config.port, Some(9000));
        assert!(config.root_folder.is_none());
        assert!(config.admin_password.is_none());
    }
}
