//! Where area-tracer keeps its files.
//!
//! Debug builds and `cargo run` keep everything beside the working directory,
//! so a fresh checkout traces into `./exports` and logs to `./logs`. Installed
//! builds use the user's config and data directories under `area-tracer/`.

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "area-tracer";

/// True for debug builds and anything launched through cargo.
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    if is_dev_mode() {
        return PathBuf::from(".");
    }
    base.map(|p| p.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn config_root() -> PathBuf {
    app_dir(dirs::config_dir())
}

fn data_root() -> PathBuf {
    app_dir(dirs::data_dir())
}

pub fn config_file() -> PathBuf {
    config_root().join("config.json")
}

pub fn logs_dir() -> PathBuf {
    data_root().join("logs")
}

/// Resolves a directory named in the config. Relative paths hang off the
/// data directory, absolute paths are used as given.
pub fn resolve_data_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_root().join(path)
    }
}

/// Creates the config and log directories. Exports are created separately
/// once the config is loaded.
pub fn ensure_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(config_root())?;
    std::fs::create_dir_all(logs_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_mode_keeps_files_local() {
        // debug_assertions is on under test
        assert!(is_dev_mode());
        assert_eq!(config_file(), PathBuf::from("./config.json"));
        assert_eq!(logs_dir(), PathBuf::from("./logs"));
    }

    #[test]
    fn test_relative_exports_dir_resolves_under_data_root() {
        assert_eq!(
            resolve_data_path(Path::new("exports")),
            PathBuf::from("./exports")
        );
    }

    #[test]
    fn test_absolute_exports_dir_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_data_path(dir.path()), dir.path().to_path_buf());
    }
}
