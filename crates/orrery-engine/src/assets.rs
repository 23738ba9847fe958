//! Locating asset files shipped next to the demos.

use std::path::{Path, PathBuf};

/// Environment variable overriding the asset directory.
pub const ASSETS_ENV: &str = "ORRERY_ASSETS";

/// Where asset files are looked up, in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetLocator {
    /// Explicit directory; always wins when set.
    pub override_dir: Option<PathBuf>,
    /// Directory of the running executable.
    pub exe_dir: Option<PathBuf>,
}

impl AssetLocator {
    /// Locator configured from `ORRERY_ASSETS` and the current executable path.
    pub fn from_env() -> Self {
        let override_dir = std::env::var_os(ASSETS_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf));
        Self { override_dir, exe_dir }
    }

    /// Resolves `name`.
    ///
    /// Order: the override directory, the executable directory if the file
    /// exists there, else `name` relative to the current directory.
    pub fn resolve(&self, name: &str) -> PathBuf {
        if let Some(dir) = &self.override_dir {
            return dir.join(name);
        }
        if let Some(dir) = &self.exe_dir {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return candidate;
            }
        }
        PathBuf::from(name)
    }
}
