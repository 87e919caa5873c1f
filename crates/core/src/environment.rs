//! Environment context resolved once at startup and passed into the resolver.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LaunchError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvContext {
    home: Option<PathBuf>,
    image_dir: Option<PathBuf>,
}

impl EnvContext {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            image_dir: Some(home.join("Pictures")),
            home: Some(home),
        }
    }

    /// Context with nothing resolved. Every placeholder lookup fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reads `HOME` and the XDG pictures directory from the process
    /// environment. Call once; the result is reused for every dispatch.
    pub fn from_process_env() -> Self {
        let home = env::var_os("HOME")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        let image_dir = home.as_deref().map(|home| {
            let config = env::var_os("XDG_CONFIG_HOME")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| home.join(".config"));
            xdg_pictures_dir(&config.join("user-dirs.dirs"), home)
                .unwrap_or_else(|| home.join("Pictures"))
        });

        Self { home, image_dir }
    }

    pub fn with_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_dir = Some(dir.into());
        self
    }

    pub fn without_home(mut self) -> Self {
        self.home = None;
        self
    }

    pub fn home(&self) -> Result<&Path, LaunchError> {
        self.home
            .as_deref()
            .ok_or(LaunchError::MissingEnvironmentValue("HOME"))
    }

    pub fn image_dir(&self) -> Result<&Path, LaunchError> {
        self.image_dir
            .as_deref()
            .ok_or(LaunchError::MissingEnvironmentValue("image directory"))
    }
}

/// Extracts `XDG_PICTURES_DIR` from a `user-dirs.dirs` file.
fn xdg_pictures_dir(path: &Path, home: &Path) -> Option<PathBuf> {
    let content = fs::read_to_string(path).ok()?;
    parse_pictures_dir(&content, home)
}

fn parse_pictures_dir(content: &str, home: &Path) -> Option<PathBuf> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| key.trim() == "XDG_PICTURES_DIR")
        .map(|(_, value)| {
            let value = value
                .trim()
                .trim_matches('"')
                .replace("$HOME", &home.to_string_lossy());
            PathBuf::from(value)
        })
}
