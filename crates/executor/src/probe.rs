use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Answers "can this program be started?" without starting it.
pub trait ExecutableProbe: Send + Sync {
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

/// Looks programs up on a `PATH` captured when the probe is built.
#[derive(Debug, Clone)]
pub struct PathProbe {
    search_path: Option<OsString>,
}

impl PathProbe {
    pub fn from_env() -> Self {
        Self {
            search_path: std::env::var_os("PATH"),
        }
    }

    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }
}

impl Default for PathProbe {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ExecutableProbe for PathProbe {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        if program.is_empty() {
            return None;
        }

        if program.contains('/') {
            let path = PathBuf::from(program);
            return is_executable(&path).then_some(path);
        }

        let search_path = self.search_path.as_ref()?;
        std::env::split_paths(search_path)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(program))
            .find(|candidate| is_executable(candidate))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
