use std::io;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;

use hyprdash_core::{Candidate, CandidateFailure, CommandSpec, LaunchError, LaunchResult, Started};
use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::probe::{ExecutableProbe, PathProbe};

/// Starts a candidate as an independent process and returns its pid.
pub trait ProcessSpawner: Send + Sync {
    fn spawn_detached(&self, executable: &Path, candidate: &Candidate) -> io::Result<Option<u32>>;
}

/// Spawns children in their own session with all standard streams closed.
///
/// The child handle is dropped right away; the Tokio runtime reaps the
/// process when it exits. Must be called from inside a Tokio runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedSpawner;

impl ProcessSpawner for DetachedSpawner {
    fn spawn_detached(&self, executable: &Path, candidate: &Candidate) -> io::Result<Option<u32>> {
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "detached spawn needs a Tokio runtime",
            ));
        }

        let mut cmd = Command::new(executable);
        cmd.args(&candidate.args)
            .envs(candidate.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false);

        if let Some(dir) = &candidate.working_dir {
            cmd.current_dir(dir);
        }

        #[cfg(unix)]
        {
            unsafe {
                cmd.pre_exec(|| {
                    // Leave the caller's session so closing the menu does not
                    // take the child down with it.
                    libc::setsid();
                    Ok(())
                });
            }
        }

        let child = cmd.spawn()?;
        Ok(child.id())
    }
}

/// Tries the candidates of a [`CommandSpec`] in order and starts the first
/// one that is present on the system.
pub struct Launcher {
    probe: Arc<dyn ExecutableProbe>,
    spawner: Arc<dyn ProcessSpawner>,
}

impl Launcher {
    pub fn new(probe: Arc<dyn ExecutableProbe>, spawner: Arc<dyn ProcessSpawner>) -> Self {
        Self { probe, spawner }
    }

    /// `PATH` lookup plus detached spawning.
    pub fn system() -> Self {
        Self::new(Arc::new(PathProbe::from_env()), Arc::new(DetachedSpawner))
    }

    pub fn launch(&self, spec: &CommandSpec) -> LaunchResult {
        let action = spec.action();
        let mut attempts = Vec::with_capacity(spec.len());

        for (index, candidate) in spec.candidates().iter().enumerate() {
            // Probe everything before spawning anything.
            let Some(executable) = self.probe.locate(&candidate.program) else {
                debug!("{}: {} not found, trying next", action, candidate.program);
                attempts.push(CandidateFailure::NotFound {
                    program: candidate.program.clone(),
                });
                continue;
            };

            if let Some(missing) = candidate
                .requires
                .iter()
                .find(|required| self.probe.locate(required).is_none())
            {
                debug!(
                    "{}: {} needs {} which is not installed, trying next",
                    action, candidate.program, missing
                );
                attempts.push(CandidateFailure::NotFound {
                    program: missing.clone(),
                });
                continue;
            }

            match self.spawner.spawn_detached(&executable, candidate) {
                Ok(pid) => {
                    info!("{}: started {} (pid {:?})", action, candidate, pid);
                    return Ok(Started {
                        action: action.clone(),
                        program: candidate.program.clone(),
                        candidate_index: index,
                        pid,
                    });
                }
                Err(e) => {
                    warn!("{}: failed to start {}: {}", action, candidate.program, e);
                    attempts.push(CandidateFailure::SpawnFailed {
                        program: candidate.program.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        error!("{}: all {} candidates exhausted", action, spec.len());
        Err(LaunchError::AllCandidatesExhausted {
            action: action.to_string(),
            attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyprdash_core::ActionId;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_detached_spawner_starts_process() {
        let candidate = Candidate::new("sh", ["-c", "exit 0"]);
        let pid = DetachedSpawner
            .spawn_detached(Path::new("/bin/sh"), &candidate)
            .unwrap();
        assert!(pid.is_some());
    }

    #[test]
    fn test_detached_spawner_without_runtime() {
        let candidate = Candidate::new("sh", ["-c", "exit 0"]);
        let result = DetachedSpawner.spawn_detached(Path::new("/bin/sh"), &candidate);
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_launcher_skips_missing_program() {
        let spec = CommandSpec::new(
            ActionId::new("shell"),
            vec![
                Candidate::new("hyprdash-definitely-missing", Vec::<String>::new()),
                Candidate::new("/bin/sh", ["-c", "exit 0"]),
            ],
        )
        .unwrap();

        let started = Launcher::system().launch(&spec).unwrap();
        assert_eq!(started.candidate_index, 1);
        assert_eq!(started.program, "/bin/sh");
    }
}
