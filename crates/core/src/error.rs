use thiserror::Error;

/// Why a single fallback candidate was skipped. Recovered locally by the
/// launcher; only surfaced as part of [`LaunchError::AllCandidatesExhausted`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CandidateFailure {
    #[error("{program}: not found")]
    NotFound { program: String },

    #[error("{program}: {reason}")]
    SpawnFailed { program: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Action {action} requires an argument")]
    MissingArgument { action: String },

    #[error("Invalid argument for {action}: {reason}")]
    InvalidArgument { action: String, reason: String },

    #[error("Missing environment value: {0}")]
    MissingEnvironmentValue(&'static str),

    #[error("No candidate could be started for {action} ({})", summarize(.attempts))]
    AllCandidatesExhausted {
        action: String,
        attempts: Vec<CandidateFailure>,
    },

    #[error("Invalid action entry {action}: {reason}")]
    InvalidEntry { action: String, reason: String },
}

fn summarize(attempts: &[CandidateFailure]) -> String {
    if attempts.is_empty() {
        return "no attempts".to_string();
    }
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
