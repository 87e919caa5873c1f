use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::error::LaunchError;

/// Opaque identifier of a logical action, e.g. `edit_hyprland_conf`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ActionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Info,
    Pictures,
    Configs,
    Applications,
    System,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Info,
        Category::Pictures,
        Category::Configs,
        Category::Applications,
        Category::System,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Category::Info => "Information",
            Category::Pictures => "Pictures",
            Category::Configs => "Edit Configs",
            Category::Applications => "Applications",
            Category::System => "System",
        }
    }
}

/// Unexpanded command line as it is stored in the action table.
///
/// Strings may carry `{home}`, `{pictures}` and `{arg}` placeholders; they are
/// expanded against an [`EnvContext`](crate::EnvContext) at resolve time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTemplate {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Extra executables that must be present for this candidate to be tried.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl CandidateTemplate {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            requires: Vec::new(),
            working_dir: None,
            env: BTreeMap::new(),
        }
    }

    pub fn bare(program: &str) -> Self {
        Self::new(program, Vec::<String>::new())
    }

    pub fn requiring<I, S>(mut self, executables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires.extend(executables.into_iter().map(Into::into));
        self
    }
}

/// A registered action: what the UI shows plus its ordered fallback chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEntry {
    pub id: ActionId,
    pub label: String,
    pub category: Category,
    #[serde(default)]
    pub takes_argument: bool,
    /// The UI asks for approval before dispatching.
    #[serde(default)]
    pub confirm: bool,
    pub candidates: Vec<CandidateTemplate>,
}

impl ActionEntry {
    pub fn new(id: &str, label: &str, category: Category, candidates: Vec<CandidateTemplate>) -> Self {
        Self {
            id: ActionId::new(id),
            label: label.to_string(),
            category,
            takes_argument: false,
            confirm: false,
            candidates,
        }
    }

    pub fn with_argument(mut self) -> Self {
        self.takes_argument = true;
        self
    }

    pub fn confirmed(mut self) -> Self {
        self.confirm = true;
        self
    }
}

/// A concrete command line, ready to hand to the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub program: String,
    pub args: Vec<String>,
    pub requires: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl Candidate {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            requires: Vec::new(),
            working_dir: None,
            env: Vec::new(),
        }
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}

/// Ordered, non-empty list of candidates for one action. First success wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    action: ActionId,
    candidates: Vec<Candidate>,
}

impl CommandSpec {
    pub fn new(action: ActionId, candidates: Vec<Candidate>) -> Result<Self, LaunchError> {
        if candidates.is_empty() {
            return Err(LaunchError::InvalidEntry {
                action: action.to_string(),
                reason: "no candidates".to_string(),
            });
        }
        Ok(Self { action, candidates })
    }

    pub fn action(&self) -> &ActionId {
        &self.action
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Outcome of a successful launch. The process is detached and never awaited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Started {
    pub action: ActionId,
    pub program: String,
    pub candidate_index: usize,
    pub pid: Option<u32>,
}

pub type LaunchResult = Result<Started, LaunchError>;
