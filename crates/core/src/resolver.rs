//! Action table and CommandSpec resolution. No I/O happens here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::catalog;
use crate::environment::EnvContext;
use crate::error::LaunchError;
use crate::types::{ActionEntry, ActionId, Candidate, CandidateTemplate, CommandSpec};

const PLACEHOLDERS: &[&str] = &["home", "pictures", "arg"];

pub struct CommandTable {
    entries: Vec<ActionEntry>,
    index: HashMap<ActionId, usize>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut table = Self::new();
        for entry in catalog::builtin_entries() {
            // Built-in data is covered by tests; a bad entry here is a bug.
            if let Err(e) = table.register(entry) {
                tracing::error!("Skipping built-in action: {}", e);
            }
        }
        table
    }

    /// Adds an entry, or replaces the entry with the same id in place.
    pub fn register(&mut self, entry: ActionEntry) -> Result<&mut Self, LaunchError> {
        validate_entry(&entry)?;

        match self.index.get(&entry.id) {
            Some(&position) => {
                tracing::debug!("Replacing action {}", entry.id);
                self.entries[position] = entry;
            }
            None => {
                self.index.insert(entry.id.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
        Ok(self)
    }

    pub fn remove(&mut self, id: &str) -> Option<ActionEntry> {
        let position = self.index.remove(&ActionId::new(id))?;
        let removed = self.entries.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn get(&self, id: &str) -> Option<&ActionEntry> {
        self.index
            .get(&ActionId::new(id))
            .map(|&position| &self.entries[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Entries in registration order.
    pub fn list(&self) -> &[ActionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Turns an action id into its ordered candidate list, expanding
    /// placeholders against `env` and the optional `argument`.
    pub fn resolve(
        &self,
        action: &str,
        env: &EnvContext,
        argument: Option<&str>,
    ) -> Result<CommandSpec, LaunchError> {
        let entry = self
            .get(action)
            .ok_or_else(|| LaunchError::UnknownAction(action.to_string()))?;

        let argument = check_argument(entry, argument)?;
        // Home is read from the context once per resolve, not per candidate.
        let vars = Vars {
            env,
            argument,
            home: env.home().ok().map(Path::to_path_buf),
        };

        let candidates = entry
            .candidates
            .iter()
            .map(|template| expand_candidate(template, &vars))
            .collect::<Result<Vec<_>, _>>()?;

        CommandSpec::new(entry.id.clone(), candidates)
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_entry(entry: &ActionEntry) -> Result<(), LaunchError> {
    let invalid = |reason: String| LaunchError::InvalidEntry {
        action: entry.id.to_string(),
        reason,
    };

    if entry.id.as_str().trim().is_empty() {
        return Err(invalid("empty action id".into()));
    }
    if entry.candidates.is_empty() {
        return Err(invalid("no candidates".into()));
    }

    for template in &entry.candidates {
        if template.program.trim().is_empty() {
            return Err(invalid("candidate with empty program".into()));
        }
        let strings = std::iter::once(&template.program)
            .chain(&template.args)
            .chain(&template.requires)
            .chain(&template.working_dir)
            .chain(template.env.values());
        for value in strings {
            for name in placeholders(value) {
                if !PLACEHOLDERS.contains(&name) {
                    return Err(invalid(format!("unknown placeholder {{{name}}}")));
                }
                if name == "arg" && !entry.takes_argument {
                    return Err(invalid("{arg} used by an action without argument".into()));
                }
            }
        }
    }
    Ok(())
}

fn check_argument<'a>(
    entry: &ActionEntry,
    argument: Option<&'a str>,
) -> Result<Option<&'a str>, LaunchError> {
    let action = || entry.id.to_string();
    let invalid = |reason: &str| LaunchError::InvalidArgument {
        action: action(),
        reason: reason.to_string(),
    };

    match (entry.takes_argument, argument) {
        (false, None) => Ok(None),
        (false, Some(_)) => Err(invalid("action takes no argument")),
        (true, None) => Err(LaunchError::MissingArgument { action: action() }),
        (true, Some(value)) if value.trim().is_empty() => {
            Err(LaunchError::MissingArgument { action: action() })
        }
        (true, Some(value)) => {
            if value.contains('/') || value.contains('\0') {
                return Err(invalid("argument must be a plain file name"));
            }
            if value == "." || value == ".." {
                return Err(invalid("argument must be a plain file name"));
            }
            // A bare `{arg}` would otherwise be read as an option.
            if value.starts_with('-') {
                return Err(invalid("argument must not start with '-'"));
            }
            Ok(Some(value))
        }
    }
}

/// Finds `{name}` tokens whose name is lowercase ascii or `_`.
fn placeholders(value: &str) -> impl Iterator<Item = &str> {
    value.match_indices('{').filter_map(move |(start, _)| {
        let rest = &value[start + 1..];
        let end = rest.find('}')?;
        let name = &rest[..end];
        let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase() || c == '_');
        valid.then_some(name)
    })
}

struct Vars<'a> {
    env: &'a EnvContext,
    argument: Option<&'a str>,
    home: Option<PathBuf>,
}

impl Vars<'_> {
    fn lookup(&self, name: &str) -> Result<String, LaunchError> {
        match name {
            "home" => self
                .home
                .as_deref()
                .map(|p| p.to_string_lossy().into_owned())
                .ok_or(LaunchError::MissingEnvironmentValue("HOME")),
            "pictures" => self
                .env
                .image_dir()
                .map(|p| p.to_string_lossy().into_owned()),
            "arg" => self
                .argument
                .map(str::to_string)
                .ok_or(LaunchError::MissingEnvironmentValue("argument")),
            _ => Err(LaunchError::MissingEnvironmentValue("placeholder")),
        }
    }

    fn expand(&self, template: &str) -> Result<String, LaunchError> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start + 1..];
            match tail.find('}') {
                Some(end) if PLACEHOLDERS.contains(&&tail[..end]) => {
                    out.push_str(&self.lookup(&tail[..end])?);
                    rest = &tail[end + 1..];
                }
                _ => {
                    out.push('{');
                    rest = tail;
                }
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}

fn expand_candidate(template: &CandidateTemplate, vars: &Vars<'_>) -> Result<Candidate, LaunchError> {
    let args = template
        .args
        .iter()
        .map(|arg| vars.expand(arg))
        .collect::<Result<Vec<_>, _>>()?;
    let requires = template
        .requires
        .iter()
        .map(|program| vars.expand(program))
        .collect::<Result<Vec<_>, _>>()?;
    let working_dir = template
        .working_dir
        .as_deref()
        .map(|dir| vars.expand(dir).map(PathBuf::from))
        .transpose()?;
    let env = template
        .env
        .iter()
        .map(|(key, value)| Ok((key.clone(), vars.expand(value)?)))
        .collect::<Result<Vec<_>, LaunchError>>()?;

    Ok(Candidate {
        program: vars.expand(&template.program)?,
        args,
        requires,
        working_dir,
        env,
    })
}
