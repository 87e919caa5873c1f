use std::sync::Arc;

use hyprdash_core::{ActionEntry, CommandTable, EnvContext, LaunchError, LaunchResult};
use tracing::{error, info};

use crate::launcher::Launcher;

/// Single entry point for the UI: action id in, launch outcome out.
///
/// Holds no mutable state across calls, so concurrent dispatches of the same
/// action simply start independent processes.
pub struct Dispatcher {
    table: Arc<CommandTable>,
    launcher: Arc<Launcher>,
    env: EnvContext,
}

impl Dispatcher {
    pub fn new(table: Arc<CommandTable>, launcher: Arc<Launcher>, env: EnvContext) -> Self {
        Self {
            table,
            launcher,
            env,
        }
    }

    pub fn dispatch(&self, action: &str) -> LaunchResult {
        self.dispatch_with(action, None)
    }

    pub fn dispatch_with(&self, action: &str, argument: Option<&str>) -> LaunchResult {
        info!("Dispatching action: {}", action);

        let spec = match self.table.resolve(action, &self.env, argument) {
            Ok(spec) => spec,
            Err(e) => {
                if matches!(e, LaunchError::UnknownAction(_)) {
                    error!("Dispatch of unregistered action: {}", action);
                } else {
                    error!("Could not resolve {}: {}", action, e);
                }
                return Err(e);
            }
        };

        self.launcher.launch(&spec)
    }

    pub fn actions(&self) -> &[ActionEntry] {
        self.table.list()
    }

    pub fn entry(&self, action: &str) -> Option<&ActionEntry> {
        self.table.get(action)
    }

    pub fn env(&self) -> &EnvContext {
        &self.env
    }

    pub fn set_env(&mut self, env: EnvContext) {
        self.env = env;
    }
}
