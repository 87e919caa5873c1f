//! Action model and command resolution for the hyprdash launcher.

pub mod catalog;
pub mod environment;
pub mod error;
pub mod resolver;
pub mod types;

pub use environment::EnvContext;
pub use error::{CandidateFailure, LaunchError};
pub use resolver::CommandTable;
pub use types::*;
