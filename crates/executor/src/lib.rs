pub mod dispatcher;
pub mod launcher;
pub mod probe;

pub use dispatcher::Dispatcher;
pub use launcher::{DetachedSpawner, Launcher, ProcessSpawner};
pub use probe::{ExecutableProbe, PathProbe};
