//! Shell state shared by every command

use std::sync::Arc;

use s3shell_core::{Connector, ObjectStore, ProfileStore, Result, SessionManager, WorkingPath};

use crate::output::{OutputConfig, Renderer};

/// Mutable REPL state, passed to each command by reference
pub struct ShellContext {
    /// Session state machine
    pub session: SessionManager,
    /// Current location; only replaced after a command fully succeeds
    pub cwd: WorkingPath,
    /// Where `login` reads credentials from
    pub profiles: ProfileStore,
    /// Output flags
    pub output: OutputConfig,
}

impl ShellContext {
    /// A logged-out shell positioned at the root
    pub fn new(connector: Arc<dyn Connector>, profiles: ProfileStore, output: OutputConfig) -> Self {
        Self {
            session: SessionManager::new(connector),
            cwd: WorkingPath::root(),
            profiles,
            output,
        }
    }

    /// Store handle of the active session
    pub fn store(&self) -> Result<Arc<dyn ObjectStore>> {
        self.session.store()
    }

    /// Resolve a path argument against the working path
    pub fn resolve(&self, input: &str) -> Result<WorkingPath> {
        self.cwd.resolve(input)
    }

    /// Listing renderer honoring the color flag
    pub fn renderer(&self) -> Renderer {
        Renderer::new(!self.output.no_color)
    }
}
