// workstate/src/loader.rs

//! Step-module resolution: an injected resolver that can supply a bundle of
//! named actions and guards when a process is defined.
//!
//! The resolver is passed in explicitly at engine construction; absence is
//! an ordinary return value, not a caught failure. Resolution must never
//! abort process registration.

use crate::core::steps::StepTable;
use std::sync::Arc;

/// Resolver consulted with the process name each time a process is defined.
pub type StepResolver<S> = Arc<dyn Fn(&str) -> StepLookup<S> + Send + Sync>;

/// Outcome of a step-module lookup.
pub enum StepLookup<S> {
  /// No bundle is associated with this process name. The normal case,
  /// silently accepted.
  Absent,
  /// A bundle source exists but the expected named group inside it does
  /// not. A non-fatal diagnostic is logged and registration continues.
  MissingGroup { module: String },
  /// A bundle was found; its callables merge into the engine's step table
  /// without overriding explicit registrations.
  Found(StepBundle<S>),
}

/// A named group of actions and guards contributed to a subject type,
/// conventionally associated with one process.
pub struct StepBundle<S> {
  pub(crate) steps: StepTable<S>,
}

impl<S> StepBundle<S> {
  pub fn new() -> Self {
    Self {
      steps: StepTable::new(),
    }
  }

  pub fn with_action(
    mut self,
    name: &str,
    action: impl Fn(&mut S) -> anyhow::Result<()> + Send + Sync + 'static,
  ) -> Self {
    self.steps.insert_action(name, Arc::new(action));
    self
  }

  pub fn with_guard(
    mut self,
    name: &str,
    guard: impl Fn(&mut S) -> anyhow::Result<bool> + Send + Sync + 'static,
  ) -> Self {
    self.steps.insert_guard(name, Arc::new(guard));
    self
  }
}

impl<S> Default for StepBundle<S> {
  fn default() -> Self {
    Self::new()
  }
}
