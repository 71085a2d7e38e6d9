// workstate/src/core/steps.rs

//! Name-keyed tables of the callables a subject type exposes to its
//! processes.
//!
//! Actions, guards and before/after hooks are resolved by their stored name
//! when a rule fires; nothing validates their existence at specification
//! build time, so a missing name surfaces only at run time.

use std::collections::HashMap;
use std::sync::Arc;

/// A transition action or a before/after hook. Mutates the subject, may fail.
pub type ActionFn<S> = Arc<dyn Fn(&mut S) -> anyhow::Result<()> + Send + Sync>;

/// A transition guard. `Ok(false)` halts the chain without error.
pub type GuardFn<S> = Arc<dyn Fn(&mut S) -> anyhow::Result<bool> + Send + Sync>;

/// The callables registered for one subject type.
///
/// Before/after hooks share the action namespace: a hook is an action that
/// happens to run outside the transition loop.
pub struct StepTable<S> {
  actions: HashMap<String, ActionFn<S>>,
  guards: HashMap<String, GuardFn<S>>,
}

impl<S> StepTable<S> {
  pub fn new() -> Self {
    Self {
      actions: HashMap::new(),
      guards: HashMap::new(),
    }
  }

  /// Registers an action (or hook), replacing any previous entry of that
  /// name.
  pub fn insert_action(&mut self, name: impl Into<String>, action: ActionFn<S>) {
    self.actions.insert(name.into(), action);
  }

  pub fn insert_guard(&mut self, name: impl Into<String>, guard: GuardFn<S>) {
    self.guards.insert(name.into(), guard);
  }

  pub fn action(&self, name: &str) -> Option<ActionFn<S>> {
    self.actions.get(name).cloned()
  }

  pub fn guard(&self, name: &str) -> Option<GuardFn<S>> {
    self.guards.get(name).cloned()
  }

  /// Merges `other` into this table without overriding existing entries.
  /// Step bundles resolved for a process must never shadow callables the
  /// integrator registered explicitly.
  pub fn absorb(&mut self, other: StepTable<S>) {
    for (name, action) in other.actions {
      self.actions.entry(name).or_insert(action);
    }
    for (name, guard) in other.guards {
      self.guards.entry(name).or_insert(guard);
    }
  }
}

impl<S> Default for StepTable<S> {
  fn default() -> Self {
    Self::new()
  }
}
