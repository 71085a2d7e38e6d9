// workstate/src/process/builder.rs

//! The configuration-pass builder that produces an immutable `ProcessSpec`.

use crate::core::state::StateKey;
use crate::process::definition::{ProcessSpec, Transition};
use std::collections::HashMap;

/// Collects `must_be` / `transition` / `accept_state` / `before` / `after`
/// calls for one process definition.
///
/// The builder is handed to the configuration closure of
/// [`Workstate::define_process`](crate::registry::Workstate::define_process)
/// and consumed when the closure returns. Action and guard names are stored
/// as given and resolved against the subject's step table only when the rule
/// fires; a typo surfaces as
/// [`ActionMissing`](crate::WorkstateError::ActionMissing) at run time, not
/// here.
pub struct ProcessBuilder {
  name: String,
  precondition: Option<StateKey>,
  before: Option<String>,
  after: Option<String>,
  transitions: HashMap<StateKey, Transition>,
  aliases: HashMap<StateKey, StateKey>,
}

impl ProcessBuilder {
  pub(crate) fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      precondition: None,
      before: None,
      after: None,
      transitions: HashMap::new(),
      aliases: HashMap::new(),
    }
  }

  /// Sets the state a subject must be in (directly, or via membership in
  /// the transition origins or their aliases) for the process to begin.
  pub fn must_be(&mut self, state: impl Into<StateKey>) -> &mut Self {
    self.precondition = Some(state.into());
    self
  }

  /// Registers one transition rule. Panics on a duplicate origin: transition
  /// rules are unique per origin state.
  pub fn transition(
    &mut self,
    action: &str,
    from: impl Into<StateKey>,
    to: impl Into<StateKey>,
  ) -> &mut Self {
    self.insert_rule(action, from.into(), to.into(), None);
    self
  }

  /// Registers one guarded transition rule. The guard gates the rule at run
  /// time; a guard answering `false` halts the chain without error.
  pub fn transition_if(
    &mut self,
    action: &str,
    from: impl Into<StateKey>,
    to: impl Into<StateKey>,
    guard: &str,
  ) -> &mut Self {
    self.insert_rule(action, from.into(), to.into(), Some(guard.to_string()));
    self
  }

  /// Declares `state` an accepted alias of `canonical` for rule lookup.
  /// The alias never changes the value written after a transition.
  pub fn accept_state(
    &mut self,
    state: impl Into<StateKey>,
    canonical: impl Into<StateKey>,
  ) -> &mut Self {
    self.aliases.insert(state.into(), canonical.into());
    self
  }

  /// Declares several accepted aliases of the same canonical origin.
  pub fn accept_states(&mut self, states: &[&str], canonical: &str) -> &mut Self {
    for state in states {
      self.accept_state(*state, canonical);
    }
    self
  }

  /// Names the hook invoked once per invocation, before the precondition
  /// check.
  pub fn before(&mut self, hook: &str) -> &mut Self {
    self.before = Some(hook.to_string());
    self
  }

  /// Names the hook invoked once per invocation, after the transition loop
  /// terminates naturally.
  pub fn after(&mut self, hook: &str) -> &mut Self {
    self.after = Some(hook.to_string());
    self
  }

  fn insert_rule(&mut self, action: &str, from: StateKey, to: StateKey, guard: Option<String>) {
    if self.transitions.contains_key(&from) {
      // Setup error, not a runtime error: same treatment as a duplicate
      // step name in a pipeline definition.
      panic!(
        "workstate setup error: process '{}' already has a transition from state '{}'",
        self.name, from
      );
    }
    self.transitions.insert(
      from,
      Transition {
        action: action.to_string(),
        target: to,
        guard,
      },
    );
  }

  pub(crate) fn build(self) -> ProcessSpec {
    for (alias, canonical) in &self.aliases {
      if !self.transitions.contains_key(canonical) {
        panic!(
          "workstate setup error: process '{}' accepts state '{}' as '{}', which is not a transition origin",
          self.name, alias, canonical
        );
      }
    }
    ProcessSpec {
      name: self.name,
      precondition: self.precondition,
      before: self.before,
      after: self.after,
      transitions: self.transitions,
      aliases: self.aliases,
    }
  }
}
