// workstate/src/process/definition.rs

//! Contains the immutable `ProcessSpec` produced by a configuration pass,
//! and the `Transition` rules it is made of.

use crate::core::state::StateKey;
use std::collections::HashMap;

/// One transition rule: origin state → named action → target state,
/// optionally gated by a named guard.
#[derive(Clone, Debug)]
pub struct Transition {
  pub action: String,
  pub target: StateKey,
  pub guard: Option<String>,
}

/// The immutable specification of one named process: precondition,
/// before/after hook names, transition table and alias table.
///
/// Built once at registration time and shared (via `Arc`) by every
/// invocation of that process.
#[derive(Debug)]
pub struct ProcessSpec {
  pub(crate) name: String,
  pub(crate) precondition: Option<StateKey>,
  pub(crate) before: Option<String>,
  pub(crate) after: Option<String>,
  pub(crate) transitions: HashMap<StateKey, Transition>,
  pub(crate) aliases: HashMap<StateKey, StateKey>,
}

impl ProcessSpec {
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn precondition(&self) -> Option<&StateKey> {
    self.precondition.as_ref()
  }

  pub fn before_hook(&self) -> Option<&str> {
    self.before.as_deref()
  }

  pub fn after_hook(&self) -> Option<&str> {
    self.after.as_deref()
  }

  /// Looks up the rule for `state`: first as a transition origin, then
  /// through the alias table. Aliases affect lookup only; the value written
  /// after the action runs is always the rule's own target.
  pub fn transition_for(&self, state: &StateKey) -> Option<&Transition> {
    self.transitions.get(state).or_else(|| {
      self
        .aliases
        .get(state)
        .and_then(|canonical| self.transitions.get(canonical))
    })
  }

  /// Whether a subject observed in `state` may enter this process.
  ///
  /// True when no precondition is set, when `state` matches it, or when
  /// `state` is (an alias of) a transition origin; the latter is what lets
  /// a process resume from a persisted intermediate status.
  pub fn applies_to(&self, state: &StateKey) -> bool {
    match &self.precondition {
      None => true,
      Some(pre) => pre == state || self.transition_for(state).is_some(),
    }
  }
}
