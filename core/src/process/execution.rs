// workstate/src/process/execution.rs

//! Contains `Workstate::run`, the executor that drives a subject through a
//! named process: entry validation, the transition-resolution loop and the
//! hook pipeline around it.

use crate::core::state::StateKey;
use crate::core::status::StatusCodec;
use crate::core::subject::Subject;
use crate::error::{WorkstateError, WorkstateResult};
use crate::process::hooks::Continuation;
use crate::registry::Workstate;
use tracing::{event, instrument, span, Level};

impl<S: Subject> Workstate<S> {
  /// Runs the process registered under `process_name` against `subject`.
  ///
  /// The subject's status is re-read at the top of every loop iteration, so
  /// invoking the same process on a subject that stopped mid-sequence (a
  /// declining guard, a raised action) resumes from the persisted state
  /// without re-running the transitions already passed.
  ///
  /// Returns the final canonical state once no further rule matches.
  #[instrument(
        name = "Workstate::run",
        skip_all,
        fields(
            process = %process_name,
            subject_type = %std::any::type_name::<S>(),
        ),
        err(Display)
    )]
  pub fn run(&self, process_name: &str, subject: &mut S) -> WorkstateResult<StateKey> {
    let spec = self
      .processes
      .read()
      .get(process_name)
      .cloned()
      .ok_or_else(|| WorkstateError::ProcessMissing {
        name: process_name.to_string(),
      })?;

    // The entry state is observed once. The precondition is checked against
    // this value only, never re-checked inside the loop, and the before
    // hook runs before the check.
    let entry_state = StatusCodec::read(subject);
    event!(Level::DEBUG, state = %entry_state, "process invocation starting");

    if let Some(hook) = spec.before_hook() {
      self.invoke_hook(hook, subject)?;
    }

    if !spec.applies_to(&entry_state) {
      // applies_to is unconditionally true without a precondition, so one
      // is present here.
      let expected = spec
        .precondition()
        .map(|state| state.to_string())
        .unwrap_or_default();
      event!(Level::ERROR, state = %entry_state, "subject is not in a valid initial state");
      return Err(WorkstateError::InvalidInitialState {
        process: process_name.to_string(),
        expected,
        actual: entry_state.to_string(),
      });
    }

    let final_state = self.execute_transitions(&spec, subject)?;

    if let Some(hook) = spec.after_hook() {
      self.invoke_hook(hook, subject)?;
    }
    self.after_process.invoke_all(subject);

    event!(Level::DEBUG, state = %final_state, "process invocation completed");
    Ok(final_state)
  }

  /// The transition-resolution loop. Exits when no rule matches the current
  /// state or a guard declines; any failure from a guard, action or the
  /// persistence call aborts at that point and propagates unchanged.
  ///
  /// The loop does not detect cycles: a cyclic transition table keeps
  /// running until a guard declines or a call fails.
  fn execute_transitions(
    &self,
    spec: &crate::process::definition::ProcessSpec,
    subject: &mut S,
  ) -> WorkstateResult<StateKey> {
    loop {
      let state = StatusCodec::read(subject);
      let Some(rule) = spec.transition_for(&state) else {
        event!(Level::DEBUG, state = %state, "no rule for state, loop finished");
        return Ok(state);
      };

      let transition_span = span!(
        Level::INFO,
        "process_transition",
        action = %rule.action,
        from = %state,
        to = %rule.target,
      );
      let _enter = transition_span.enter();

      if let Some(guard_name) = rule.guard.as_deref() {
        if !self.invoke_guard(guard_name, subject)? {
          // A declining guard halts the entire chain here; remaining
          // reachable rules are not probed.
          event!(Level::INFO, guard = %guard_name, "guard declined, halting chain");
          return Ok(state);
        }
      }

      let action = self
        .steps
        .read()
        .action(&rule.action)
        .ok_or_else(|| WorkstateError::ActionMissing {
          name: rule.action.clone(),
        })?;
      let around = self.around.read().clone();
      around(rule, subject, Continuation::new(rule.action.as_str(), &action))?;

      StatusCodec::write(subject, &rule.target)?;
      event!(Level::DEBUG, to = %rule.target, "transition applied");
    }
  }

  fn invoke_guard(&self, name: &str, subject: &mut S) -> WorkstateResult<bool> {
    let guard = self
      .steps
      .read()
      .guard(name)
      .ok_or_else(|| WorkstateError::GuardMissing {
        name: name.to_string(),
      })?;
    guard(subject).map_err(|source| WorkstateError::GuardFailure {
      guard: name.to_string(),
      source,
    })
  }

  fn invoke_hook(&self, name: &str, subject: &mut S) -> WorkstateResult<()> {
    // Hooks resolve in the action namespace.
    let hook = self
      .steps
      .read()
      .action(name)
      .ok_or_else(|| WorkstateError::ActionMissing {
        name: name.to_string(),
      })?;
    hook(subject).map_err(|source| WorkstateError::HookFailure {
      hook: name.to_string(),
      source,
    })
  }
}
