// workstate/src/error.rs

use anyhow::Error as AnyhowError;
use thiserror::Error;

/// The closed error taxonomy of the engine.
///
/// Failures raised by user-provided callables (actions, guards, hooks,
/// persistence) are not translated: they travel unchanged as the `source` of
/// the corresponding variant and abort the invocation at the point of
/// failure. The engine performs no retries anywhere.
#[derive(Debug, Error)]
pub enum WorkstateError {
  /// The subject's entry state satisfied neither the precondition nor any
  /// transition origin (or alias). Raised before any transition runs; the
  /// subject is untouched.
  #[error("Process {process} requires object to have initial status {expected} or any transitional status, but it is {actual}")]
  InvalidInitialState {
    process: String,
    expected: String,
    actual: String,
  },

  #[error("Action '{action}' failed. Source: {source}")]
  ActionFailure {
    action: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Guard '{guard}' failed. Source: {source}")]
  GuardFailure {
    guard: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Hook '{hook}' failed. Source: {source}")]
  HookFailure {
    hook: String,
    #[source]
    source: AnyhowError,
  },

  /// The subject's persistence operation failed after a status write. The
  /// in-memory status is already mutated but not durably committed.
  #[error("Persistence failed while writing status '{status}'. Source: {source}")]
  PersistenceFailure {
    status: String,
    #[source]
    source: AnyhowError,
  },

  /// A rule or hook named a callable the subject type never registered.
  /// Names are resolved dynamically, so this surfaces only when the rule
  /// fires.
  #[error("No action named '{name}' is registered for this subject type")]
  ActionMissing { name: String },

  #[error("No guard named '{name}' is registered for this subject type")]
  GuardMissing { name: String },

  #[error("No process named '{name}' has been defined")]
  ProcessMissing { name: String },
}

pub type WorkstateResult<T, E = WorkstateError> = std::result::Result<T, E>;
