// workstate/src/core/status.rs

//! `StatusCodec`: translation between a subject's raw status field and the
//! canonical `StateKey` form.

use crate::core::state::StateKey;
use crate::core::subject::Subject;
use crate::error::{WorkstateError, WorkstateResult};

/// Normalizes raw status values on the way in and writes canonical targets
/// back out, persisting through the subject.
pub struct StatusCodec;

impl StatusCodec {
  /// Reads the subject's raw status and folds it into a `StateKey`.
  pub fn read<S: Subject>(subject: &S) -> StateKey {
    StateKey::new(subject.status())
  }

  /// Stores `state` as the subject's raw status (uppercase representation)
  /// and invokes the subject's persistence operation.
  ///
  /// On persistence failure the in-memory status has already been mutated;
  /// only the durable commit is missing. The failure propagates immediately.
  pub fn write<S: Subject>(subject: &mut S, state: &StateKey) -> WorkstateResult<()> {
    subject.set_status(state.as_str().to_uppercase());
    subject.save().map_err(|source| WorkstateError::PersistenceFailure {
      status: state.to_string(),
      source,
    })
  }
}
