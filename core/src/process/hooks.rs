// workstate/src/process/hooks.rs

//! The hook pipeline: the per-transition around hook with its continuation,
//! and the engine-wide after-process hook registry.

use crate::core::steps::ActionFn;
use crate::error::{WorkstateError, WorkstateResult};
use crate::process::definition::Transition;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{event, Level};

/// The around hook wraps each individual transition's action call. It is
/// invoked once per executed transition, not once per process invocation.
///
/// The hook receives the firing rule, the subject, and a [`Continuation`]
/// that performs the actual action. It must invoke the continuation exactly
/// once: `Continuation::call` consumes the value, which enforces at most
/// once; invoking it at all is the hook's contract.
pub type AroundFn<S> =
  Arc<dyn Fn(&Transition, &mut S, Continuation<'_, S>) -> WorkstateResult<()> + Send + Sync>;

/// Deferred invocation of a transition's action, handed to the around hook.
pub struct Continuation<'a, S> {
  action_name: &'a str,
  action: &'a ActionFn<S>,
}

impl<'a, S> Continuation<'a, S> {
  pub(crate) fn new(action_name: &'a str, action: &'a ActionFn<S>) -> Self {
    Self { action_name, action }
  }

  /// Runs the wrapped action against the subject. Consumes the
  /// continuation, so an around hook cannot run the action twice.
  pub fn call(self, subject: &mut S) -> WorkstateResult<()> {
    (self.action)(subject).map_err(|source| WorkstateError::ActionFailure {
      action: self.action_name.to_string(),
      source,
    })
  }
}

fn identity_call<S>(
  _rule: &Transition,
  subject: &mut S,
  continuation: Continuation<'_, S>,
) -> WorkstateResult<()> {
  continuation.call(subject)
}

/// The default around hook: the identity wrapper.
pub(crate) fn identity_around<S: 'static>() -> AroundFn<S> {
  Arc::new(identity_call::<S>)
}

/// A callback invoked after every process invocation, regardless of which
/// specification ran. Receives the subject as its sole argument.
pub type AfterProcessFn<S> = Arc<dyn Fn(&mut S) + Send + Sync>;

/// Append-only registry of after-process callbacks.
///
/// Starts explicitly empty, grows only through [`register`](Self::register)
/// and is never reset. Reads are lock-guarded but the engine provides no
/// further serialization: registration is expected to happen during setup,
/// before concurrent invocations begin.
pub struct AfterProcessHooks<S> {
  hooks: RwLock<Vec<AfterProcessFn<S>>>,
}

impl<S> AfterProcessHooks<S> {
  pub fn new() -> Self {
    Self {
      hooks: RwLock::new(Vec::new()),
    }
  }

  pub fn register(&self, hook: impl Fn(&mut S) + Send + Sync + 'static) {
    self.hooks.write().push(Arc::new(hook));
  }

  /// Invokes every registered callback in registration order.
  pub(crate) fn invoke_all(&self, subject: &mut S) {
    let hooks: Vec<AfterProcessFn<S>> = self.hooks.read().iter().cloned().collect();
    if !hooks.is_empty() {
      event!(Level::TRACE, count = hooks.len(), "invoking after-process hooks");
    }
    for hook in hooks {
      hook(subject);
    }
  }
}

impl<S> Default for AfterProcessHooks<S> {
  fn default() -> Self {
    Self::new()
  }
}
