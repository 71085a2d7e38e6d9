// workstate/src/registry.rs

//! Defines `Workstate<S>`, the engine instance for one subject type `S`: the
//! named process specifications, the subject's step table, the around hook
//! and the after-process hook registry.

use crate::core::steps::StepTable;
use crate::error::WorkstateResult;
use crate::loader::{StepLookup, StepResolver};
use crate::process::builder::ProcessBuilder;
use crate::process::definition::{ProcessSpec, Transition};
use crate::process::hooks::{identity_around, AfterProcessHooks, AroundFn, Continuation};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{event, Level};

/// One engine per subject type.
///
/// Registration takes `&self`; the state is interior-mutable so a single
/// engine can be shared behind an `Arc` across the program once setup is
/// complete. The engine provides no serialization of concurrent invocations
/// on one subject instance; callers serialize those if required.
pub struct Workstate<S> {
  pub(crate) processes: RwLock<HashMap<String, Arc<ProcessSpec>>>,
  pub(crate) steps: RwLock<StepTable<S>>,
  pub(crate) around: RwLock<AroundFn<S>>,
  pub(crate) after_process: AfterProcessHooks<S>,
  resolver: Option<StepResolver<S>>,
}

impl<S: 'static> Workstate<S> {
  /// Creates an engine with no step resolver.
  pub fn new() -> Self {
    Self {
      processes: RwLock::new(HashMap::new()),
      steps: RwLock::new(StepTable::new()),
      around: RwLock::new(identity_around()),
      after_process: AfterProcessHooks::new(),
      resolver: None,
    }
  }

  /// Creates an engine that consults `resolver` for a step bundle each time
  /// a process is defined.
  pub fn with_step_resolver(
    resolver: impl Fn(&str) -> StepLookup<S> + Send + Sync + 'static,
  ) -> Self {
    let mut engine = Self::new();
    engine.resolver = Some(Arc::new(resolver));
    engine
  }

  /// Defines a named process from a single configuration pass.
  ///
  /// The closure receives the builder and issues `must_be` / `transition` /
  /// `accept_state` / `before` / `after` calls; the resulting specification
  /// is immutable and shared by every later invocation of `name`.
  ///
  /// If a step resolver was injected, a bundle resolved for `name` is merged
  /// into the step table first; explicit registrations win over bundle
  /// entries, and a failed bundle lookup never aborts the definition.
  ///
  /// The transition table is not checked for cycles: a cyclic graph loops
  /// unboundedly at run time, which is a caller responsibility.
  pub fn define_process(&self, name: &str, configure: impl FnOnce(&mut ProcessBuilder)) {
    self.load_step_bundle(name);

    let mut builder = ProcessBuilder::new(name);
    configure(&mut builder);
    let spec = builder.build();

    event!(
      Level::DEBUG,
      process = %name,
      transitions = spec.transitions.len(),
      "process defined"
    );
    self.processes.write().insert(name.to_string(), Arc::new(spec));
  }

  /// Returns the immutable specification registered under `name`, if any.
  pub fn process_spec(&self, name: &str) -> Option<Arc<ProcessSpec>> {
    self.processes.read().get(name).cloned()
  }

  /// Registers a named transition action, replacing any previous entry of
  /// that name.
  pub fn register_action(
    &self,
    name: &str,
    action: impl Fn(&mut S) -> anyhow::Result<()> + Send + Sync + 'static,
  ) {
    self.steps.write().insert_action(name, Arc::new(action));
  }

  /// Registers a named guard, replacing any previous entry of that name.
  pub fn register_guard(
    &self,
    name: &str,
    guard: impl Fn(&mut S) -> anyhow::Result<bool> + Send + Sync + 'static,
  ) {
    self.steps.write().insert_guard(name, Arc::new(guard));
  }

  /// Registers a named before/after hook. Hooks share the action namespace;
  /// this is `register_action` under a clearer name for call sites.
  pub fn register_hook(
    &self,
    name: &str,
    hook: impl Fn(&mut S) -> anyhow::Result<()> + Send + Sync + 'static,
  ) {
    self.register_action(name, hook);
  }

  /// Replaces the around hook wrapping each transition's action call. There
  /// is one around hook per subject type; the default is the identity
  /// wrapper.
  pub fn register_around_hook(
    &self,
    hook: impl Fn(&Transition, &mut S, Continuation<'_, S>) -> WorkstateResult<()>
      + Send
      + Sync
      + 'static,
  ) {
    *self.around.write() = Arc::new(hook);
  }

  /// Appends a callback invoked after every process invocation on this
  /// engine, across all specifications. Registration order is invocation
  /// order; the registry is never reset.
  pub fn register_global_after_hook(&self, hook: impl Fn(&mut S) + Send + Sync + 'static) {
    self.after_process.register(hook);
  }

  fn load_step_bundle(&self, process: &str) {
    let Some(resolver) = self.resolver.as_ref() else {
      return;
    };
    match resolver(process) {
      StepLookup::Absent => {
        event!(Level::TRACE, process = %process, "no step module associated with process");
      }
      StepLookup::MissingGroup { module } => {
        // Non-fatal by contract: registration proceeds without the bundle.
        event!(
          Level::WARN,
          process = %process,
          module = %module,
          "error while trying to load the step module, because it does not exist"
        );
      }
      StepLookup::Found(bundle) => {
        event!(Level::DEBUG, process = %process, "merging resolved step bundle");
        self.steps.write().absorb(bundle.steps);
      }
    }
  }
}

impl<S: 'static> Default for Workstate<S> {
  fn default() -> Self {
    Self::new()
  }
}
