// workstate/src/lib.rs

//! Workstate: a declarative, resumable state-machine engine for multi-step
//! business processes.
//!
//! A process is a named chain of guarded state transitions attached to an
//! otherwise-ordinary domain entity (the *subject*). Invoking the process
//! drives the subject through as many transitions as apply, starting from its
//! current persisted status, until no further rule matches:
//!  - Declarative specifications built in a single configuration pass.
//!  - Case-insensitive status normalization, plus accepted alias states that
//!    resolve to a canonical origin for rule lookup.
//!  - A layered hook pipeline: one before/after hook per invocation, an
//!    around hook per executed transition, and engine-wide after-process
//!    callbacks.
//!  - Resumable execution: the status is re-read at the top of every loop
//!    iteration, so a subject stopped mid-sequence continues from its
//!    persisted state.
//!  - An injectable resolver that can contribute step bundles (named actions
//!    and guards) keyed by process name.

pub mod core;
pub mod error;
pub mod loader;
pub mod process;
pub mod registry;

// --- Re-exports for the Public API ---

// Core types users interact with frequently.
pub use crate::core::state::StateKey;
pub use crate::core::status::StatusCodec;
pub use crate::core::steps::{ActionFn, GuardFn, StepTable};
pub use crate::core::subject::{PlainStatus, Subject};

// The process specification, its builder, and the hook pipeline.
pub use crate::process::builder::ProcessBuilder;
pub use crate::process::definition::{ProcessSpec, Transition};
pub use crate::process::hooks::{AfterProcessFn, AfterProcessHooks, AroundFn, Continuation};

// Step-module resolution.
pub use crate::loader::{StepBundle, StepLookup, StepResolver};

pub use crate::error::{WorkstateError, WorkstateResult};

// The engine: one instance per subject type.
pub use crate::registry::Workstate;

/*
    Core Workflow:
    1. Implement `Subject` for your entity (or wrap it in `PlainStatus<T>`).
    2. Create a `Workstate<MySubject>` engine, optionally with a step resolver.
    3. Register the named actions, guards and hooks the specifications refer to.
    4. Define processes: `engine.define_process("uninstall", |p| { ... })`,
       issuing `must_be` / `transition` / `accept_state` / `before` / `after`
       calls against the builder.
    5. Optionally register an around hook and after-process callbacks.
    6. Drive an entity: `engine.run("uninstall", &mut subject)?`.
*/
