// workstate/src/core/subject.rs

//! The capability contract a domain entity must provide to be driven by a
//! process, plus an adapter for types that carry no status of their own.

/// Status storage and persistence, the only mutable state the engine
/// touches on a subject.
///
/// `status` returns the raw stored representation; the engine normalizes it
/// through [`StatusCodec`](crate::core::status::StatusCodec) and never
/// compares raw values directly. `save` is invoked after every successful
/// status change; its failure propagates synchronously and aborts further
/// execution of the running process.
pub trait Subject {
  fn status(&self) -> &str;

  fn set_status(&mut self, raw: String);

  fn save(&mut self) -> anyhow::Result<()>;
}

/// Adapter supplying a plain status field and no-op persistence for inner
/// types that have neither.
///
/// This wrapper is selected deliberately by the integrator: the engine never
/// detects missing accessors at runtime and never shadows an existing
/// [`Subject`] implementation.
#[derive(Debug, Clone)]
pub struct PlainStatus<T> {
  inner: T,
  status: String,
}

impl<T> PlainStatus<T> {
  pub fn new(inner: T, initial_status: impl Into<String>) -> Self {
    Self {
      inner,
      status: initial_status.into(),
    }
  }

  pub fn inner(&self) -> &T {
    &self.inner
  }

  pub fn inner_mut(&mut self) -> &mut T {
    &mut self.inner
  }

  pub fn into_inner(self) -> T {
    self.inner
  }
}

impl<T> Subject for PlainStatus<T> {
  fn status(&self) -> &str {
    &self.status
  }

  fn set_status(&mut self, raw: String) {
    self.status = raw;
  }

  fn save(&mut self) -> anyhow::Result<()> {
    Ok(())
  }
}
