// workstate/src/core/state.rs

//! Defines `StateKey`, the normalized identifier for a process state.

use std::borrow::Borrow;
use std::fmt;

/// A canonical, case-insensitive state identifier.
///
/// Subjects may store their status in any casing (`"DEACTIVATED"`,
/// `"Deactivated"`); construction folds the raw value to lowercase so rule
/// lookup and comparison ignore the stored representation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(String);

impl StateKey {
  pub fn new(raw: impl AsRef<str>) -> Self {
    StateKey(raw.as_ref().to_lowercase())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for StateKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for StateKey {
  fn from(raw: &str) -> Self {
    StateKey::new(raw)
  }
}

impl From<String> for StateKey {
  fn from(raw: String) -> Self {
    StateKey::new(raw)
  }
}

impl PartialEq<&str> for StateKey {
  fn eq(&self, other: &&str) -> bool {
    self.0 == *other
  }
}

impl Borrow<str> for StateKey {
  fn borrow(&self) -> &str {
    &self.0
  }
}
