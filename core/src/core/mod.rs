// workstate/src/core/mod.rs

//! Core primitives: the normalized state key, the subject contract, the
//! status codec and the name-keyed step tables.

pub mod state;
pub mod status;
pub mod steps;
pub mod subject;
