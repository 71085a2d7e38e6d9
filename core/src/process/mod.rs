// workstate/src/process/mod.rs

//! The process specification (builder + immutable definition), the executor
//! and the hook pipeline.

pub mod builder;
pub mod definition;
pub mod execution;
pub mod hooks;
