//! Types and rules shared by the Fluent server and the browser workbench.
//!
//! Everything here is free of I/O so the same validation runs in the wasm
//! client before a request is issued and in native tests.

pub mod config;
pub mod error;
pub mod model;
pub mod quota;
pub mod requests;
pub mod workflow;
