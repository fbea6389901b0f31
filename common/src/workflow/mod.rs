//! Pure steps of the workbench: what gets validated and what gets sent.
//!
//! Each submodule turns user input into a request payload or a
//! [`ValidationError`](crate::error::ValidationError) without touching the
//! network, so a rejected input never produces a request.

pub mod manual;
pub mod predict;
pub mod report;
pub mod upload;
