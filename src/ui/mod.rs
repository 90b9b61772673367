//! Terminal-facing pieces: log setup and workflow step outputs

pub mod logging;
pub mod output;
