//! CLI commands for mantis-rotate
//!
//! - **rotate**: release the placeholder version and create the next one

pub mod rotate;

pub use rotate::{RotateOptions, run_rotate};
