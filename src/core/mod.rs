//! Core building blocks shared by every mantis-rotate operation
//!
//! - **config**: raw run inputs and their validation into a rotation plan
//! - **dates**: `YYYY-MM-DD` date arithmetic for version timestamps
//! - **error**: error types with contextual help messages and exit codes

pub mod config;
pub mod dates;
pub mod error;
