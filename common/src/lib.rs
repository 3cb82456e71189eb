//! # Topogen Common
//!
//! Shared vocabulary of the workspace: the adjacency data model, the error
//! taxonomy, run configuration and the traits that isolate the pipeline from
//! the devices it reads.

pub mod config;
pub mod error;
pub mod model;
pub mod port;
pub mod source;
