//! MySQL Admin Library
//!
//! Remote administration of MySQL servers: databases, users, grants and
//! passwords across server versions, plus logical backup and restore.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
