//! Data models.

pub mod config;
pub mod identity;
pub mod request;
pub mod source;
