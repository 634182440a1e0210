//! Core administration engine.

pub mod backup;
pub mod dialect;
pub mod executor;
pub mod lifecycle;
pub mod remote;
pub mod root;

pub use remote::Remote;
