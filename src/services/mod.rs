//! External collaborators: dump/restore tools and archive compression.

pub mod archive;
pub mod dump;
