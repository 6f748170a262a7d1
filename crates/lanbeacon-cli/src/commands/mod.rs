//! Command implementations.

pub mod announce;
pub mod discover;

pub use announce::run_announce;
pub use discover::run_discover;
