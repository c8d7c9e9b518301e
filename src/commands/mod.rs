//! CLI command implementations.

pub mod check;
pub mod sync;

pub use check::CheckCommand;
pub use sync::SyncCommand;
