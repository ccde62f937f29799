// This module re-exports important pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod access;
pub mod logging;
pub mod types;

pub use access::*;
pub use logging::*;
pub use types::*;
