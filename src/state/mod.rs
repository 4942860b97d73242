//! State management module
//!
//! This module handles the client session, its persistence and screen routing

pub mod context;
pub mod navigation;
pub mod storage;

// Re-export commonly used state components
pub use context::SessionContext;
pub use navigation::{Navigator, Screen};
pub use storage::SessionStorage;
