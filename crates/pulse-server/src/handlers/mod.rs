//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod commands;
pub mod dashboard;
pub mod metrics;
pub mod settings;
pub mod state;

// Re-export all handlers for use in router
pub use commands::*;
pub use dashboard::*;
pub use metrics::*;
pub use settings::*;
pub use state::*;
