//! Error types for the Highlighter protocol layer.

mod adapter;
mod auth;
mod code;
mod dispatch;

pub use adapter::*;
pub use auth::*;
pub use code::*;
pub use dispatch::*;
