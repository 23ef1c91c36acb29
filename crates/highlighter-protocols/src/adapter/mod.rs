//! External service adapter contracts.
//!
//! Every adapter wraps one suspending external call behind the shape
//! `input -> Result<Output, AdapterError>`. Adapters validate their input
//! before spending a round trip and never retry internally.

mod intent;
mod traits;
mod types;

pub use intent::parse_intent_output;
pub use traits::*;
pub use types::*;
