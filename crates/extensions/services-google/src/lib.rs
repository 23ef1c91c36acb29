//! # Highlighter Services - Google
//!
//! Adapters for the Google services behind the built-in actions:
//! Maps directions, Tasks, Calendar, and OAuth sign-in with the userinfo
//! endpoint.

mod calendar;
mod http;
mod identity;
mod maps;
mod tasks;

pub use calendar::GoogleCalendar;
pub use identity::{GoogleIdentity, IdentitySettings};
pub use maps::{GoogleMaps, MapsSettings};
pub use tasks::{GoogleTasks, DEFAULT_LIST_TITLE};
