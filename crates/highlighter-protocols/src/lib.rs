//! # Highlighter Protocols
//!
//! Core protocol definitions for the Highlighter dispatcher.
//! Contains only types and interface definitions - no implementations.
//!
//! ## Contents
//!
//! - [`Request`] / [`Reply`] - the unit of communication between a UI surface
//!   and the dispatcher
//! - [`ErrorCode`] - wire-level error taxonomy carried by failed replies
//! - Adapter traits, one per external capability: [`Summarizer`],
//!   [`IntentExtractor`], [`DirectionsService`], [`EmailComposer`],
//!   [`TaskService`], [`CalendarService`], [`IdentityProvider`],
//!   [`SurfaceLauncher`]

pub mod adapter;
pub mod error;
pub mod reply;
pub mod request;

pub use adapter::{
    parse_intent_output, AccessToken, CalendarEvent, CalendarService, ComposedEmail, Confidence,
    CreatedTask, Directions, DirectionsQuery, DirectionsService, EmailComposer, EmailRequest,
    EventQuery, IdentityProvider, Intent, IntentExtractor, Summarizer, SurfaceLauncher, TaskDraft,
    TaskService, UserInfo, DEFAULT_EVENT_COUNT, MAX_EVENT_COUNT,
};
pub use error::{AdapterError, AuthError, DispatchError, ErrorCode};
pub use reply::{Reply, ReplyPayload};
pub use request::{Envelope, Request, RequestKind};
