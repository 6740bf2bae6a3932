//! Client for the remote backend of the ritual habit tracker.
//!
//! The backend is an opaque hosted service: a document store with
//! per-collection REST endpoints, an identity provider for accounts and
//! sessions, and a WebSocket endpoint pushing document-change
//! notifications. This crate wraps that surface in typed calls and carries
//! the client-side policies around it (session lifecycle, read/write
//! failure handling, realtime teardown). It knows nothing about rendering.

pub mod backend;
pub mod config;
pub mod query;
pub mod realtime;
pub mod repo;
pub mod session;
pub mod token;

pub use backend::{BackendClient, ClientError, DocumentList};
pub use config::{BackendConfig, ConfigError};
pub use query::Query;
pub use realtime::{
    classify, collection_channel, RealtimeClient, RealtimeEvent, RealtimeMessage, Refresh,
    Subscription,
};
pub use repo::HabitRepository;
pub use session::SessionStore;
pub use token::TokenStore;
