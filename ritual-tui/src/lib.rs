//! Terminal client for the ritual habit tracker.
//!
//! Renders the three screens (auth, today's habits, add habit) with
//! [`ratatui`], keeps them in sync over the REST and realtime clients from
//! `ritual-client`, and enforces the session-based navigation guard.

pub mod config;
pub mod error;
pub mod events;
pub mod keys;
pub mod logging;
pub mod nav;
pub mod notifications;
pub mod state;
pub mod theme;
pub mod views;
pub mod widgets;
