//! Networking modules for the webhook round trip.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` defines the wire schema and reply parsing, `transport` performs
//! the HTTP call, and `dispatcher` ties a user action to the conversation
//! store.

pub mod dispatcher;
pub mod transport;
pub mod types;
