//! Browser helpers and pure formatting utilities shared by components.

#[cfg(feature = "csr")]
pub mod files;
pub mod markdown;
pub mod theme;
