//! Chat client configuration.
//!
//! The browser has no process environment, so overrides are read from the
//! build environment (`option_env!`) when the bundle is compiled:
//!
//! - `RAG_WEBHOOK_URL`: endpoint receiving every text and file request
//! - `RAG_ASSISTANT_TITLE`: header and document title

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_WEBHOOK_URL: &str = "https://n8n.tools.gebeya.io/webhook/9cdd3ba7-b50f-4550-959e-80f4cdae6ba7";
pub const DEFAULT_TITLE: &str = "RAG Assistant";

/// What the upload path does when a 2xx response carries no reply field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingReplyPolicy {
    /// Acknowledge the upload with a templated message naming the files.
    #[default]
    Templated,
    /// Treat the response as a failure, like the text path does.
    Fallback,
}

/// Whether sends may overlap while a reply is still pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SendConcurrency {
    /// Every send runs independently; replies land in completion order.
    #[default]
    Unbounded,
    /// A send issued while another is in flight is rejected.
    SingleSlot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub webhook_url: String,
    pub title: String,
    pub upload_missing_reply: MissingReplyPolicy,
    pub concurrency: SendConcurrency,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_owned(),
            title: DEFAULT_TITLE.to_owned(),
            upload_missing_reply: MissingReplyPolicy::default(),
            concurrency: SendConcurrency::default(),
        }
    }
}

impl ChatConfig {
    /// Build config from variables captured at compile time.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_overrides(option_env!("RAG_WEBHOOK_URL"), option_env!("RAG_ASSISTANT_TITLE"))
    }

    /// Apply optional overrides on top of the defaults. Blank values are ignored.
    #[must_use]
    pub fn from_overrides(webhook_url: Option<&str>, title: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            webhook_url: non_blank(webhook_url).unwrap_or(defaults.webhook_url),
            title: non_blank(title).unwrap_or(defaults.title),
            ..defaults
        }
    }

    #[must_use]
    pub fn with_upload_missing_reply(mut self, policy: MissingReplyPolicy) -> Self {
        self.upload_missing_reply = policy;
        self
    }

    #[must_use]
    pub fn with_concurrency(mut self, concurrency: SendConcurrency) -> Self {
        self.concurrency = concurrency;
        self
    }
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
