//! Outbound dispatcher: user action in, conversation update out.
//!
//! DESIGN
//! ======
//! Each send runs `Idle -> Pending -> {Resolved | Failed} -> Idle`:
//!
//! 1. the user message is appended before any await (optimistic update),
//! 2. one request goes to the webhook,
//! 3. exactly one assistant message is appended, the reply on success or
//!    [`FALLBACK_APOLOGY`] on failure.
//!
//! There is no cancellation and no retry. With the default
//! [`SendConcurrency::Unbounded`] overlapping sends run independently, so
//! replies land in completion order rather than submission order.
//!
//! ERROR HANDLING
//! ==============
//! Failures never escape as panics. The store is reconciled and a toast is
//! raised before the error is returned, so callers only need to log it.

#[cfg(test)]
#[path = "dispatcher_test.rs"]
mod dispatcher_test;

use std::cell::Cell;

use super::transport::WebhookTransport;
use super::types::{
    Attachment, DispatchError, FileReadError, TextPayload, extract_reply, file_names, timestamp_now, upload_form,
};
use crate::config::{ChatConfig, MissingReplyPolicy, SendConcurrency};
use crate::session::SessionId;
use crate::state::conversation::ConversationStore;
use crate::state::toast::{Notifier, ToastLevel};

pub const FALLBACK_APOLOGY: &str = "Sorry, I couldn't get a response right now. Please try again.";
pub const SEND_FAILED_TOAST: &str = "Failed to send message.";
pub const UPLOAD_FAILED_TOAST: &str = "Error uploading file.";
pub const UPLOAD_SUCCEEDED_TOAST: &str = "Files uploaded successfully!";
pub const BUSY_TOAST: &str = "Please wait for the current reply.";

fn uploaded_message(names: &str) -> String {
    format!("Uploaded: {names}")
}

fn files_received_message(names: &str) -> String {
    format!("I've received your files: {names}")
}

fn unreadable_message(names: &str) -> String {
    format!("Could not read: {names}")
}

pub struct Dispatcher<T, N> {
    store: ConversationStore,
    transport: T,
    notifier: N,
    session_id: SessionId,
    config: ChatConfig,
    in_flight: Cell<usize>,
}

impl<T: WebhookTransport, N: Notifier> Dispatcher<T, N> {
    pub fn new(store: ConversationStore, transport: T, notifier: N, session_id: SessionId, config: ChatConfig) -> Self {
        Self { store, transport, notifier, session_id, config, in_flight: Cell::new(0) }
    }

    #[must_use]
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Send user text and reconcile the reply into the store.
    ///
    /// The text is not re-validated; suppressing empty input is the caller's
    /// job.
    ///
    /// # Errors
    ///
    /// Returns the failure after the fallback message has been appended, or
    /// [`DispatchError::Busy`] (with nothing appended) when single-slot mode
    /// rejects an overlapping send.
    pub async fn send_text(&self, text: impl Into<String>) -> Result<(), DispatchError> {
        let _slot = self.claim_slot()?;
        let text = text.into();
        self.store.append_user_message(text.clone());

        match self.post_text(text).await {
            Ok(reply) => {
                log::debug!("text reply received ({} chars)", reply.len());
                self.store.append_assistant_message(reply);
                Ok(())
            }
            Err(err) => {
                log::warn!("text send failed: {err}");
                self.store.append_assistant_fallback(FALLBACK_APOLOGY);
                self.notifier.notify(ToastLevel::Error, SEND_FAILED_TOAST);
                Err(err)
            }
        }
    }

    /// Upload files and reconcile the reply into the store.
    ///
    /// An empty file list is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the failure after the fallback message has been appended, or
    /// [`DispatchError::Busy`] when single-slot mode rejects the upload.
    pub async fn upload_files(&self, files: Vec<Attachment>) -> Result<(), DispatchError> {
        let names = files.iter().map(|f| f.name.clone()).collect();
        self.upload_named(names, std::future::ready(files.into_iter().map(Ok).collect())).await
    }

    /// Upload picked files whose contents are still being read.
    ///
    /// `Uploaded: <names>` is appended before `read` is awaited, so the user
    /// sees the bubble while large files load. Files that fail to read are
    /// left out of the request and raise an error toast; when none can be
    /// read the fallback is appended and nothing is sent.
    ///
    /// # Errors
    ///
    /// As [`Self::upload_files`], plus [`DispatchError::Unreadable`] when
    /// every file failed to read.
    pub async fn upload_named<R>(&self, names: Vec<String>, read: R) -> Result<(), DispatchError>
    where
        R: Future<Output = Vec<Result<Attachment, FileReadError>>>,
    {
        if names.is_empty() {
            return Ok(());
        }
        let _slot = self.claim_slot()?;
        self.store.append_user_message(uploaded_message(&names.join(", ")));

        let mut files = Vec::new();
        let mut unreadable = Vec::new();
        for result in read.await {
            match result {
                Ok(file) => files.push(file),
                Err(err) => {
                    log::warn!("{err}");
                    unreadable.push(err.name);
                }
            }
        }
        let unreadable = unreadable.join(", ");
        if !unreadable.is_empty() {
            self.notifier.notify(ToastLevel::Error, &unreadable_message(&unreadable));
        }

        if files.is_empty() {
            log::warn!("upload skipped, nothing readable");
            self.store.append_assistant_fallback(FALLBACK_APOLOGY);
            if unreadable.is_empty() {
                self.notifier.notify(ToastLevel::Error, UPLOAD_FAILED_TOAST);
            }
            return Err(DispatchError::Unreadable(unreadable));
        }

        let outcome = match self.post_files(&files).await {
            Ok(Some(reply)) => Ok(reply),
            Ok(None) => match self.config.upload_missing_reply {
                MissingReplyPolicy::Templated => Ok(files_received_message(&file_names(&files))),
                MissingReplyPolicy::Fallback => Err(DispatchError::MissingReply),
            },
            Err(err) => Err(err),
        };

        match outcome {
            Ok(reply) => {
                log::debug!("upload of {} file(s) acknowledged", files.len());
                self.store.append_assistant_message(reply);
                self.notifier.notify(ToastLevel::Success, UPLOAD_SUCCEEDED_TOAST);
                Ok(())
            }
            Err(err) => {
                log::warn!("upload failed: {err}");
                self.store.append_assistant_fallback(FALLBACK_APOLOGY);
                self.notifier.notify(ToastLevel::Error, UPLOAD_FAILED_TOAST);
                Err(err)
            }
        }
    }

    async fn post_text(&self, text: String) -> Result<String, DispatchError> {
        let payload = TextPayload::new(self.session_id.clone(), text, timestamp_now()?);
        let body = serde_json::to_value(&payload)?;
        log::debug!("posting text message to {}", self.config.webhook_url);
        let resp = self.transport.post_json(&self.config.webhook_url, &body).await?;
        let resp = resp.ensure_success()?;
        extract_reply(&resp.body).ok_or(DispatchError::MissingReply)
    }

    /// `Ok(None)` means a 2xx response without a recognized reply.
    async fn post_files(&self, files: &[Attachment]) -> Result<Option<String>, DispatchError> {
        let form = upload_form(&self.session_id, &timestamp_now()?, files);
        log::debug!("posting {} file(s) to {}", files.len(), self.config.webhook_url);
        let resp = self.transport.post_multipart(&self.config.webhook_url, &form).await?;
        let resp = resp.ensure_success()?;
        Ok(extract_reply(&resp.body))
    }

    fn claim_slot(&self) -> Result<SlotGuard<'_>, DispatchError> {
        if self.config.concurrency == SendConcurrency::SingleSlot && self.in_flight.get() > 0 {
            self.notifier.notify(ToastLevel::Info, BUSY_TOAST);
            return Err(DispatchError::Busy);
        }
        self.in_flight.set(self.in_flight.get() + 1);
        Ok(SlotGuard { in_flight: &self.in_flight })
    }
}

/// Counts a send as in flight until dropped.
struct SlotGuard<'a> {
    in_flight: &'a Cell<usize>,
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.set(self.in_flight.get().saturating_sub(1));
    }
}
