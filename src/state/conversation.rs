//! Conversation store: the single source of truth for rendered messages.
//!
//! DESIGN
//! ======
//! The store is a cheap-clone handle over shared single-threaded state. It is
//! built once at app start and handed to both the dispatcher (writer) and the
//! app shell (reader, via [`ConversationStore::subscribe`]). Listeners run
//! synchronously after each append, outside the internal borrow, so they may
//! read the store again.
//!
//! Messages are append-only. There is no edit, delete, or reorder.

#[cfg(test)]
#[path = "conversation_test.rs"]
mod conversation_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Whether an assistant message came from the endpoint or the error path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageKind {
    #[default]
    Reply,
    Fallback,
}

/// A single chat bubble. Immutable once appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub is_user: bool,
    pub text: String,
    pub kind: MessageKind,
}

/// Snapshot of everything the chat view renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    /// Set by the last user append, cleared by the last assistant append.
    /// Drives the typing placeholder.
    pub pending: bool,
}

type Listener = Rc<dyn Fn(&ConversationState)>;

#[derive(Default)]
struct Inner {
    state: ConversationState,
    next_message_id: u64,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

#[derive(Clone, Default)]
pub struct ConversationStore {
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for ConversationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ConversationStore")
            .field("state", &inner.state)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl ConversationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the current state.
    #[must_use]
    pub fn get_state(&self) -> ConversationState {
        self.inner.borrow().state.clone()
    }

    /// Register `listener` to run after every mutation.
    ///
    /// The listener stays attached until [`Subscription::unsubscribe`] is
    /// called; dropping the handle does not detach it.
    pub fn subscribe(&self, listener: impl Fn(&ConversationState) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        Subscription { id, store: Rc::downgrade(&self.inner) }
    }

    /// Append a user message and mark a reply as pending.
    pub fn append_user_message(&self, text: impl Into<String>) {
        self.append(true, text.into(), MessageKind::Reply);
    }

    /// Append an assistant reply and clear the pending flag.
    pub fn append_assistant_message(&self, text: impl Into<String>) {
        self.append(false, text.into(), MessageKind::Reply);
    }

    /// Append the error-path stand-in for a reply and clear the pending flag.
    pub fn append_assistant_fallback(&self, text: impl Into<String>) {
        self.append(false, text.into(), MessageKind::Fallback);
    }

    fn append(&self, is_user: bool, text: String, kind: MessageKind) {
        let (snapshot, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_message_id;
            inner.next_message_id += 1;
            inner.state.messages.push(Message { id, is_user, text, kind });
            inner.state.pending = is_user;
            let listeners: Vec<Listener> = inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
            (inner.state.clone(), listeners)
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

/// Handle returned by [`ConversationStore::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    store: Weak<RefCell<Inner>>,
}

impl Subscription {
    /// Detach the listener. A no-op once the store itself is gone.
    pub fn unsubscribe(self) {
        if let Some(inner) = self.store.upgrade() {
            inner.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
