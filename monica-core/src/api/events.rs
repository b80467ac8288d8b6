//! Event System
//!
//! Callbacks for client events.

use std::sync::Arc;

use super::auth::AuthState;

/// Events emitted by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Login, logout, or a startup check changed the session.
    AuthStateChanged {
        /// The new state.
        state: AuthState,
    },

    /// A sync started.
    SyncStarted,

    /// A full sync finished and its batch was committed.
    SyncCompleted {
        /// Records written to the cache.
        committed: usize,
        /// Records that could not be cached.
        skipped: usize,
        /// True if the fetch stopped early.
        cancelled: bool,
    },

    /// A sync failed.
    SyncFailed {
        /// Error description.
        error: String,
    },

    /// A single contact was written to the cache.
    ContactUpserted {
        /// The contact ID.
        contact_id: i64,
    },

    /// A contact was removed from the cache.
    ContactRemoved {
        /// The contact ID.
        contact_id: i64,
    },

    /// The cache was emptied.
    CacheCleared {
        /// Number of records removed.
        removed: usize,
    },
}

/// Event handler trait.
///
/// Implement this trait to receive client events.
pub trait EventHandler: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: ClientEvent);
}

/// Simple callback-based event handler.
///
/// Wraps a closure for easy event handling.
pub struct CallbackHandler<F>
where
    F: Fn(ClientEvent) + Send + Sync,
{
    callback: F,
}

impl<F> CallbackHandler<F>
where
    F: Fn(ClientEvent) + Send + Sync,
{
    /// Creates a new callback handler.
    pub fn new(callback: F) -> Self {
        CallbackHandler { callback }
    }
}

impl<F> EventHandler for CallbackHandler<F>
where
    F: Fn(ClientEvent) + Send + Sync,
{
    fn on_event(&self, event: ClientEvent) {
        (self.callback)(event);
    }
}

/// Event dispatcher for managing multiple handlers.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    /// Creates a new event dispatcher.
    pub fn new() -> Self {
        EventDispatcher {
            handlers: Vec::new(),
        }
    }

    /// Adds an event handler.
    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Removes all handlers.
    pub fn clear_handlers(&mut self) {
        self.handlers.clear();
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatches an event to all handlers.
    pub fn dispatch(&self, event: ClientEvent) {
        for handler in &self.handlers {
            handler.on_event(event.clone());
        }
    }
}
