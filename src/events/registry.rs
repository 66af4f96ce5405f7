use super::{Discovery, ParserListener};
use std::sync::{Arc, PoisonError, RwLock};

/// Shared, ordered set of [`ParserListener`]s
///
/// Cloning the registry clones the handle: all clones see the same listeners.
/// Notification copies the listener list under the read lock and calls the
/// listeners after releasing it, so parse calls running on different workers
/// notify concurrently and listeners may change the registry.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    listeners: Arc<RwLock<Vec<Arc<dyn ParserListener>>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener; it is notified after all earlier ones
    pub fn add(&self, listener: Arc<dyn ParserListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Unregisters a listener previously passed to [`add`](Self::add)
    ///
    /// Returns true if it was registered.
    pub fn remove(&self, listener: &Arc<dyn ParserListener>) -> bool {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|registered| !Arc::ptr_eq(registered, listener));
        listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Notifies every registered listener, in registration order
    ///
    /// Listeners run outside the lock, so a listener may add or remove
    /// listeners; such changes apply from the next notification on.
    pub fn notify(&self, discovery: &Discovery) {
        let listeners: Vec<Arc<dyn ParserListener>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in &listeners {
            listener.url_found(discovery);
        }
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}
