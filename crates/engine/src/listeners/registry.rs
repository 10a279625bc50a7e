//! Listener registry
//!
//! Maps each [`ListenerIdentifier`] to its [`HookListener`]. The orchestrator
//! looks listeners up here when a worklist step names one; a step with no
//! registered listener is skipped.

use std::collections::HashMap;

use hollow_domain::ListenerIdentifier;

use super::{builtin, HookListener};

#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    listeners: HashMap<ListenerIdentifier, HookListener>,
}

impl ListenerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every listener the engine ships with.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for listener in builtin() {
            registry.register(listener);
        }
        registry
    }

    /// Register `listener`, replacing any listener with the same id.
    pub fn register(&mut self, listener: HookListener) -> Option<HookListener> {
        self.listeners.insert(listener.id, listener)
    }

    pub fn get(&self, id: &ListenerIdentifier) -> Option<&HookListener> {
        self.listeners.get(id)
    }

    pub fn contains(&self, id: &ListenerIdentifier) -> bool {
        self.listeners.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
