use crate::config::DOCUMENT_KEY;
use crate::errors::Result;
use crate::models::{Document, Record};
use crate::normalize::normalize;
use crate::storage::KeyValueStore;
use serde_json::Value;
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// Stored state may differ from what was last read.
    Changed,
    /// Journal data was erased.
    Erased,
}

type Handler = Rc<RefCell<dyn FnMut(StoreEvent)>>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Detaches its handler when dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .handlers
                .retain(|(id, _)| *id != self.id);
        }
    }
}

pub struct Gateway<S> {
    store: S,
    listeners: Rc<RefCell<Listeners>>,
    seen_revision: Option<u64>,
}

impl<S: KeyValueStore> Gateway<S> {
    pub fn new(store: S) -> Self {
        let seen_revision = store.revision().unwrap_or_else(|err| {
            warn!("store revision unavailable: {err}");
            None
        });
        Self {
            store,
            listeners: Rc::new(RefCell::new(Listeners::default())),
            seen_revision,
        }
    }

    /// Raw persisted document, `None` when nothing is stored. A stored value
    /// that is not JSON is logged and reported as absent.
    pub fn load(&self) -> Result<Option<Value>> {
        let Some(raw) = self.store.get(DOCUMENT_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!("stored journal is not valid json: {err}");
                Ok(None)
            }
        }
    }

    pub fn load_document(&self) -> Result<Option<Document>> {
        Ok(self.load()?.map(|raw| Document::from_value(&raw)))
    }

    /// Normalized records; any failure reads as an empty journal.
    pub fn load_records(&self) -> Vec<Record> {
        match self.load() {
            Ok(raw) => normalize(raw.as_ref()),
            Err(err) => {
                error!("failed to load journal: {err}");
                Vec::new()
            }
        }
    }

    /// Overwrites the stored document.
    pub fn save(&mut self, document: &Document) -> Result<()> {
        let payload = serde_json::to_string(document)?;
        self.store.set(DOCUMENT_KEY, payload)?;
        debug!(records = document.color_data.len(), "journal saved");
        self.mark_seen();
        self.emit(StoreEvent::Changed);
        Ok(())
    }

    /// Removes every key `matcher` accepts and returns how many went.
    /// Stops at the first failed removal; if keys were already removed by
    /// then, subscribers still hear [`StoreEvent::Erased`] before the error
    /// is returned.
    pub fn erase<F>(&mut self, matcher: F) -> Result<usize>
    where
        F: Fn(&str) -> bool,
    {
        let doomed: Vec<String> = self
            .store
            .keys()?
            .into_iter()
            .filter(|key| matcher(key.as_str()))
            .collect();

        let mut removed = 0;
        let mut failure = None;
        for key in &doomed {
            match self.store.remove(key) {
                Ok(()) => removed += 1,
                Err(err) => {
                    error!("failed to erase {key}: {err}");
                    failure = Some(err);
                    break;
                }
            }
        }

        if failure.is_none() || removed > 0 {
            debug!(removed, "journal data erased");
            self.mark_seen();
            self.emit(StoreEvent::Erased);
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(removed),
        }
    }

    /// Erases the document and any color-related keys, leaving the display
    /// name in place.
    pub fn erase_all_data(&mut self) -> Result<usize> {
        self.erase(is_journal_key)
    }

    pub fn read_key(&self, key: &str) -> Result<Option<String>> {
        self.store.get(key)
    }

    pub fn write_key(&mut self, key: &str, value: String) -> Result<()> {
        self.store.set(key, value)?;
        self.mark_seen();
        self.emit(StoreEvent::Changed);
        Ok(())
    }

    pub fn remove_key(&mut self, key: &str) -> Result<()> {
        self.store.remove(key)?;
        self.mark_seen();
        self.emit(StoreEvent::Changed);
        Ok(())
    }

    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(StoreEvent) + 'static,
    {
        let handler: Handler = Rc::new(RefCell::new(handler));
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.handlers.push((id, handler));

        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Checks whether someone else changed the store since this gateway last
    /// touched it, and emits [`StoreEvent::Changed`] if so.
    pub fn poll_external_change(&mut self) -> Result<bool> {
        let current = self.store.revision()?;
        if current == self.seen_revision {
            return Ok(false);
        }
        debug!("store changed out of band");
        self.seen_revision = current;
        self.emit(StoreEvent::Changed);
        Ok(true)
    }

    fn mark_seen(&mut self) {
        match self.store.revision() {
            Ok(revision) => self.seen_revision = revision,
            Err(err) => warn!("store revision unavailable: {err}"),
        }
    }

    fn emit(&self, event: StoreEvent) {
        // Snapshot first so handlers may subscribe or unsubscribe.
        let handlers: Vec<Handler> = self
            .listeners
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        for handler in handlers {
            match handler.try_borrow_mut() {
                Ok(mut handler) => (&mut *handler)(event),
                Err(_) => debug!(?event, "skipping re-entrant delivery"),
            }
        }
    }
}

pub fn is_journal_key(key: &str) -> bool {
    key == DOCUMENT_KEY || key.to_ascii_lowercase().contains("color")
}
