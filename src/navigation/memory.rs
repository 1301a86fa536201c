//! In-memory session history.
//!
//! Behaves like a browser tab: an entry stack with a cursor, `popstate` on
//! traversal, `hashchange` when the fragment changes, and a document load
//! counter for full navigations. Can be put in sandboxed mode, where
//! history pushes are refused.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use dashmap::DashMap;

use crate::navigation::location::RawLocation;
use crate::navigation::source::{
    ChangeSignal, ListenerId, NavigationError, NavigationSource, SignalListener,
};

#[derive(Debug)]
struct Session {
    entries: Vec<RawLocation>,
    cursor: usize,
    scroll_y: u32,
    document_loads: u32,
}

impl Session {
    fn current(&self) -> &RawLocation {
        &self.entries[self.cursor]
    }

    fn push(&mut self, entry: RawLocation) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
    }
}

/// Session history held in memory.
pub struct MemoryHistory {
    session: Mutex<Session>,
    listeners: DashMap<ListenerId, (ChangeSignal, SignalListener)>,
    next_listener: AtomicU64,
    sandboxed: AtomicBool,
}

impl MemoryHistory {
    /// Open a session at `href` (counts as the first document load).
    pub fn new(href: &str) -> Self {
        Self {
            session: Mutex::new(Session {
                entries: vec![RawLocation::parse(href)],
                cursor: 0,
                scroll_y: 0,
                document_loads: 1,
            }),
            listeners: DashMap::new(),
            next_listener: AtomicU64::new(1),
            sandboxed: AtomicBool::new(false),
        }
    }

    /// Refuse (or allow again) history pushes, as embedded frames may.
    pub fn set_sandboxed(&self, sandboxed: bool) {
        self.sandboxed.store(sandboxed, Ordering::SeqCst);
    }

    /// Traverse one entry back. Returns false at the start of the session.
    pub fn back(&self) -> bool {
        self.traverse(-1)
    }

    /// Traverse one entry forward. Returns false at the end of the session.
    pub fn forward(&self) -> bool {
        self.traverse(1)
    }

    /// Simulate the user scrolling down the page.
    pub fn scroll_to(&self, y: u32) {
        self.lock().scroll_y = y;
    }

    pub fn scroll_y(&self) -> u32 {
        self.lock().scroll_y
    }

    /// Number of full document loads, including the initial one.
    pub fn document_loads(&self) -> u32 {
        self.lock().document_loads
    }

    /// Number of session history entries.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Current href, e.g. `/tag/lighting?page=2`.
    pub fn href(&self) -> String {
        self.lock().current().to_href()
    }

    fn traverse(&self, delta: isize) -> bool {
        let hash_changed = {
            let mut session = self.lock();
            let target = session.cursor as isize + delta;
            if target < 0 || target as usize >= session.entries.len() {
                return false;
            }
            let before = session.current().hash.clone();
            session.cursor = target as usize;
            before != session.current().hash
        };

        self.emit(ChangeSignal::PopState);
        if hash_changed {
            self.emit(ChangeSignal::HashChange);
        }
        true
    }

    fn emit(&self, signal: ChangeSignal) {
        // Collect first so listeners may (un)register without deadlocking the map.
        let targets: Vec<SignalListener> = self
            .listeners
            .iter()
            .filter(|entry| entry.value().0 == signal)
            .map(|entry| entry.value().1.clone())
            .collect();

        tracing::trace!(?signal, listeners = targets.len(), "Emitting navigation signal");
        for listener in targets {
            listener(signal);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Session> {
        self.session.lock().expect("session history mutex poisoned")
    }
}

impl std::fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.lock();
        f.debug_struct("MemoryHistory")
            .field("href", &session.current().to_href())
            .field("entries", &session.entries.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl NavigationSource for MemoryHistory {
    fn raw_location(&self) -> Option<RawLocation> {
        Some(self.lock().current().clone())
    }

    fn push_path(&self, path: &str) -> Result<(), NavigationError> {
        if self.sandboxed.load(Ordering::SeqCst) {
            return Err(NavigationError::Refused(
                "pushState is not allowed in this context".to_string(),
            ));
        }
        let mut session = self.lock();
        let entry = RawLocation::resolve(session.current(), path);
        session.push(entry);
        Ok(())
    }

    fn set_hash(&self, fragment: &str) -> Result<(), NavigationError> {
        let changed = {
            let mut session = self.lock();
            let mut entry = session.current().clone();
            let hash = format!("#{}", fragment);
            if entry.hash == hash {
                false
            } else {
                entry.hash = hash;
                session.push(entry);
                true
            }
        };

        if changed {
            self.emit(ChangeSignal::HashChange);
        }
        Ok(())
    }

    fn hard_navigate(&self, href: &str) {
        let mut session = self.lock();
        let entry = RawLocation::resolve(session.current(), href);
        session.push(entry);
        session.scroll_y = 0;
        session.document_loads += 1;
        tracing::info!(href = %href, "Full document navigation");
    }

    fn scroll_to_top(&self) {
        self.lock().scroll_y = 0;
    }

    fn listen(&self, signal: ChangeSignal, listener: SignalListener) -> ListenerId {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.listeners.insert(id, (signal, listener));
        id
    }

    fn unlisten(&self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}
