//! # Preview State
//!
//! Owns the resource behind the document preview (an object URL in a
//! browser host, a temp handle elsewhere).
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  preview #1 ──► replace() ──► slot holds Guard(#1)                      │
//! │                                                                         │
//! │  preview #2 ──► replace() ──► Guard(#1) dropped → release(#1)           │
//! │                               slot holds Guard(#2)                      │
//! │                                                                         │
//! │  close / logout / drop ─────► Guard(#2) dropped → release(#2)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Release happens in `Drop`, so every exit path frees the resource
//! exactly once.

use std::sync::{Arc, Mutex};

use tracing::debug;

/// Frees a preview resource. Injected by the host.
pub trait ResourceReleaser: Send + Sync {
    fn release(&self, handle: &str);
}

/// Releaser for hosts whose previews need no cleanup (data URIs).
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReleaser;

impl ResourceReleaser for TracingReleaser {
    fn release(&self, handle: &str) {
        debug!(handle_len = handle.len(), "preview released");
    }
}

/// Owns one preview handle and releases it when dropped.
pub struct PreviewGuard {
    handle: String,
    releaser: Arc<dyn ResourceReleaser>,
}

impl PreviewGuard {
    pub fn new(handle: impl Into<String>, releaser: Arc<dyn ResourceReleaser>) -> Self {
        PreviewGuard {
            handle: handle.into(),
            releaser,
        }
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }
}

impl Drop for PreviewGuard {
    fn drop(&mut self) {
        self.releaser.release(&self.handle);
    }
}

impl std::fmt::Debug for PreviewGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewGuard")
            .field("handle_len", &self.handle.len())
            .finish()
    }
}

/// The single open preview of a session, if any.
pub struct PreviewSlot {
    releaser: Arc<dyn ResourceReleaser>,
    current: Mutex<Option<PreviewGuard>>,
}

impl PreviewSlot {
    pub fn new(releaser: Arc<dyn ResourceReleaser>) -> Self {
        PreviewSlot {
            releaser,
            current: Mutex::new(None),
        }
    }

    /// Opens `handle` as the current preview, releasing the previous one.
    pub fn replace(&self, handle: impl Into<String>) {
        let guard = PreviewGuard::new(handle, Arc::clone(&self.releaser));
        let previous = self
            .current
            .lock()
            .expect("Preview mutex poisoned")
            .replace(guard);
        // Released outside the lock
        drop(previous);
    }

    /// Closes the current preview. Returns whether one was open.
    pub fn clear(&self) -> bool {
        let previous = self.current.lock().expect("Preview mutex poisoned").take();
        previous.is_some()
    }

    pub fn current_handle(&self) -> Option<String> {
        self.current
            .lock()
            .expect("Preview mutex poisoned")
            .as_ref()
            .map(|g| g.handle().to_string())
    }

    pub fn is_open(&self) -> bool {
        self.current.lock().expect("Preview mutex poisoned").is_some()
    }
}

impl Default for PreviewSlot {
    fn default() -> Self {
        PreviewSlot::new(Arc::new(TracingReleaser))
    }
}

impl std::fmt::Debug for PreviewSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewSlot")
            .field("open", &self.is_open())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records released handles.
    #[derive(Default)]
    pub(crate) struct RecordingReleaser {
        pub(crate) released: Mutex<Vec<String>>,
    }

    impl ResourceReleaser for RecordingReleaser {
        fn release(&self, handle: &str) {
            self.released.lock().unwrap().push(handle.to_string());
        }
    }

    #[test]
    fn test_replace_releases_previous() {
        let releaser = Arc::new(RecordingReleaser::default());
        let slot = PreviewSlot::new(releaser.clone());

        slot.replace("blob:1");
        assert!(releaser.released.lock().unwrap().is_empty());

        slot.replace("blob:2");
        assert_eq!(*releaser.released.lock().unwrap(), vec!["blob:1"]);
        assert_eq!(slot.current_handle().as_deref(), Some("blob:2"));
    }

    #[test]
    fn test_clear_releases_once() {
        let releaser = Arc::new(RecordingReleaser::default());
        let slot = PreviewSlot::new(releaser.clone());

        slot.replace("blob:1");
        assert!(slot.clear());
        assert!(!slot.clear());
        assert_eq!(*releaser.released.lock().unwrap(), vec!["blob:1"]);
    }

    #[test]
    fn test_drop_releases_open_preview() {
        let releaser = Arc::new(RecordingReleaser::default());
        {
            let slot = PreviewSlot::new(releaser.clone());
            slot.replace("blob:9");
        }
        assert_eq!(*releaser.released.lock().unwrap(), vec!["blob:9"]);
    }
}
