//! Asynchronous preview controller
//!
//! Each render runs on its own thread and reports back over a channel. The
//! owner drains the channel on its event loop; a result is shown only if no
//! newer request was issued in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::picker::Picker;
use crate::scope::Scope;

pub const LOADING_TEXT: &str = "Loading preview...";
pub const NOTHING_FOCUSED_TEXT: &str = "[No row selected]";

/// A finished render on its way back to the main loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewResult {
    pub request_id: u64,
    /// Original row index the render was issued for
    pub original: usize,
    /// Raw preview input, the cache key
    pub key: String,
    pub text: String,
}

#[derive(Debug)]
pub struct PreviewController {
    visible: bool,
    content: String,
    scroll: usize,
    last_rendered: Option<usize>,
    /// Row the newest request was issued for, `None` once invalidated
    requested: Option<usize>,
    counter: Arc<AtomicU64>,
    tx: Sender<PreviewResult>,
    rx: Receiver<PreviewResult>,
}

impl Default for PreviewController {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewController {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            visible: false,
            content: String::new(),
            scroll: 0,
            last_rendered: None,
            requested: None,
            counter: Arc::new(AtomicU64::new(0)),
            tx,
            rx,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hiding the pane supersedes any render still in flight
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible && !visible {
            self.supersede();
            self.requested = None;
        }
        self.visible = visible;
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn last_rendered(&self) -> Option<usize> {
        self.last_rendered
    }

    /// Most recently issued request id
    pub fn current_request(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    /// Forget what was rendered so the next `update_if_needed` renders again
    pub fn invalidate(&mut self) {
        self.last_rendered = None;
        self.requested = None;
    }

    /// Make every outstanding request stale
    fn supersede(&mut self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let max = self.content.lines().count().saturating_sub(1);
        self.scroll = self.scroll.saturating_add(lines).min(max);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Issue a render for the focused row. No-op while hidden.
    ///
    /// Cache hits are applied immediately; misses render on a new thread
    /// and come back through [`PreviewController::poll`].
    pub fn update(&mut self, picker: &Picker, scope: &mut Scope) {
        if !self.visible {
            return;
        }

        self.content = LOADING_TEXT.to_string();
        self.scroll = 0;

        let Some(original) = picker.focused() else {
            self.content = NOTHING_FOCUSED_TEXT.to_string();
            self.last_rendered = None;
            self.requested = None;
            self.supersede();
            return;
        };
        self.requested = Some(original);

        let key = picker.rows().joined_row(original, " ");
        let request_id = self.counter.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(text) = scope.cached(&key) {
            self.apply(PreviewResult {
                request_id,
                original,
                key,
                text,
            });
            return;
        }

        tracing::trace!(request_id, original, "Spawning preview render");
        let tx = self.tx.clone();
        thread::spawn(move || {
            let text = Scope::render(&key);
            let _ = tx.send(PreviewResult {
                request_id,
                original,
                key,
                text,
            });
        });
    }

    /// `update` only when the focused row differs from the one last
    /// requested, or after `invalidate`
    pub fn update_if_needed(&mut self, picker: &Picker, scope: &mut Scope) {
        let up_to_date = match picker.focused() {
            Some(original) => self.requested == Some(original),
            None => self.content == NOTHING_FOCUSED_TEXT,
        };
        if !up_to_date {
            self.update(picker, scope);
        }
    }

    /// Show `result` if it answers the newest request; stale results are
    /// dropped. Returns whether the visible content changed.
    pub fn apply(&mut self, result: PreviewResult) -> bool {
        let current = self.counter.load(Ordering::SeqCst);
        if result.request_id != current {
            tracing::trace!(
                request_id = result.request_id,
                current,
                "Discarding superseded preview"
            );
            return false;
        }

        self.content = result.text;
        self.scroll = 0;
        self.last_rendered = Some(result.original);
        true
    }

    /// Drain finished renders: cache every one, show the current one
    pub fn poll(&mut self, scope: &mut Scope) -> bool {
        let mut changed = false;
        while let Ok(result) = self.rx.try_recv() {
            changed |= self.receive(result, scope);
        }
        changed
    }

    /// Block up to `timeout` for one finished render and handle it like `poll`
    pub fn wait(&mut self, scope: &mut Scope, timeout: Duration) -> Option<bool> {
        match self.rx.recv_timeout(timeout) {
            Ok(result) => Some(self.receive(result, scope)),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    fn receive(&mut self, result: PreviewResult, scope: &mut Scope) -> bool {
        scope.store(result.key.clone(), result.text.clone());
        self.apply(result)
    }
}
