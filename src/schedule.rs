//! Deferred render-complete callbacks.
//!
//! Form construction is synchronous, but the render-complete callback fires
//! one scheduling tick later, on a fresh turn of the host's event loop. The
//! [`RenderQueue`] models that tick: forms enqueue their callback during
//! construction, and the host drains the queue after the synchronous pass.
//! A scheduled callback always fires on the next drain; there is no
//! cancellation path.

use std::cell::RefCell;
use std::collections::VecDeque;

type Deferred = Box<dyn FnOnce()>;

/// Single-threaded FIFO of deferred callbacks.
#[derive(Default)]
pub struct RenderQueue {
    pending: RefCell<VecDeque<Deferred>>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a callback for the next drain.
    pub fn defer(&self, callback: impl FnOnce() + 'static) {
        self.pending.borrow_mut().push_back(Box::new(callback));
    }

    /// Run every callback scheduled so far, in order. Returns how many ran.
    ///
    /// Callbacks scheduled *during* a drain run on the following drain, so
    /// each render's callback stays on its own tick.
    pub fn run_pending(&self) -> usize {
        let batch: Vec<Deferred> = self.pending.borrow_mut().drain(..).collect();
        let count = batch.len();
        for callback in batch {
            callback();
        }
        count
    }

    /// Number of callbacks waiting for the next drain.
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl std::fmt::Debug for RenderQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderQueue")
            .field("pending", &self.pending_count())
            .finish()
    }
}
