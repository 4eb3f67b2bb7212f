//! Deferred-task queue standing in for the microtask boundary.
//!
//! Work queued here never runs inside the call that queued it. The host drains the
//! queue with [`MicrotaskQueue::run_until_idle`] once the current unit of synchronous
//! work is done and before the next render or I/O turn.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

pub type Microtask = Box<dyn FnOnce() + Send + 'static>;

#[derive(Clone)]
pub struct MicrotaskQueue {
    sender: Sender<Microtask>,
    receiver: Arc<Mutex<Receiver<Microtask>>>,
}

impl MicrotaskQueue {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
        }
    }

    /// Schedule `task` for the next checkpoint. Tasks run in scheduling order.
    pub fn queue(&self, task: impl FnOnce() + Send + 'static) {
        // The receiver lives as long as any clone of the queue, so send cannot fail.
        if self.sender.send(Box::new(task)).is_err() {
            warn!("microtask queue closed, dropping task");
        }
    }

    /// Run queued tasks until none remain, including tasks queued while draining.
    ///
    /// Returns the number of tasks run. A call made from inside a running task is a
    /// no-op returning 0; the outer drain picks up anything newly queued.
    pub fn run_until_idle(&self) -> usize {
        let Some(receiver) = self.receiver.try_lock() else {
            debug!("reentrant microtask checkpoint ignored");
            return 0;
        };
        let mut count = 0usize;
        while let Ok(task) = receiver.try_recv() {
            task();
            count += 1;
        }
        count
    }
}

impl Default for MicrotaskQueue {
    fn default() -> Self {
        Self::new()
    }
}
