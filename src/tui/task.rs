//! One-shot background tasks
//!
//! Each async operation (add or delete) is a single unit of work on its own
//! thread, yielding exactly one completion message through a channel. There
//! is no cancellation: once dispatched, a task runs to completion and the
//! session only reacts to its eventual message. A minimum visible duration
//! keeps the spinner from flashing faster than perceptible.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Floor on how long a task appears to run.
pub const MIN_VISIBLE: Duration = Duration::from_millis(350);

/// Handle to one in-flight background task. Consumed when the completion
/// message arrives; the state machine holds at most one at a time.
pub struct TaskHandle<T> {
    rx: Receiver<T>,
}

impl<T> TaskHandle<T> {
    /// The completion message, once available. Returns `None` while the
    /// task is still running (a dropped-sender panic is not possible: the
    /// spawned thread always sends exactly one message before exiting).
    pub fn try_take(&self) -> Option<T> {
        match self.rx.try_recv() {
            Ok(value) => Some(value),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Run `work` on a background thread, padding its wall time to at least
/// `min_visible` before the completion message is posted.
pub fn spawn<T, F>(min_visible: Duration, work: F) -> TaskHandle<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let started = Instant::now();
        let result = work();

        let elapsed = started.elapsed();
        if elapsed < min_visible {
            thread::sleep(min_visible - elapsed);
        }

        // Receiver may already be gone if the session quit; nothing to do.
        let _ = tx.send(result);
    });

    TaskHandle { rx }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_arrives_once() {
        let handle = spawn(Duration::ZERO, || 42);

        let mut result = None;
        for _ in 0..100 {
            if let Some(v) = handle.try_take() {
                result = Some(v);
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(result, Some(42));
        assert_eq!(handle.try_take(), None);
    }

    #[test]
    fn test_minimum_visible_duration_enforced() {
        let floor = Duration::from_millis(60);
        let started = Instant::now();
        let handle = spawn(floor, || ());

        loop {
            if handle.try_take().is_some() {
                break;
            }
            thread::sleep(Duration::from_millis(5));
            assert!(started.elapsed() < Duration::from_secs(5), "task never completed");
        }
        assert!(started.elapsed() >= floor);
    }
}
