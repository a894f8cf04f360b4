//! Render task: the one execution context allowed to touch the surface.
//!
//! [`spawn`] moves a [`RenderSurface`] into a dedicated tokio task fed by an
//! unbounded channel. Callers on any thread submit through a cheap
//! [`RenderHandle`]; renders run one at a time, in submission order.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::ports::RenderSurface;

/// Cloneable sender side of the render task.
#[derive(Debug, Clone)]
pub struct RenderHandle {
    sender: mpsc::UnboundedSender<bool>,
}

impl RenderHandle {
    /// Schedule a render and return immediately.
    ///
    /// Returns `false` when the render task is gone.
    pub fn submit(&self, on: bool) -> bool {
        self.sender.send(on).is_ok()
    }
}

/// Start the render task on the current tokio runtime.
///
/// The task ends once every [`RenderHandle`] has been dropped.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn spawn<S: RenderSurface>(mut surface: S) -> (RenderHandle, JoinHandle<()>) {
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let task = tokio::spawn(async move {
        while let Some(on) = receiver.recv().await {
            tracing::trace!(on, "rendering");
            surface.render(on);
        }
        tracing::debug!("render task stopped");
    });
    (RenderHandle { sender }, task)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    struct SharedSurface(Arc<Mutex<Vec<bool>>>);

    impl RenderSurface for SharedSurface {
        fn render(&mut self, on: bool) {
            self.0.lock().unwrap().push(on);
        }
    }

    #[tokio::test]
    async fn should_render_in_submission_order() {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let (handle, task) = spawn(SharedSurface(Arc::clone(&frames)));

        assert!(handle.submit(true));
        assert!(handle.submit(false));
        assert!(handle.submit(true));
        drop(handle);
        task.await.unwrap();

        assert_eq!(*frames.lock().unwrap(), vec![true, false, true]);
    }

    #[tokio::test]
    async fn should_accept_submissions_from_other_threads() {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let (handle, task) = spawn(SharedSurface(Arc::clone(&frames)));

        let remote = handle.clone();
        std::thread::spawn(move || remote.submit(true))
            .join()
            .unwrap();
        drop(handle);
        task.await.unwrap();

        assert_eq!(*frames.lock().unwrap(), vec![true]);
    }

    #[tokio::test]
    async fn should_report_closed_task() {
        let (handle, task) = spawn(SharedSurface(Arc::new(Mutex::new(Vec::new()))));
        task.abort();
        let _ = task.await;
        assert!(!handle.submit(true));
    }
}
