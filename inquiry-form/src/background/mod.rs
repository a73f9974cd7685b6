pub mod live;

use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;

/// Background work the form can have in flight, at most one of each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Submit,
    RedirectTimer,
}

/// Owns spawned tasks so a replacement or shutdown aborts the old one
#[derive(Default)]
pub struct BackgroundTaskManager {
    tasks: HashMap<TaskKind, JoinHandle<()>>,
}

impl BackgroundTaskManager {
    pub fn spawn<F>(&mut self, kind: TaskKind, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Finished handles are replaced too; aborting them is a no-op
        if let Some(previous) = self.tasks.insert(kind, tokio::spawn(future)) {
            previous.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        self.tasks.drain().for_each(|(_, handle)| handle.abort());
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
