use std::time::Duration;
use tokio::sync::mpsc;

use super::{BackgroundTaskManager, TaskKind};
use crate::advisory::SubmittedFlag;
use crate::app_core::SubmissionHandler;
use crate::client::{submission_event, SubmitClient};
use crate::events::{Inquiry, SubmissionEvent};

/// Production handler: real HTTP, flag file and system browser
pub struct LiveHandler {
    client: SubmitClient,
    flag: SubmittedFlag,
    events_tx: mpsc::UnboundedSender<SubmissionEvent>,
    task_manager: BackgroundTaskManager,
}

impl LiveHandler {
    pub fn new(
        client: SubmitClient,
        flag: SubmittedFlag,
        events_tx: mpsc::UnboundedSender<SubmissionEvent>,
    ) -> Self {
        Self {
            client,
            flag,
            events_tx,
            task_manager: BackgroundTaskManager::default(),
        }
    }
}

impl SubmissionHandler for LiveHandler {
    fn submit(&mut self, inquiry: Inquiry) {
        tracing::info!("Submitting inquiry");
        let client = self.client.clone();
        let events_tx = self.events_tx.clone();

        self.task_manager.spawn(TaskKind::Submit, async move {
            let event = submission_event(client.submit(&inquiry).await);
            let _ = events_tx.send(event);
        });
    }

    fn mark_submitted(&mut self) {
        if let Err(e) = self.flag.set() {
            // Only costs a repeat prompt next time
            tracing::warn!(
                path = %self.flag.path().display(),
                error = %e,
                "Failed to persist submitted flag"
            );
        }
    }

    fn schedule_close(&mut self, delay: Duration) {
        let events_tx = self.events_tx.clone();

        self.task_manager.spawn(TaskKind::RedirectTimer, async move {
            tokio::time::sleep(delay).await;
            let _ = events_tx.send(SubmissionEvent::CloseDue);
        });
    }

    fn navigate(&mut self, destination: &str) {
        tracing::info!(%destination, "Opening destination");
        if let Err(e) = open::that(destination) {
            tracing::warn!(error = %e, "Failed to open browser automatically");
        }
    }
}
