use std::sync::Arc;

use chrono::Utc;
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle, time::sleep};

use crate::{
    ai::EmailClassifier,
    widget::{AttemptId, Command, Event},
};

/// Executes widget commands as spawned tasks that report back as events.
///
/// Each task is tagged with the attempt it belongs to; aborting a handle is
/// the only cancellation, and the state machine drops whatever still slips
/// through for a stale attempt.
pub struct CommandRunner<C> {
    classifier: Arc<C>,
    events: UnboundedSender<Event>,
    in_flight: Option<(AttemptId, JoinHandle<()>)>,
    pending_clear: Option<(AttemptId, JoinHandle<()>)>,
}

impl<C: EmailClassifier> CommandRunner<C> {
    pub fn new(classifier: Arc<C>, events: UnboundedSender<Event>) -> Self {
        Self {
            classifier,
            events,
            in_flight: None,
            pending_clear: None,
        }
    }

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Classify { attempt, draft } => {
                let classifier = self.classifier.clone();
                let events = self.events.clone();
                let handle = tokio::spawn(async move {
                    let outcome = classifier.classify(&draft).await.map_err(|err| {
                        tracing::error!(target: "classifier", attempt, error = ?err, "classification error");
                        err.to_string()
                    });
                    let _ = events.send(Event::Classified {
                        attempt,
                        at: Utc::now(),
                        outcome,
                    });
                });
                if let Some((previous, handle)) = self.in_flight.replace((attempt, handle)) {
                    if !handle.is_finished() {
                        tracing::warn!(target: "classifier", previous, "aborting overlapping request");
                        handle.abort();
                    }
                }
            }
            Command::ScheduleClear { attempt, after } => {
                self.cancel_clear();
                let events = self.events.clone();
                let handle = tokio::spawn(async move {
                    sleep(after).await;
                    let _ = events.send(Event::ClearElapsed { attempt });
                });
                self.pending_clear = Some((attempt, handle));
            }
            Command::CancelClear => self.cancel_clear(),
            Command::CancelAll => {
                self.cancel_clear();
                if let Some((attempt, handle)) = self.in_flight.take() {
                    if !handle.is_finished() {
                        tracing::info!(target: "classifier", attempt, "in-flight request cancelled");
                    }
                    handle.abort();
                }
            }
        }
    }

    fn cancel_clear(&mut self) {
        if let Some((attempt, handle)) = self.pending_clear.take() {
            tracing::debug!(target: "widget", attempt, "pending clear cancelled");
            handle.abort();
        }
    }
}

impl<C> Drop for CommandRunner<C> {
    fn drop(&mut self) {
        for (_, handle) in self.in_flight.take().into_iter().chain(self.pending_clear.take()) {
            handle.abort();
        }
    }
}

#[cfg(test)]
impl<C> CommandRunner<C> {
    /// Whether a clear timer is armed.
    fn has_pending_clear(&self) -> bool {
        self.pending_clear
            .as_ref()
            .is_some_and(|(_, handle)| !handle.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;
    use tokio::sync::{mpsc, Notify};

    use super::*;
    use crate::{
        ai::{ClassifyError, MockEmailClassifier},
        domain::{ClassificationResult, FolderId},
        widget::{ClassifierState, Edit},
    };

    fn purchase_order() -> ClassificationResult {
        ClassificationResult {
            folder: FolderId::PurchaseOrders,
            reason: "Contains invoice".to_string(),
        }
    }

    fn state_with_subject(subject: &str, delay: Duration) -> ClassifierState {
        let mut state = ClassifierState::new(delay);
        for ch in subject.chars() {
            state.update(Event::Edit(Edit::Insert(ch)));
        }
        state
    }

    #[tokio::test(start_paused = true)]
    async fn full_cycle_clears_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut mock = MockEmailClassifier::new();
        mock.expect_classify()
            .withf(|draft| draft.subject == "Invoice #123" && draft.body.is_empty())
            .times(1)
            .returning(|_| Box::pin(async { Ok(purchase_order()) }));
        let mut runner = CommandRunner::new(Arc::new(mock), tx);
        let mut state = state_with_subject("Invoice #123", Duration::from_secs(3));

        for command in state.update(Event::Trigger) {
            runner.execute(command);
        }
        let completed = rx.recv().await.unwrap();
        assert!(matches!(completed, Event::Classified { .. }));
        for command in state.update(completed) {
            runner.execute(command);
        }
        assert!(runner.has_pending_clear());
        assert_eq!(state.store().count(FolderId::PurchaseOrders), 1);
        assert_eq!(state.subject().text(), "Invoice #123");

        let cleared = rx.recv().await.unwrap();
        assert!(matches!(cleared, Event::ClearElapsed { .. }));
        state.update(cleared);
        assert_eq!(state.subject().text(), "");
        assert!(state.result().is_none());
    }

    #[tokio::test]
    async fn failure_is_reported_as_message() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut mock = MockEmailClassifier::new();
        mock.expect_classify()
            .times(1)
            .returning(|_| Box::pin(async { Err(ClassifyError::Status(StatusCode::UNAUTHORIZED)) }));
        let mut runner = CommandRunner::new(Arc::new(mock), tx);
        let mut state = state_with_subject("test", Duration::from_secs(3));

        for command in state.update(Event::Trigger) {
            runner.execute(command);
        }
        let completed = rx.recv().await.unwrap();
        assert!(state.update(completed).is_empty());
        assert_eq!(state.error(), Some("API Error: 401"));
        assert_eq!(state.subject().text(), "test");
        assert_eq!(state.store().total(), 0);
    }

    #[tokio::test]
    async fn cancel_all_aborts_in_flight_request() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let gate = Arc::new(Notify::new());
        let mut mock = MockEmailClassifier::new();
        let held = gate.clone();
        mock.expect_classify().returning(move |_| {
            let held = held.clone();
            Box::pin(async move {
                held.notified().await;
                Ok(purchase_order())
            })
        });
        let mut runner = CommandRunner::new(Arc::new(mock), tx);
        let mut state = state_with_subject("hello", Duration::from_secs(3));

        for command in state.update(Event::Trigger) {
            runner.execute(command);
        }
        for command in state.update(Event::Dispose) {
            runner.execute(command);
        }
        gate.notify_waiters();
        drop(runner);

        assert!(rx.recv().await.is_none());
        assert_eq!(state.store().total(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_clear_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut runner = CommandRunner::new(Arc::new(MockEmailClassifier::new()), tx);

        runner.execute(Command::ScheduleClear {
            attempt: 1,
            after: Duration::from_secs(3),
        });
        runner.execute(Command::CancelClear);
        assert!(!runner.has_pending_clear());

        tokio::time::sleep(Duration::from_secs(10)).await;
        drop(runner);
        assert!(rx.recv().await.is_none());
    }
}
