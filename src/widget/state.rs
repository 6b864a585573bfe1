use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::{ClassificationResult, EmailDraft, FolderStore};

use super::input::{Edit, TextField};

pub const EMPTY_SUBJECT_ERROR: &str = "Please enter an email subject";

/// Identity of one classification cycle.
pub type AttemptId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Subject,
    Body,
    Button,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Subject => Focus::Body,
            Focus::Body => Focus::Button,
            Focus::Button => Focus::Subject,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Subject => Focus::Button,
            Focus::Body => Focus::Subject,
            Focus::Button => Focus::Body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Waiting on the model; `draft` is what was submitted.
    Requesting { attempt: AttemptId, draft: EmailDraft },
    /// Result on screen until the clear timer for `attempt` fires.
    Displaying { attempt: AttemptId },
}

/// Inputs to the widget state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Edit(Edit),
    FocusNext,
    FocusPrev,
    Trigger,
    Classified {
        attempt: AttemptId,
        at: DateTime<Utc>,
        outcome: Result<ClassificationResult, String>,
    },
    ClearElapsed {
        attempt: AttemptId,
    },
    Dispose,
}

/// Side effects requested by a transition; executed by the task runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Classify {
        attempt: AttemptId,
        draft: EmailDraft,
    },
    ScheduleClear {
        attempt: AttemptId,
        after: Duration,
    },
    CancelClear,
    CancelAll,
}

/// Everything the classifier widget shows, owned by one widget instance.
#[derive(Debug, Clone)]
pub struct ClassifierState {
    subject: TextField,
    body: TextField,
    focus: Focus,
    phase: Phase,
    error: Option<String>,
    result: Option<ClassificationResult>,
    store: FolderStore,
    clear_delay: Duration,
    last_attempt: AttemptId,
    disposed: bool,
}

impl ClassifierState {
    pub fn new(clear_delay: Duration) -> Self {
        Self {
            subject: TextField::single_line(),
            body: TextField::multi_line(),
            focus: Focus::default(),
            phase: Phase::default(),
            error: None,
            result: None,
            store: FolderStore::new(),
            clear_delay,
            last_attempt: 0,
            disposed: false,
        }
    }

    pub fn subject(&self) -> &TextField {
        &self.subject
    }

    pub fn body(&self) -> &TextField {
        &self.body
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        self.result.as_ref()
    }

    pub fn store(&self) -> &FolderStore {
        &self.store
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Requesting { .. })
    }

    /// Whether the classify button is enabled.
    pub fn can_trigger(&self) -> bool {
        !self.disposed && !self.is_busy() && !self.subject.is_blank()
    }

    /// Applies one event and returns the side effects it requires.
    pub fn update(&mut self, event: Event) -> Vec<Command> {
        if self.disposed {
            tracing::debug!(target: "widget", ?event, "event after dispose ignored");
            return Vec::new();
        }

        match event {
            Event::Edit(edit) => {
                self.edit(edit);
                Vec::new()
            }
            Event::FocusNext => {
                self.focus = self.focus.next();
                Vec::new()
            }
            Event::FocusPrev => {
                self.focus = self.focus.prev();
                Vec::new()
            }
            Event::Trigger => self.trigger(),
            Event::Classified {
                attempt,
                at,
                outcome,
            } => self.complete(attempt, at, outcome),
            Event::ClearElapsed { attempt } => {
                self.clear_display(attempt);
                Vec::new()
            }
            Event::Dispose => {
                self.disposed = true;
                self.phase = Phase::Idle;
                vec![Command::CancelAll]
            }
        }
    }

    fn edit(&mut self, edit: Edit) {
        if self.is_busy() {
            return;
        }
        match self.focus {
            Focus::Subject => self.subject.apply(edit),
            Focus::Body => self.body.apply(edit),
            Focus::Button => {}
        }
    }

    fn trigger(&mut self) -> Vec<Command> {
        if self.is_busy() {
            tracing::debug!(target: "widget", "trigger rejected while a request is in flight");
            return Vec::new();
        }
        if self.subject.is_blank() {
            self.error = Some(EMPTY_SUBJECT_ERROR.to_string());
            return Vec::new();
        }

        let mut commands = Vec::with_capacity(2);
        if matches!(self.phase, Phase::Displaying { .. }) {
            commands.push(Command::CancelClear);
        }

        self.last_attempt += 1;
        let attempt = self.last_attempt;
        let draft = EmailDraft::new(self.subject.text(), self.body.text());
        self.error = None;
        self.result = None;
        self.phase = Phase::Requesting {
            attempt,
            draft: draft.clone(),
        };
        tracing::info!(target: "widget", attempt, "classification requested");

        commands.push(Command::Classify { attempt, draft });
        commands
    }

    fn complete(
        &mut self,
        attempt: AttemptId,
        at: DateTime<Utc>,
        outcome: Result<ClassificationResult, String>,
    ) -> Vec<Command> {
        let draft = match &self.phase {
            Phase::Requesting {
                attempt: current,
                draft,
            } if *current == attempt => draft.clone(),
            _ => {
                tracing::debug!(target: "widget", attempt, "stale classification dropped");
                return Vec::new();
            }
        };

        match outcome {
            Ok(result) => {
                let record = self.store.file(result.folder, &draft, &result.reason, at).id;
                tracing::info!(
                    target: "widget",
                    attempt,
                    folder = %result.folder,
                    record,
                    folder_size = self.store.count(result.folder),
                    "email filed"
                );
                self.result = Some(result);
                self.phase = Phase::Displaying { attempt };
                vec![Command::ScheduleClear {
                    attempt,
                    after: self.clear_delay,
                }]
            }
            Err(message) => {
                tracing::warn!(target: "widget", attempt, error = %message, "classification failed");
                self.error = Some(message);
                self.phase = Phase::Idle;
                Vec::new()
            }
        }
    }

    fn clear_display(&mut self, attempt: AttemptId) {
        if self.phase != (Phase::Displaying { attempt }) {
            tracing::debug!(target: "widget", attempt, "stale clear timer ignored");
            return;
        }
        self.subject.clear();
        self.body.clear();
        self.result = None;
        self.focus = Focus::Subject;
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
impl ClassifierState {
    pub fn phase(&self) -> &Phase {
        &self.phase
    }
}
