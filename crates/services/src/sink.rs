//! Render sink: the seam between the practice loop and whatever draws it.

use std::sync::Mutex;

use drill_core::model::Achievement;

use crate::sessions::{Feedback, SessionReport, SessionSnapshot};

/// Everything the practice loop asks a front end to show.
#[derive(Debug, Clone, PartialEq)]
pub enum PracticeEvent {
    ProblemPresented {
        prompt: String,
        /// Multiple-choice options for trigonometry.
        options: Option<Vec<String>>,
        snapshot: SessionSnapshot,
    },
    Feedback(Feedback),
    Stats(SessionSnapshot),
    TimerTick {
        remaining_secs: u32,
        display: String,
    },
    AchievementUnlocked(&'static Achievement),
    SessionCompleted(SessionReport),
}

pub trait PracticeSink: Send + Sync {
    fn emit(&self, event: PracticeEvent);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PracticeSink for NullSink {
    fn emit(&self, _event: PracticeEvent) {}
}

/// Sink that keeps every event, for tests and replays.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<PracticeEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events seen so far.
    #[must_use]
    pub fn events(&self) -> Vec<PracticeEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Remove and return the events seen so far.
    pub fn drain(&self) -> Vec<PracticeEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }
}

impl PracticeSink for RecordingSink {
    fn emit(&self, event: PracticeEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
