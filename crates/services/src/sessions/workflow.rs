use std::sync::Arc;

use drill_core::achievements::{check_streak_milestone, evaluate};
use drill_core::generator::{Draw, RandDraw};
use drill_core::model::{Achievement, SessionConfigDraft, UserStats};
use tracing::{debug, info};

use super::service::{Advance, AnswerOutcome, SessionService, SessionTick};
use super::timer::format_remaining;
use super::view::SessionReport;
use crate::Clock;
use crate::error::SessionError;
use crate::sink::{PracticeEvent, PracticeSink};
use crate::stats_service::StatsService;

/// Result of answering a single problem in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub outcome: AnswerOutcome,
    /// Streak achievements unlocked by this answer.
    pub unlocked: Vec<&'static Achievement>,
}

/// Runs sessions against lifetime stats: every answer is counted and saved,
/// completed sessions award achievements and land in the history log.
pub struct PracticeLoopService {
    clock: Clock,
    stats_service: StatsService,
    stats: UserStats,
    draw: Box<dyn Draw + Send>,
    sink: Arc<dyn PracticeSink>,
    session_unlocks: Vec<&'static Achievement>,
}

impl PracticeLoopService {
    /// Build the loop around stats loaded from `stats_service`.
    pub async fn load(
        clock: Clock,
        stats_service: StatsService,
        sink: Arc<dyn PracticeSink>,
    ) -> Self {
        let stats = stats_service.load_stats().await;
        debug!(
            total_problems = stats.total_problems(),
            unlocked = stats.achievements_unlocked().len(),
            "loaded user stats"
        );
        Self {
            clock,
            stats_service,
            stats,
            draw: Box::new(RandDraw::from_os()),
            sink,
            session_unlocks: Vec::new(),
        }
    }

    /// Replace the random source used for problems and messages.
    #[must_use]
    pub fn with_draw(mut self, draw: Box<dyn Draw + Send>) -> Self {
        self.draw = draw;
        self
    }

    #[must_use]
    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    #[must_use]
    pub fn stats_service(&self) -> &StatsService {
        &self.stats_service
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Mutable clock, so fixed clocks can be advanced between events.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Validate settings and start a new session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Config` if the draft is invalid.
    pub fn start_session(
        &mut self,
        draft: SessionConfigDraft,
    ) -> Result<SessionService, SessionError> {
        let config = draft.validate()?;
        let session = SessionService::start(config, self.draw.as_mut(), self.clock.now());
        self.session_unlocks.clear();
        debug!(
            problems = session.problems().len(),
            difficulty = %session.config().difficulty(),
            timer_secs = session.config().timer_secs(),
            "session started"
        );
        Ok(session)
    }

    /// Show the current problem and start its countdown.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the session has ended.
    pub fn present(&mut self, session: &mut SessionService) -> Result<(), SessionError> {
        let problem = session.present_current(self.clock.now())?;
        let prompt = problem.prompt();
        let options = problem.options().map(<[String]>::to_vec);
        let snapshot = session.snapshot();
        self.sink.emit(PracticeEvent::ProblemPresented {
            prompt,
            options,
            snapshot,
        });
        if let Some(remaining_secs) = session.timer().remaining_secs(self.clock.now()) {
            self.sink.emit(PracticeEvent::TimerTick {
                remaining_secs,
                display: format_remaining(remaining_secs),
            });
        }
        Ok(())
    }

    /// Check an answer, update lifetime stats and save them.
    ///
    /// # Errors
    ///
    /// Returns the session's validation errors; nothing is counted in that case.
    pub async fn submit(
        &mut self,
        session: &mut SessionService,
        answer: &str,
    ) -> Result<AnswerResult, SessionError> {
        let outcome = session.submit(answer, self.clock.now(), self.draw.as_mut())?;
        Ok(self.record(session, outcome).await)
    }

    /// Time out the current problem.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the current problem is not open.
    pub async fn timeout(
        &mut self,
        session: &mut SessionService,
    ) -> Result<AnswerResult, SessionError> {
        let outcome = session.timeout(self.clock.now())?;
        Ok(self.record(session, outcome).await)
    }

    /// One-second heartbeat. Reports the countdown and handles its expiry.
    ///
    /// # Errors
    ///
    /// Propagates errors from the session timeout.
    pub async fn tick(&mut self, session: &mut SessionService) -> Result<SessionTick, SessionError> {
        let tick = session.tick(self.clock.now())?;
        match &tick {
            SessionTick::Idle => {}
            SessionTick::Running { remaining_secs } => {
                self.sink.emit(PracticeEvent::TimerTick {
                    remaining_secs: *remaining_secs,
                    display: format_remaining(*remaining_secs),
                });
            }
            SessionTick::TimedOut(outcome) => {
                self.sink.emit(PracticeEvent::TimerTick {
                    remaining_secs: 0,
                    display: format_remaining(0),
                });
                self.record(session, outcome.clone()).await;
            }
        }
        Ok(tick)
    }

    /// Move to the next problem, finishing the session after the last one.
    ///
    /// Returns the results screen when the session completes.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAnswered` while the current problem is open.
    pub async fn advance(
        &mut self,
        session: &mut SessionService,
    ) -> Result<Option<SessionReport>, SessionError> {
        match session.advance(self.clock.now())? {
            Advance::Next => Ok(None),
            Advance::Completed => self.finish(session).await.map(Some),
        }
    }

    async fn record(&mut self, session: &SessionService, outcome: AnswerOutcome) -> AnswerResult {
        let correct = outcome.is_correct();
        self.stats.record_answer(correct);

        let unlocked: Vec<_> = if correct {
            check_streak_milestone(&mut self.stats).into_iter().collect()
        } else {
            Vec::new()
        };
        self.stats_service.save_stats(&self.stats).await;

        debug!(
            correct,
            category = outcome.category.map(|c| c.as_str()),
            streak = outcome.streak,
            lifetime_streak = self.stats.current_streak(),
            "answer recorded"
        );

        self.sink.emit(PracticeEvent::Feedback(outcome.feedback.clone()));
        for achievement in unlocked.iter().copied() {
            self.sink.emit(PracticeEvent::AchievementUnlocked(achievement));
        }
        self.sink.emit(PracticeEvent::Stats(session.snapshot()));
        self.session_unlocks.extend(unlocked.iter().copied());

        AnswerResult { outcome, unlocked }
    }

    async fn finish(&mut self, session: &SessionService) -> Result<SessionReport, SessionError> {
        let summary = session.summary().ok_or(SessionError::NotAnswered)?;

        let newly = evaluate(&mut self.stats, Some(summary.exact_accuracy));
        for achievement in newly.iter().copied() {
            self.sink.emit(PracticeEvent::AchievementUnlocked(achievement));
        }
        self.stats_service.save_stats(&self.stats).await;

        if let Some(entry) = session.history_entry(self.clock.today()) {
            self.stats_service.append_history(entry).await;
        }

        let mut new_achievements = std::mem::take(&mut self.session_unlocks);
        new_achievements.extend(newly);
        let report = SessionReport {
            summary,
            new_achievements,
        };

        info!(
            accuracy = report.summary.accuracy,
            correct = report.summary.correct,
            total = report.summary.total,
            best_streak = report.summary.best_streak,
            unlocked = report.new_achievements.len(),
            "session completed"
        );
        self.sink.emit(PracticeEvent::SessionCompleted(report.clone()));
        Ok(report)
    }
}
