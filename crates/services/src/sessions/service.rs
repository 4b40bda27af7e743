use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

use drill_core::classifier::classify;
use drill_core::generator::{Draw, generate_for_session};
use drill_core::model::tips::ENCOURAGING_MESSAGES;
use drill_core::model::{
    ErrorCategory, ErrorRecord, Problem, SessionConfig, SessionConfigError, SessionHistoryEntry,
    percent, rounded_percent,
};

use super::progress::{SessionSnapshot, SessionSummary};
use super::timer::{ProblemTimer, TimerTick};
use crate::error::SessionError;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Message shown after an answer or a timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub message: String,
    /// Correct answer spelled out after a miss.
    pub explanation: Option<String>,
}

/// Result of answering (or running out of time on) the current problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub feedback: Feedback,
    /// Set for misses only.
    pub category: Option<ErrorCategory>,
    pub timed_out: bool,
    /// Session streak after this answer.
    pub streak: u32,
}

impl AnswerOutcome {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.feedback.correct
    }
}

/// Where `advance` left the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next,
    Completed,
}

/// What a one-second tick did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTick {
    Idle,
    Running { remaining_secs: u32 },
    TimedOut(AnswerOutcome),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory practice session.
///
/// Steps through the generated problems in order: present, answer (or time
/// out), advance. Owns the countdown for the problem on screen.
pub struct SessionService {
    config: SessionConfig,
    problems: Vec<Problem>,
    current: usize,
    correct: u32,
    incorrect: u32,
    streak: u32,
    best_streak: u32,
    errors: Vec<ErrorRecord>,
    timer: ProblemTimer,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl SessionService {
    /// Generate `config.problem_count()` problems and start a session.
    ///
    /// `started_at` should come from the services layer clock.
    pub fn start<D: Draw + ?Sized>(
        config: SessionConfig,
        draw: &mut D,
        started_at: DateTime<Utc>,
    ) -> Self {
        let problems = generate_for_session(&config, draw);
        Self::build(config, problems, started_at)
    }

    /// Start a session over an explicit problem list.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Config` if `problems` is empty.
    pub fn with_problems(
        config: SessionConfig,
        problems: Vec<Problem>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if problems.is_empty() {
            return Err(SessionConfigError::ZeroProblemCount.into());
        }
        Ok(Self::build(config, problems, started_at))
    }

    fn build(config: SessionConfig, problems: Vec<Problem>, started_at: DateTime<Utc>) -> Self {
        let timer = ProblemTimer::new(config.timer_secs());
        Self {
            config,
            problems,
            current: 0,
            correct: 0,
            incorrect: 0,
            streak: 0,
            best_streak: 0,
            errors: Vec::new(),
            timer,
            started_at,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_problem(&self) -> Option<&Problem> {
        self.problems.get(self.current)
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect_count(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn answered_count(&self) -> u32 {
        self.correct + self.incorrect
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// Misses in the order they happened.
    #[must_use]
    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    #[must_use]
    pub fn timer(&self) -> &ProblemTimer {
        &self.timer
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Show the current problem: stamps its start time and arms the countdown.
    ///
    /// Presenting an already answered problem changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once every problem has been answered.
    pub fn present_current(&mut self, now: DateTime<Utc>) -> Result<&Problem, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        let problem = self
            .problems
            .get_mut(self.current)
            .ok_or(SessionError::Completed)?;
        if !problem.is_answered() {
            problem.mark_presented(now);
            self.timer.arm(now);
        }
        Ok(problem)
    }

    /// Check an answer to the current problem.
    ///
    /// `encouragement` picks the message shown for a correct answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyAnswer` for blank input (nothing is recorded),
    /// `SessionError::NotPresented` before `present_current`,
    /// `SessionError::Problem` if the problem was already answered, and
    /// `SessionError::Completed` after the last problem.
    pub fn submit<D: Draw + ?Sized>(
        &mut self,
        answer: &str,
        now: DateTime<Utc>,
        encouragement: &mut D,
    ) -> Result<AnswerOutcome, SessionError> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(SessionError::EmptyAnswer);
        }
        let index = self.presented_index()?;
        let correct = self.problems[index].record_answer(Some(answer), now)?;
        self.timer.cancel();
        let problem = &self.problems[index];

        if correct {
            self.correct += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
            let message = ENCOURAGING_MESSAGES[encouragement.pick(ENCOURAGING_MESSAGES.len())];
            return Ok(AnswerOutcome {
                feedback: Feedback {
                    correct: true,
                    message: message.to_string(),
                    explanation: None,
                },
                category: None,
                timed_out: false,
                streak: self.streak,
            });
        }

        self.incorrect += 1;
        self.streak = 0;
        let elapsed_ms = problem.elapsed_ms().unwrap_or(0);
        let category = classify(problem, answer, elapsed_ms);
        let explanation = format!("The correct answer is {}", problem.answer());
        self.errors.push(ErrorRecord::new(
            problem.clone(),
            category,
            Some(answer.to_string()),
        ));

        Ok(AnswerOutcome {
            feedback: Feedback {
                correct: false,
                message: "Not quite right.".to_string(),
                explanation: Some(explanation),
            },
            category: Some(category),
            timed_out: false,
            streak: 0,
        })
    }

    /// Give up on the current problem because its countdown ran out.
    ///
    /// # Errors
    ///
    /// Same conditions as `submit`, minus the blank-answer check.
    pub fn timeout(&mut self, now: DateTime<Utc>) -> Result<AnswerOutcome, SessionError> {
        let index = self.presented_index()?;
        self.problems[index].record_answer(None, now)?;
        self.timer.cancel();
        let problem = &self.problems[index];

        self.incorrect += 1;
        self.streak = 0;
        let category = ErrorCategory::TimePressureError;
        let explanation = format!("The correct answer was {}", problem.answer());
        self.errors
            .push(ErrorRecord::new(problem.clone(), category, None));

        Ok(AnswerOutcome {
            feedback: Feedback {
                correct: false,
                message: "Time's up!".to_string(),
                explanation: Some(explanation),
            },
            category: Some(category),
            timed_out: true,
            streak: 0,
        })
    }

    /// Drive the countdown. Fires `timeout` at most once per presented problem.
    ///
    /// # Errors
    ///
    /// Propagates errors from `timeout`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<SessionTick, SessionError> {
        if self.is_complete() {
            return Ok(SessionTick::Idle);
        }
        match self.timer.tick(now) {
            TimerTick::Idle => Ok(SessionTick::Idle),
            TimerTick::Running { remaining_secs } => Ok(SessionTick::Running { remaining_secs }),
            TimerTick::Expired => Ok(SessionTick::TimedOut(self.timeout(now)?)),
        }
    }

    /// Move past the answered current problem.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAnswered` while the current problem is open and
    /// `SessionError::Completed` once the session has ended.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Advance, SessionError> {
        let problem = self.current_problem().ok_or(SessionError::Completed)?;
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if !problem.is_answered() {
            return Err(SessionError::NotAnswered);
        }

        self.timer.cancel();
        self.current += 1;
        if self.current >= self.problems.len() {
            self.completed_at = Some(now);
            return Ok(Advance::Completed);
        }
        Ok(Advance::Next)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let total = self.problems.len();
        let answered = self.answered_count();
        let total_u32 = u32::try_from(total).unwrap_or(u32::MAX);
        SessionSnapshot {
            problem_number: (self.current + 1).min(total),
            problem_count: total,
            progress_percent: rounded_percent(answered, total_u32).unwrap_or(0),
            accuracy: rounded_percent(self.correct, answered).unwrap_or(100),
            streak: self.streak,
        }
    }

    /// Aggregates of the finished session; `None` while still running.
    #[must_use]
    pub fn summary(&self) -> Option<SessionSummary> {
        let completed_at = self.completed_at?;
        let total = u32::try_from(self.problems.len()).unwrap_or(u32::MAX);
        let elapsed_ms = completed_at
            .signed_duration_since(self.started_at)
            .num_milliseconds()
            .max(0);
        #[allow(clippy::cast_precision_loss)]
        let per_problem_secs = elapsed_ms as f64 / 1000.0 / f64::from(total.max(1));
        Some(SessionSummary {
            accuracy: rounded_percent(self.correct, self.answered_count()).unwrap_or(0),
            exact_accuracy: percent(self.correct, self.answered_count()).unwrap_or(0.0),
            correct: self.correct,
            incorrect: self.incorrect,
            total,
            average_time_secs: (per_problem_secs * 10.0).round() / 10.0,
            best_streak: self.best_streak,
            started_at: self.started_at,
            completed_at,
        })
    }

    /// History log entry for the finished session.
    #[must_use]
    pub fn history_entry(&self, date: NaiveDate) -> Option<SessionHistoryEntry> {
        let summary = self.summary()?;
        Some(SessionHistoryEntry {
            date,
            accuracy: summary.accuracy,
            problems_correct: summary.correct,
            total_problems: summary.total,
            average_time: summary.average_time_secs,
            best_streak: summary.best_streak,
            operations: self.config.operations().to_vec(),
            difficulty: self.config.difficulty(),
        })
    }

    fn presented_index(&self) -> Result<usize, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        let problem = self.current_problem().ok_or(SessionError::Completed)?;
        if problem.started_at().is_none() {
            return Err(SessionError::NotPresented);
        }
        Ok(self.current)
    }
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("problems_len", &self.problems.len())
            .field("current", &self.current)
            .field("correct", &self.correct)
            .field("incorrect", &self.incorrect)
            .field("streak", &self.streak)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use drill_core::generator::ScriptedDraw;
    use drill_core::model::{
        Answer, Difficulty, Operands, Operation, ProblemError, SessionConfigDraft,
    };
    use drill_core::time::fixed_now;

    fn config(count: u32, timer_secs: u32) -> SessionConfig {
        SessionConfigDraft {
            operations: vec![Operation::Addition],
            difficulty: Difficulty::Beginner,
            timer_secs,
            problem_count: count,
        }
        .validate()
        .unwrap()
    }

    fn product(a: i64, b: i64) -> Problem {
        Problem::new(
            Operation::Multiplication,
            Operands::Binary { left: a, right: b },
            Answer::Number(a * b),
            format!("{a} × {b}"),
            None,
        )
    }

    fn session(problems: Vec<Problem>, timer_secs: u32) -> SessionService {
        let count = u32::try_from(problems.len()).unwrap();
        SessionService::with_problems(config(count, timer_secs), problems, fixed_now()).unwrap()
    }

    #[test]
    fn start_generates_configured_count() {
        let mut draw = ScriptedDraw::default();
        let session = SessionService::start(config(5, 0), &mut draw, fixed_now());
        assert_eq!(session.problems().len(), 5);
        assert_eq!(session.current_index(), 0);
        assert!(session.problems().iter().all(|p| p.display() == "1 + 1"));
    }

    #[test]
    fn correct_answer_builds_streak() {
        let mut s = session(vec![product(3, 4), product(5, 5)], 0);
        let mut draw = ScriptedDraw::new([4]);
        s.present_current(fixed_now()).unwrap();
        let outcome = s.submit(" 12 ", fixed_now(), &mut draw).unwrap();

        assert!(outcome.is_correct());
        assert_eq!(outcome.feedback.message, "Fantastic!");
        assert_eq!(outcome.streak, 1);
        assert_eq!(s.correct_count(), 1);
        assert_eq!(s.best_streak(), 1);
    }

    #[test]
    fn wrong_answer_is_classified_and_recorded() {
        let mut s = session(vec![product(6, 7)], 0);
        let mut draw = ScriptedDraw::default();
        let now = fixed_now();
        s.present_current(now).unwrap();
        let outcome = s
            .submit("41", now + Duration::seconds(5), &mut draw)
            .unwrap();

        assert!(!outcome.is_correct());
        assert_eq!(outcome.feedback.message, "Not quite right.");
        assert_eq!(
            outcome.feedback.explanation.as_deref(),
            Some("The correct answer is 42")
        );
        assert_eq!(outcome.category, Some(ErrorCategory::CarelessMistake));
        assert_eq!(s.errors().len(), 1);
        assert_eq!(s.errors()[0].submitted.as_deref(), Some("41"));
    }

    #[test]
    fn blank_answer_records_nothing() {
        let mut s = session(vec![product(2, 2)], 0);
        s.present_current(fixed_now()).unwrap();
        let err = s
            .submit("   ", fixed_now(), &mut ScriptedDraw::default())
            .unwrap_err();
        assert!(matches!(err, SessionError::EmptyAnswer));
        assert_eq!(s.answered_count(), 0);
        assert!(!s.problems()[0].is_answered());
    }

    #[test]
    fn second_submission_is_rejected() {
        let mut s = session(vec![product(2, 2), product(3, 3)], 0);
        let mut draw = ScriptedDraw::default();
        s.present_current(fixed_now()).unwrap();
        s.submit("4", fixed_now(), &mut draw).unwrap();
        let err = s.submit("5", fixed_now(), &mut draw).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Problem(ProblemError::AlreadyAnswered)
        ));
        assert_eq!(s.answered_count(), 1);
        assert_eq!(s.correct_count(), 1);
    }

    #[test]
    fn submit_requires_presentation() {
        let mut s = session(vec![product(2, 2)], 0);
        let err = s
            .submit("4", fixed_now(), &mut ScriptedDraw::default())
            .unwrap_err();
        assert!(matches!(err, SessionError::NotPresented));
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut s = session(vec![product(2, 2)], 0);
        s.present_current(fixed_now()).unwrap();
        let err = s.advance(fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::NotAnswered));
    }

    #[test]
    fn completes_after_last_problem() {
        let start = fixed_now();
        let mut s = session(vec![product(2, 2), product(3, 3)], 0);
        let mut draw = ScriptedDraw::default();

        s.present_current(start).unwrap();
        s.submit("4", start + Duration::seconds(2), &mut draw).unwrap();
        assert_eq!(s.advance(start).unwrap(), Advance::Next);

        s.present_current(start + Duration::seconds(2)).unwrap();
        s.submit("8", start + Duration::seconds(7), &mut draw).unwrap();
        assert!(s.summary().is_none());
        assert_eq!(
            s.advance(start + Duration::seconds(7)).unwrap(),
            Advance::Completed
        );
        assert!(s.is_complete());
        assert_eq!(s.current_index(), 2);
        assert!(matches!(
            s.present_current(start).unwrap_err(),
            SessionError::Completed
        ));

        let summary = s.summary().unwrap();
        assert_eq!(summary.accuracy, 50);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.total, 2);
        assert!((summary.average_time_secs - 3.5).abs() < f64::EPSILON);
        assert_eq!(summary.best_streak, 1);

        let entry = s.history_entry(start.date_naive()).unwrap();
        assert_eq!(entry.operations, vec![Operation::Addition]);
        assert_eq!(entry.problems_correct, 1);
    }

    #[test]
    fn snapshot_reports_running_accuracy() {
        let mut s = session(vec![product(2, 2), product(3, 3), product(4, 4)], 0);
        let mut draw = ScriptedDraw::default();
        let fresh = s.snapshot();
        assert_eq!(fresh.problem_number, 1);
        assert_eq!(fresh.accuracy, 100);
        assert_eq!(fresh.progress_percent, 0);

        s.present_current(fixed_now()).unwrap();
        s.submit("4", fixed_now(), &mut draw).unwrap();
        s.advance(fixed_now()).unwrap();
        s.present_current(fixed_now()).unwrap();
        s.submit("10", fixed_now(), &mut draw).unwrap();

        let snap = s.snapshot();
        assert_eq!(snap.problem_number, 2);
        assert_eq!(snap.problem_count, 3);
        assert_eq!(snap.progress_percent, 67);
        assert_eq!(snap.accuracy, 50);
        assert_eq!(snap.streak, 0);
    }

    #[test]
    fn timer_fires_once_and_resets_streak() {
        let start = fixed_now();
        let mut s = session(vec![product(2, 2), product(3, 3)], 10);
        let mut draw = ScriptedDraw::default();

        s.present_current(start).unwrap();
        s.submit("4", start, &mut draw).unwrap();
        s.advance(start).unwrap();
        s.present_current(start).unwrap();

        assert_eq!(
            s.tick(start + Duration::seconds(3)).unwrap(),
            SessionTick::Running { remaining_secs: 7 }
        );
        let SessionTick::TimedOut(outcome) = s.tick(start + Duration::seconds(10)).unwrap() else {
            panic!("expected timeout");
        };
        assert!(outcome.timed_out);
        assert_eq!(outcome.feedback.message, "Time's up!");
        assert_eq!(
            outcome.feedback.explanation.as_deref(),
            Some("The correct answer was 9")
        );
        assert_eq!(outcome.category, Some(ErrorCategory::TimePressureError));
        assert_eq!(s.streak(), 0);
        assert_eq!(s.errors()[0].submitted_label(), "No answer (timeout)");

        assert_eq!(s.tick(start + Duration::seconds(11)).unwrap(), SessionTick::Idle);
        assert_eq!(s.incorrect_count(), 1);
    }

    #[test]
    fn manual_submit_cancels_timer() {
        let start = fixed_now();
        let mut s = session(vec![product(2, 2)], 10);
        s.present_current(start).unwrap();
        s.submit("4", start + Duration::seconds(4), &mut ScriptedDraw::default())
            .unwrap();
        assert!(!s.timer().is_running());
        assert_eq!(s.tick(start + Duration::seconds(30)).unwrap(), SessionTick::Idle);
        assert_eq!(s.incorrect_count(), 0);
    }

    #[test]
    fn empty_problem_list_is_rejected() {
        let err = SessionService::with_problems(config(1, 0), Vec::new(), fixed_now()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Config(SessionConfigError::ZeroProblemCount)
        ));
    }
}
