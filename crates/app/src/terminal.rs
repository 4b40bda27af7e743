//! Plain-text rendering of practice events and progress screens.

use std::io::Write;
use std::sync::Mutex;

use drill_core::model::{Operation, SessionConfig};
use services::sessions::ErrorAnalysis;
use services::{PracticeEvent, PracticeSink, ProgressView, SessionReport, WelcomeView};

/// Letters used to pick multiple-choice options.
pub const CHOICE_LETTERS: [char; 4] = ['a', 'b', 'c', 'd'];

/// Sink that writes each event as text.
pub struct TerminalSink<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Give back the writer, e.g. to inspect captured output.
    pub fn into_inner(self) -> Option<W> {
        self.out.into_inner().ok()
    }
}

impl<W: Write + Send> PracticeSink for TerminalSink<W> {
    fn emit(&self, event: PracticeEvent) {
        let Some(text) = render_event(&event) else {
            return;
        };
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{text}");
            let _ = out.flush();
        }
    }
}

/// Text for one event; `None` for events not worth a line.
#[must_use]
pub fn render_event(event: &PracticeEvent) -> Option<String> {
    match event {
        PracticeEvent::ProblemPresented {
            prompt,
            options,
            snapshot,
        } => {
            let mut text = format!(
                "\nProblem {} of {}  ({}% accuracy, streak {})\n  {prompt}",
                snapshot.problem_number, snapshot.problem_count, snapshot.accuracy, snapshot.streak
            );
            if let Some(options) = options {
                for (letter, option) in CHOICE_LETTERS.iter().zip(options) {
                    text.push_str(&format!("\n    {letter}) {option}"));
                }
            }
            Some(text)
        }
        PracticeEvent::Feedback(feedback) => Some(match &feedback.explanation {
            Some(explanation) => format!("  ✗ {} {explanation}", feedback.message),
            None => format!("  ✓ {}", feedback.message),
        }),
        PracticeEvent::Stats(_) => None,
        PracticeEvent::TimerTick {
            remaining_secs,
            display,
        } => (*remaining_secs <= 5 || remaining_secs % 10 == 0).then(|| format!("  ⏱ {display}")),
        PracticeEvent::AchievementUnlocked(achievement) => Some(format!(
            "  {} Achievement unlocked: {} ({})",
            achievement.icon, achievement.name, achievement.description
        )),
        PracticeEvent::SessionCompleted(report) => Some(render_report(report)),
    }
}

/// Map a typed answer to what the session expects.
///
/// For multiple-choice problems a single option letter selects that option;
/// anything else is passed through as typed.
#[must_use]
pub fn resolve_choice(input: &str, options: Option<&[String]>) -> String {
    let trimmed = input.trim();
    let Some(options) = options else {
        return trimmed.to_string();
    };
    let mut chars = trimmed.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        let c = c.to_ascii_lowercase();
        if let Some(index) = CHOICE_LETTERS.iter().position(|l| *l == c) {
            if let Some(option) = options.get(index) {
                return option.clone();
            }
        }
    }
    trimmed.to_string()
}

#[must_use]
pub fn render_report(report: &SessionReport) -> String {
    let mut text = format!(
        "\nSession complete!\n  Accuracy:     {}%\n  Score:        {}\n  Average time: {}\n  Best streak:  {}",
        report.summary.accuracy,
        report.score_label(),
        report.average_time_label(),
        report.summary.best_streak
    );
    if !report.new_achievements.is_empty() {
        text.push_str("\n  New achievements:");
        for achievement in &report.new_achievements {
            text.push_str(&format!("\n    {} {}", achievement.icon, achievement.name));
        }
    }
    text
}

#[must_use]
pub fn render_error_analysis(analysis: &ErrorAnalysis) -> String {
    let mut text = format!(
        "\nError analysis\n  Total errors: {}\n  Error rate:   {}%",
        analysis.total_errors, analysis.error_rate
    );
    if !analysis.categories.is_empty() {
        text.push_str("\n  Categories:");
        for category in &analysis.categories {
            text.push_str(&format!("\n    {}", category.label()));
        }
    }
    if !analysis.missed.is_empty() {
        text.push_str("\n  Missed problems:");
        for missed in &analysis.missed {
            text.push_str(&format!(
                "\n    {}  (your answer: {})",
                missed.solution, missed.your_answer
            ));
        }
    }
    if !analysis.tips.is_empty() {
        text.push_str("\n  Tips:");
        for tip in &analysis.tips {
            text.push_str(&format!("\n    - {tip}"));
        }
    }
    text
}

/// Suggested command for drilling the missed operations again.
#[must_use]
pub fn render_weak_area_hint(config: &SessionConfig) -> String {
    let ops: Vec<&str> = config.operations().iter().map(|op| op.as_str()).collect();
    format!(
        "\nPractice weak areas: drill practice --ops {} --difficulty {} --timer {} --count {}",
        ops.join(","),
        config.difficulty(),
        config.timer_secs(),
        config.problem_count()
    )
}

#[must_use]
pub fn render_welcome(view: &WelcomeView) -> String {
    format!(
        "Problems solved: {}\nAccuracy:        {}%\nCurrent streak:  {}",
        view.problems_solved, view.accuracy, view.current_streak
    )
}

#[must_use]
pub fn render_progress(view: &ProgressView) -> String {
    let mut text = format!(
        "\nTotal problems:     {}\nOverall accuracy:   {}%\nSessions completed: {}\n\nAchievements ({}/{}):",
        view.total_problems,
        view.accuracy,
        view.sessions_completed,
        view.unlocked_count(),
        view.achievements.len()
    );
    for status in &view.achievements {
        let mark = if status.unlocked { "✓" } else { "·" };
        let a = status.achievement;
        text.push_str(&format!("\n  {mark} {} {} - {}", a.icon, a.name, a.description));
    }

    text.push_str("\n\nRecent sessions:");
    if view.recent_sessions.is_empty() {
        text.push_str("\n  none yet");
    }
    for entry in &view.recent_sessions {
        let ops: Vec<&str> = entry.operations.iter().map(|op| Operation::as_str(*op)).collect();
        text.push_str(&format!(
            "\n  {}  {}%  {}/{}  avg {:.1}s  best streak {}  [{}; {}]",
            entry.date,
            entry.accuracy,
            entry.problems_correct,
            entry.total_problems,
            entry.average_time,
            entry.best_streak,
            ops.join(", "),
            entry.difficulty
        ));
    }
    text
}
