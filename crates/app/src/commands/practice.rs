//! `drill practice`: one session in the terminal.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use drill_core::model::{Difficulty, Operation, SessionConfigDraft};
use services::sessions::{ErrorAnalysis, weak_area_config};
use services::{PracticeLoopService, PracticeSink, SessionError, SessionService, SessionTick};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::info;

use super::open_services;
use crate::terminal::{
    TerminalSink, render_error_analysis, render_weak_area_hint, render_welcome, resolve_choice,
};

#[derive(Debug, Args)]
pub struct PracticeArgs {
    /// Operations to drill, comma separated
    /// (addition, subtraction, multiplication, division, square, sqrt, cbrt, trigonometry)
    #[arg(long, value_delimiter = ',', default_value = "addition")]
    pub ops: Vec<String>,

    /// beginner, easy, intermediate, hard or expert
    #[arg(long, default_value = "beginner")]
    pub difficulty: String,

    /// Seconds per problem, 0 for no timer (presets: 10, 20, 30, 40, 50, 60, 120, 300)
    #[arg(long, default_value_t = 0)]
    pub timer: u32,

    /// Number of problems, 1 to 1000 (presets: 5, 10, 20, 50, 100)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub count: u32,
}

impl PracticeArgs {
    /// Parse names into an unvalidated session configuration.
    pub fn to_draft(&self) -> Result<SessionConfigDraft, drill_core::Error> {
        let operations = self
            .ops
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| name.parse::<Operation>())
            .collect::<Result<Vec<_>, _>>()?;
        let difficulty = self.difficulty.parse::<Difficulty>()?;
        Ok(SessionConfigDraft {
            operations,
            difficulty,
            timer_secs: self.timer,
            problem_count: self.count,
        })
    }
}

type StdinLines = Lines<BufReader<Stdin>>;

pub async fn run(args: PracticeArgs, db_url: &str) -> Result<()> {
    let draft = args.to_draft()?;
    let services = open_services(db_url).await?;
    println!("{}", render_welcome(&services.welcome().await));

    let sink: Arc<dyn PracticeSink> = Arc::new(TerminalSink::new(std::io::stdout()));
    let mut practice = services.practice_loop(sink).await;
    let mut session = practice.start_session(draft)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        practice.present(&mut session)?;
        ticker.reset();
        if !answer_current(&mut practice, &mut session, &mut lines, &mut ticker).await? {
            info!(answered = session.answered_count(), "practice aborted");
            return Ok(());
        }
        if practice.advance(&mut session).await?.is_some() {
            break;
        }
    }

    if !session.errors().is_empty() {
        println!("{}", render_error_analysis(&ErrorAnalysis::for_session(&session)));
        if let Ok(config) = weak_area_config(&session) {
            println!("{}", render_weak_area_hint(&config));
        }
    }
    Ok(())
}

/// Wait for an answer or the countdown. Returns `false` when input ends first.
async fn answer_current(
    practice: &mut PracticeLoopService,
    session: &mut SessionService,
    lines: &mut StdinLines,
    ticker: &mut Interval,
) -> Result<bool> {
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(false);
                };
                let options = session.current_problem().and_then(|p| p.options());
                let answer = resolve_choice(&line, options);
                match practice.submit(session, &answer).await {
                    Ok(_) => return Ok(true),
                    Err(err @ SessionError::EmptyAnswer) => eprintln!("{err}"),
                    Err(err) => return Err(err.into()),
                }
            }
            _ = ticker.tick() => {
                if let SessionTick::TimedOut(_) = practice.tick(session).await? {
                    return Ok(true);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::SessionConfigError;

    fn args(ops: &[&str], difficulty: &str) -> PracticeArgs {
        PracticeArgs {
            ops: ops.iter().map(ToString::to_string).collect(),
            difficulty: difficulty.into(),
            timer: 30,
            count: 20,
        }
    }

    #[test]
    fn draft_parses_names_and_aliases() {
        let draft = args(&["add", "sqrt", "trig"], "Hard").to_draft().unwrap();
        assert_eq!(
            draft.operations,
            vec![Operation::Addition, Operation::Sqrt, Operation::Trigonometry]
        );
        assert_eq!(draft.difficulty, Difficulty::Hard);
        assert_eq!(draft.timer_secs, 30);
        assert_eq!(draft.problem_count, 20);
    }

    #[test]
    fn unknown_operation_is_reported() {
        let err = args(&["modulo"], "easy").to_draft().unwrap_err();
        assert!(matches!(err, drill_core::Error::Operation(_)));
    }

    #[test]
    fn unknown_difficulty_is_reported() {
        let err = args(&["add"], "legendary").to_draft().unwrap_err();
        assert!(matches!(
            err,
            drill_core::Error::Config(SessionConfigError::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn blank_operation_list_fails_validation() {
        let draft = args(&[""], "easy").to_draft().unwrap();
        assert_eq!(
            draft.validate().unwrap_err(),
            SessionConfigError::NoOperations
        );
    }
}
