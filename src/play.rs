use crate::error::Result;
use crate::report::{md, share};
use crate::scenarios::ScenarioTable;
use crate::session::{Event, Session};
use crate::types::config::QuizConfig;
use crate::types::scenario::{Action, ConsequenceType, Scenario, ThreadActivity};
use crate::types::scoring::ScoreSummary;
use std::io::{BufRead, Write};

const QUIT: &str = "q";

/// Runs line-oriented play sessions until the player quits or input ends.
///
/// Returns the summary of the last finished session, if any.
pub fn run<R: BufRead, W: Write>(
    table: &ScenarioTable,
    config: &QuizConfig,
    input: &mut R,
    output: &mut W,
) -> Result<Option<ScoreSummary>> {
    let mut session = Session::new(table);
    let mut last_summary = None;

    loop {
        writeln!(output, "Be a Moderator")?;
        writeln!(
            output,
            "{} real scenarios. Compare your calls with real moderators and other players.",
            session.total()
        )?;
        let Some(line) = prompt(input, output, "Press Enter to start (q to quit): ")? else {
            return Ok(last_summary);
        };
        if line.eq_ignore_ascii_case(QUIT) {
            return Ok(last_summary);
        }
        session.apply(Event::Start)?;

        while let Some(scenario) = session.current() {
            print_scenario(output, &session, scenario)?;
            let Some(action) = read_action(input, output)? else {
                tracing::info!(
                    phase = %session.phase(),
                    answered = session.decisions().len(),
                    "player quit mid-session"
                );
                return Ok(last_summary);
            };
            session.apply(Event::Decide(action))?;
            print_review(output, &session, scenario)?;
            session.apply(Event::Next)?;
        }

        let Some(summary) = session.summary(&config.scoring) else {
            return Ok(last_summary);
        };
        writeln!(output)?;
        write!(output, "{}", md::to_markdown(&summary))?;
        writeln!(output)?;
        writeln!(output, "Share: {}", share::share_text(&summary, &config.share))?;
        last_summary = Some(summary);

        let again = prompt(input, output, "Play again? [y/N]: ")?.unwrap_or_default();
        if !matches!(again.to_ascii_lowercase().as_str(), "y" | "yes") {
            return Ok(last_summary);
        }
        session.apply(Event::Restart)?;
    }
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn read_action<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<Action>> {
    loop {
        let Some(line) = prompt(input, output, "Your decision: ")? else {
            return Ok(None);
        };
        if line.eq_ignore_ascii_case(QUIT) {
            return Ok(None);
        }
        match line.parse::<Action>() {
            Ok(action) => return Ok(Some(action)),
            Err(err) => writeln!(output, "{err}; choose one of the listed actions")?,
        }
    }
}

fn print_scenario<W: Write>(output: &mut W, session: &Session<'_>, scenario: &Scenario) -> Result<()> {
    let position = session.decisions().len() + 1;
    writeln!(output)?;
    writeln!(
        output,
        "Scenario {position} of {} [{}%]",
        session.total(),
        session.progress_percent()
    )?;
    writeln!(output, "{}: \"{}\"", scenario.author, scenario.comment)?;
    writeln!(output, "Context: {}", scenario.context)?;
    let activity = match scenario.thread_activity {
        Some(ThreadActivity::Low) => "low",
        Some(ThreadActivity::Medium) => "medium",
        Some(ThreadActivity::High) => "high",
        None => "unknown",
    };
    writeln!(
        output,
        "Reports: {} | thread activity: {activity}",
        scenario.reports
    )?;
    for action in Action::ALL {
        writeln!(output, "  {:<10} {}", action.id(), action.label())?;
    }
    Ok(())
}

fn print_review<W: Write>(output: &mut W, session: &Session<'_>, scenario: &Scenario) -> Result<()> {
    let real = scenario.result.real_moderator_action;
    if let Some(choice) = session.last_decision() {
        writeln!(output, "Your decision: {}", choice.label())?;
    }
    writeln!(output, "Real moderator: {}", real.label())?;
    writeln!(output, "Other players:")?;
    for action in Action::ALL {
        writeln!(
            output,
            "  {:<18} {:>3}%",
            action.label(),
            scenario.player_share(action)
        )?;
    }
    if !scenario.result.consequence.is_empty() {
        let tone = match scenario.result.consequence_type {
            ConsequenceType::Positive => "+",
            ConsequenceType::Negative => "-",
            ConsequenceType::Neutral => "~",
        };
        writeln!(
            output,
            "What happened [{tone}]: {}",
            scenario.result.consequence
        )?;
    }
    Ok(())
}
