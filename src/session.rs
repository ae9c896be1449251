use crate::error::{QuizError, Result};
use crate::scenarios::ScenarioTable;
use crate::scoring;
use crate::types::config::ScoringConfig;
use crate::types::scenario::{Action, Decision, Scenario};
use crate::types::scoring::ScoreSummary;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Intro,
    Playing { index: usize },
    Reviewing { index: usize },
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Start,
    Decide(Action),
    Next,
    Restart,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intro => f.write_str("intro"),
            Self::Playing { index } => write!(f, "playing scenario {}", index + 1),
            Self::Reviewing { index } => write!(f, "reviewing scenario {}", index + 1),
            Self::Final => f.write_str("final"),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Decide(action) => write!(f, "decide {action}"),
            Self::Next => f.write_str("next"),
            Self::Restart => f.write_str("restart"),
        }
    }
}

/// Pure phase transition for a table of `total` scenarios.
pub fn transition(phase: Phase, event: Event, total: usize) -> Result<Phase> {
    match (phase, event) {
        (_, Event::Restart) => Ok(Phase::Intro),
        (Phase::Intro, Event::Start) if total == 0 => Ok(Phase::Final),
        (Phase::Intro, Event::Start) => Ok(Phase::Playing { index: 0 }),
        (Phase::Playing { index }, Event::Decide(_)) => Ok(Phase::Reviewing { index }),
        (Phase::Reviewing { index }, Event::Next) if index + 1 < total => {
            Ok(Phase::Playing { index: index + 1 })
        }
        (Phase::Reviewing { .. }, Event::Next) => Ok(Phase::Final),
        (phase, event) => Err(QuizError::InvalidTransition {
            phase: phase.to_string(),
            event: event.to_string(),
        }),
    }
}

/// One player's run through the table. Holds all mutable play state.
#[derive(Debug)]
pub struct Session<'a> {
    table: &'a ScenarioTable,
    phase: Phase,
    decisions: Vec<Decision>,
}

impl<'a> Session<'a> {
    pub fn new(table: &'a ScenarioTable) -> Self {
        Self {
            table,
            phase: Phase::Intro,
            decisions: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    pub fn total(&self) -> usize {
        self.table.len()
    }

    /// The scenario being played or reviewed, if any.
    pub fn current(&self) -> Option<&'a Scenario> {
        match self.phase {
            Phase::Playing { index } | Phase::Reviewing { index } => self.table.get(index),
            Phase::Intro | Phase::Final => None,
        }
    }

    /// The player's decision on the scenario under review.
    pub fn last_decision(&self) -> Option<Action> {
        match self.phase {
            Phase::Reviewing { .. } => self.decisions.last().map(|decision| decision.action),
            _ => None,
        }
    }

    pub fn progress_percent(&self) -> u8 {
        let total = self.total();
        let index = match self.phase {
            Phase::Intro => 0,
            Phase::Playing { index } | Phase::Reviewing { index } => index,
            Phase::Final => total,
        };
        if self.table.is_empty() {
            return 100;
        }
        ((index * 100) / total).min(100) as u8
    }

    pub fn apply(&mut self, event: Event) -> Result<Phase> {
        let next = transition(self.phase, event, self.total())?;
        match event {
            Event::Restart => self.decisions.clear(),
            Event::Decide(action) => {
                if let Some(scenario) = self.current() {
                    self.decisions.push(Decision::new(scenario.id, action));
                }
            }
            Event::Start | Event::Next => {}
        }
        tracing::debug!(from = %self.phase, to = %next, %event, "session transition");
        self.phase = next;
        Ok(next)
    }

    pub fn is_final(&self) -> bool {
        self.phase == Phase::Final
    }

    /// Scores the session; only meaningful once the final phase is reached.
    pub fn summary(&self, config: &ScoringConfig) -> Option<ScoreSummary> {
        self.is_final()
            .then(|| scoring::compute_results(self.table.scenarios(), &self.decisions, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> ScenarioTable {
        ScenarioTable::builtin().expect("built-in table should load")
    }

    #[test]
    fn transition_walks_intro_to_final() {
        let mut phase = transition(Phase::Intro, Event::Start, 2).expect("start");
        assert_eq!(phase, Phase::Playing { index: 0 });
        phase = transition(phase, Event::Decide(Action::Keep), 2).expect("decide");
        assert_eq!(phase, Phase::Reviewing { index: 0 });
        phase = transition(phase, Event::Next, 2).expect("next");
        assert_eq!(phase, Phase::Playing { index: 1 });
        phase = transition(phase, Event::Decide(Action::Delete), 2).expect("decide");
        phase = transition(phase, Event::Next, 2).expect("next");
        assert_eq!(phase, Phase::Final);
    }

    #[test]
    fn transition_rejects_out_of_phase_events() {
        assert!(transition(Phase::Intro, Event::Next, 3).is_err());
        assert!(transition(Phase::Intro, Event::Decide(Action::Keep), 3).is_err());
        assert!(transition(Phase::Playing { index: 0 }, Event::Next, 3).is_err());
        assert!(transition(Phase::Reviewing { index: 0 }, Event::Decide(Action::Warn), 3).is_err());
        let err = transition(Phase::Final, Event::Start, 3).expect_err("final cannot start");
        assert!(err.to_string().contains("start while final"));
    }

    #[test]
    fn restart_is_allowed_from_every_phase() {
        for phase in [
            Phase::Intro,
            Phase::Playing { index: 1 },
            Phase::Reviewing { index: 1 },
            Phase::Final,
        ] {
            assert_eq!(transition(phase, Event::Restart, 3).ok(), Some(Phase::Intro));
        }
    }

    #[test]
    fn empty_table_starts_straight_into_final() {
        assert_eq!(transition(Phase::Intro, Event::Start, 0).ok(), Some(Phase::Final));
    }

    #[test]
    fn session_records_decisions_against_current_scenario() {
        let table = builtin();
        let mut session = Session::new(&table);
        session.apply(Event::Start).expect("start");
        assert_eq!(session.current().map(|scenario| scenario.id), Some(1));
        session.apply(Event::Decide(Action::Warn)).expect("decide");
        assert_eq!(session.last_decision(), Some(Action::Warn));
        session.apply(Event::Next).expect("next");
        session.apply(Event::Decide(Action::Delete)).expect("decide");

        assert_eq!(
            session.decisions(),
            &[
                Decision::new(1, Action::Warn),
                Decision::new(2, Action::Delete)
            ]
        );
        assert!(session.summary(&ScoringConfig::default()).is_none());
    }

    #[test]
    fn rejected_event_leaves_session_untouched() {
        let table = builtin();
        let mut session = Session::new(&table);
        assert!(session.apply(Event::Decide(Action::Keep)).is_err());
        assert_eq!(session.phase(), Phase::Intro);
        assert!(session.decisions().is_empty());
    }

    #[test]
    fn full_session_produces_summary_and_restart_clears_it() {
        let table = builtin();
        let mut session = Session::new(&table);
        session.apply(Event::Start).expect("start");
        while !session.is_final() {
            let real = session
                .current()
                .map(|scenario| scenario.result.real_moderator_action)
                .expect("scenario should be active");
            session.apply(Event::Decide(real)).expect("decide");
            session.apply(Event::Next).expect("next");
        }

        assert_eq!(session.progress_percent(), 100);
        let summary = session
            .summary(&ScoringConfig::default())
            .expect("final session should score");
        assert_eq!(summary.total_answered, 8);
        assert_eq!(summary.accuracy_percent, 100);
        assert_eq!(summary.deletes_percent, 25);

        session.apply(Event::Restart).expect("restart");
        assert_eq!(session.phase(), Phase::Intro);
        assert!(session.decisions().is_empty());
    }

    #[test]
    fn progress_tracks_scenario_index() {
        let table = builtin();
        let mut session = Session::new(&table);
        assert_eq!(session.progress_percent(), 0);
        session.apply(Event::Start).expect("start");
        session.apply(Event::Decide(Action::Keep)).expect("decide");
        session.apply(Event::Next).expect("next");
        session.apply(Event::Decide(Action::Keep)).expect("decide");
        session.apply(Event::Next).expect("next");
        assert_eq!(session.progress_percent(), 25);
    }
}
