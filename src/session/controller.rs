use anyhow::{anyhow, Result};
use log::info;

use super::counterbalance::block_order;
use super::feedback::collect_feedback;
use crate::console::Console;
use crate::logs::{FeedbackLog, TrialLog};
use crate::models::{ChartKind, FeedbackRecord, ParticipantId, SessionId, TrialRecord};
use crate::settings::StudySettings;
use crate::trial::{StudyIo, TrialRunner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingParticipant,
    FirstBlock(ChartKind),
    Gate,
    SecondBlock(ChartKind),
    Done,
}

/// Everything one session produced, in the order it was logged.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub session_id: SessionId,
    pub participant: ParticipantId,
    pub order: [ChartKind; 2],
    pub trials: Vec<TrialRecord>,
    pub feedback: Vec<FeedbackRecord>,
}

/// Drives one participant through both chart conditions.
pub struct SessionController {
    settings: StudySettings,
    runner: TrialRunner,
    phase: SessionPhase,
}

impl SessionController {
    pub fn new(settings: StudySettings) -> Self {
        Self {
            runner: TrialRunner::from_settings(&settings),
            settings,
            phase: SessionPhase::AwaitingParticipant,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn run_session(&mut self, io: &mut StudyIo<'_>) -> Result<SessionOutcome> {
        if self.phase != SessionPhase::AwaitingParticipant {
            return Err(anyhow!("session already started"));
        }

        let participant = prompt_participant(io.console, self.settings.max_participants)?;
        let session_id = SessionId::now();

        let trial_log = TrialLog::open(&self.settings.trial_log_path)?;
        let feedback_log = FeedbackLog::open(&self.settings.feedback_log_path)?;

        let order = block_order(participant, self.settings.max_participants);
        info!(
            "Session {} for participant {}: {} first",
            session_id,
            participant,
            order[0].display_name()
        );

        let mut outcome = SessionOutcome {
            session_id,
            participant,
            order,
            trials: Vec::with_capacity(self.settings.trials_per_block * 2),
            feedback: Vec::with_capacity(2),
        };

        self.advance(SessionPhase::FirstBlock(order[0]));
        self.run_condition(io, order[0], &trial_log, &feedback_log, &mut outcome)?;

        self.advance(SessionPhase::Gate);
        continue_gate(io.console, order[0])?;

        self.advance(SessionPhase::SecondBlock(order[1]));
        self.run_condition(io, order[1], &trial_log, &feedback_log, &mut outcome)?;

        self.advance(SessionPhase::Done);
        io.console
            .say("Thank you for your participation and feedback!")?;
        info!(
            "Session {} complete: {} trials, {} feedback records",
            outcome.session_id,
            outcome.trials.len(),
            outcome.feedback.len()
        );
        Ok(outcome)
    }

    fn run_condition(
        &self,
        io: &mut StudyIo<'_>,
        chart: ChartKind,
        trial_log: &TrialLog,
        feedback_log: &FeedbackLog,
        outcome: &mut SessionOutcome,
    ) -> Result<()> {
        let trials = self.runner.run_block(
            io,
            chart,
            self.settings.trials_per_block,
            trial_log,
            outcome.participant,
            &outcome.session_id,
        )?;
        outcome.trials.extend(trials);

        let feedback = collect_feedback(
            io.console,
            chart,
            outcome.participant,
            &outcome.session_id,
            feedback_log,
        )?;
        outcome.feedback.push(feedback);
        Ok(())
    }

    fn advance(&mut self, next: SessionPhase) {
        info!("Session phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}

/// Re-prompts until the participant number is valid. Only a closed input ends the loop early.
pub fn prompt_participant(console: &mut dyn Console, max: u32) -> Result<ParticipantId> {
    loop {
        let input = console.ask(&format!("What number user is this (1-{max})? "))?;
        if let Some(participant) = ParticipantId::parse(&input, max) {
            return Ok(participant);
        }
        console.say(&format!(
            "Please enter a valid user number between 1 and {max}."
        ))?;
    }
}

fn continue_gate(console: &mut dyn Console, finished: ChartKind) -> Result<()> {
    console.say(&format!(
        "You have completed the first half of the evaluation with {}s.",
        finished.display_name()
    ))?;
    console.say(&format!(
        "If you would like to continue with the {} evaluation, please press enter.",
        finished.other().display_name()
    ))?;
    console.ask("")?;
    Ok(())
}
