use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::info;
use rand::RngCore;

use super::timer::ResponseTimer;
use crate::console::Console;
use crate::evaluation::evaluate;
use crate::generator::{generate, pick_question, GenerationConfig};
use crate::log_warn;
use crate::logs::TrialLog;
use crate::models::{ChartKind, ParticipantId, SessionId, TrialRecord};
use crate::render::ChartRenderer;
use crate::settings::StudySettings;

const ENABLE_LOGS: bool = true;

/// The collaborators a session talks to: participant I/O, the stimulus
/// display and the random source.
pub struct StudyIo<'a> {
    pub console: &'a mut dyn Console,
    pub renderer: &'a mut dyn ChartRenderer,
    pub rng: &'a mut dyn RngCore,
}

/// Runs blocks of independent trials for one chart condition.
#[derive(Debug, Clone)]
pub struct TrialRunner {
    num_schools: usize,
    num_months: usize,
    generation: GenerationConfig,
    blank_after_answer: Duration,
}

impl TrialRunner {
    pub fn new(
        num_schools: usize,
        num_months: usize,
        generation: GenerationConfig,
        blank_after_answer: Duration,
    ) -> Self {
        Self {
            num_schools,
            num_months,
            generation,
            blank_after_answer,
        }
    }

    pub fn from_settings(settings: &StudySettings) -> Self {
        Self::new(
            settings.num_schools,
            settings.num_months,
            GenerationConfig::default(),
            settings.blank_after_answer(),
        )
    }

    /// Run `count` trials and append each record to `log` as soon as it exists.
    pub fn run_block(
        &self,
        io: &mut StudyIo<'_>,
        chart: ChartKind,
        count: usize,
        log: &TrialLog,
        participant: ParticipantId,
        session_id: &SessionId,
    ) -> Result<Vec<TrialRecord>> {
        info!(
            "Starting {} block of {} trials for participant {}",
            chart.display_name(),
            count,
            participant
        );
        let mut records = Vec::with_capacity(count);
        for trial in 1..=count {
            let record = self.run_trial(io, chart, trial, participant, session_id)?;
            log.append(&record).with_context(|| {
                format!(
                    "failed to log trial {} of the {} block",
                    trial,
                    chart.display_name()
                )
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// One stimulus-question-answer cycle. Nothing is written here.
    pub fn run_trial(
        &self,
        io: &mut StudyIo<'_>,
        chart: ChartKind,
        trial: usize,
        participant: ParticipantId,
        session_id: &SessionId,
    ) -> Result<TrialRecord> {
        io.console.say(&format!("\nTrial {trial}"))?;

        let question = pick_question(&mut *io.rng, self.num_months, &self.generation)?;
        let matrix = generate(&mut *io.rng, self.num_schools, self.num_months, &self.generation)?;

        io.renderer
            .render(&matrix, chart)
            .with_context(|| format!("failed to show trial {trial} stimulus"))?;
        io.renderer.dismiss()?;

        let mut timer = ResponseTimer::new();
        timer.start(Instant::now());
        let answer = io.console.ask(&format!("{}\n", question.prompt()))?;
        let response_secs = {
            let now = Instant::now();
            timer.stop(now);
            timer.elapsed_secs(now)
        };

        if !self.blank_after_answer.is_zero() {
            io.renderer.blank(self.blank_after_answer)?;
        }

        let result = evaluate(&answer, &matrix, question);
        if result.user_absence_value.is_none() {
            log_warn!(
                "Trial {} answer {:?} does not name a school (1-{})",
                trial,
                answer,
                self.num_schools
            );
        }
        info!(
            "Trial {} [{}] {} in {}: {} after {:.2}s",
            trial,
            chart.trial_label(),
            question.polarity.as_str(),
            question.month_name(),
            if result.is_correct { "correct" } else { "wrong" },
            response_secs
        );

        Ok(TrialRecord {
            session_id: session_id.clone(),
            participant,
            trial,
            chart,
            question,
            answer,
            result,
            response_secs,
            matrix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::LineConsole;
    use crate::models::AbsenceMatrix;
    use chrono::{TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingRenderer {
        events: Vec<String>,
        fail_render: bool,
    }

    impl ChartRenderer for RecordingRenderer {
        fn render(&mut self, matrix: &AbsenceMatrix, kind: ChartKind) -> Result<()> {
            if self.fail_render {
                anyhow::bail!("no display");
            }
            self.events
                .push(format!("render {} {}x{}", kind.trial_label(), matrix.num_schools(), matrix.num_months()));
            Ok(())
        }

        fn dismiss(&mut self) -> Result<()> {
            self.events.push("dismiss".into());
            Ok(())
        }

        fn blank(&mut self, duration: Duration) -> Result<()> {
            self.events.push(format!("blank {}", duration.as_millis()));
            Ok(())
        }
    }

    fn session_id() -> SessionId {
        SessionId::from_datetime(&Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap())
    }

    fn runner() -> TrialRunner {
        TrialRunner::new(10, 12, GenerationConfig::default(), Duration::from_millis(5))
    }

    #[test]
    fn block_logs_every_trial() {
        let dir = tempdir().unwrap();
        let log = TrialLog::open(dir.path().join("trials.csv")).unwrap();
        let mut console = LineConsole::new(Cursor::new("1\n2\nabc\n"), Vec::new());
        let mut renderer = RecordingRenderer::default();
        let mut rng = StdRng::seed_from_u64(11);
        let participant = ParticipantId::parse("2", 10).unwrap();

        let records = {
            let mut io = StudyIo {
                console: &mut console,
                renderer: &mut renderer,
                rng: &mut rng,
            };
            runner()
                .run_block(&mut io, ChartKind::Heatmap, 3, &log, participant, &session_id())
                .unwrap()
        };

        assert_eq!(records.len(), 3);
        assert_eq!(records.iter().map(|r| r.trial).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(records.iter().all(|r| r.chart == ChartKind::Heatmap));
        assert_eq!(records[2].answer, "abc");
        assert!(!records[2].result.is_correct);
        assert_eq!(records[2].result.user_absence_value, None);

        assert_eq!(
            renderer.events,
            ["render heat 10x12", "dismiss", "blank 5"].repeat(3)
        );

        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.starts_with("\nTrial 1\nWhat is the school with the "));
        assert!(output.contains("\nTrial 3\n"));

        let contents = std::fs::read_to_string(log.csv().path()).unwrap();
        assert_eq!(contents.lines().count(), 4);
    }

    #[test]
    fn records_agree_with_the_evaluator() {
        let mut console = LineConsole::new(Cursor::new("4\n"), Vec::new());
        let mut renderer = RecordingRenderer::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut io = StudyIo {
            console: &mut console,
            renderer: &mut renderer,
            rng: &mut rng,
        };

        let record = runner()
            .run_trial(&mut io, ChartKind::Scatter, 1, ParticipantId::parse("1", 10).unwrap(), &session_id())
            .unwrap();

        assert_ne!(record.question.month, crate::models::AUGUST);
        assert_eq!(record.result, evaluate("4", &record.matrix, record.question));
        assert_eq!(record.result.user_absence_value, record.matrix.get(3, record.question.month));
        assert!(record.response_secs >= 0.0);
    }

    #[test]
    fn zero_blank_interval_skips_blank_screen() {
        let mut console = LineConsole::new(Cursor::new("1\n"), Vec::new());
        let mut renderer = RecordingRenderer::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut io = StudyIo {
            console: &mut console,
            renderer: &mut renderer,
            rng: &mut rng,
        };
        TrialRunner::new(10, 12, GenerationConfig::default(), Duration::ZERO)
            .run_trial(&mut io, ChartKind::Scatter, 1, ParticipantId::parse("1", 10).unwrap(), &session_id())
            .unwrap();
        assert_eq!(renderer.events, vec!["render scatter 10x12", "dismiss"]);
    }

    #[test]
    fn render_failure_aborts_before_asking() {
        let mut console = LineConsole::new(Cursor::new("1\n"), Vec::new());
        let mut renderer = RecordingRenderer {
            fail_render: true,
            ..RecordingRenderer::default()
        };
        let mut rng = StdRng::seed_from_u64(2);
        let mut io = StudyIo {
            console: &mut console,
            renderer: &mut renderer,
            rng: &mut rng,
        };
        let err = runner()
            .run_trial(&mut io, ChartKind::Scatter, 1, ParticipantId::parse("1", 10).unwrap(), &session_id())
            .unwrap_err();
        assert!(format!("{err:#}").contains("no display"));
        drop(io);
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(!output.contains("What is the school"));
    }

    #[test]
    fn undecodable_answer_is_logged_as_wrong() {
        let dir = tempdir().unwrap();
        let log = TrialLog::open(dir.path().join("trials.csv")).unwrap();
        let mut console = LineConsole::new(Cursor::new(b"\xff\xfe\n".to_vec()), Vec::new());
        let mut renderer = RecordingRenderer::default();
        let mut rng = StdRng::seed_from_u64(4);
        let mut io = StudyIo {
            console: &mut console,
            renderer: &mut renderer,
            rng: &mut rng,
        };

        let records = runner()
            .run_block(&mut io, ChartKind::Scatter, 1, &log, ParticipantId::parse("1", 10).unwrap(), &session_id())
            .unwrap();
        assert_eq!(records[0].answer, "\u{fffd}\u{fffd}");
        assert!(!records[0].result.is_correct);
        assert_eq!(records[0].result.user_absence_value, None);

        let mut reader = csv::Reader::from_path(log.csv().path()).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][9], "");
        assert_eq!(&rows[0][11], "Wrong");
    }

    #[test]
    fn closed_input_is_fatal() {
        let mut console = LineConsole::new(Cursor::new(""), Vec::new());
        let mut renderer = RecordingRenderer::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut io = StudyIo {
            console: &mut console,
            renderer: &mut renderer,
            rng: &mut rng,
        };
        assert!(runner()
            .run_trial(&mut io, ChartKind::Scatter, 1, ParticipantId::parse("1", 10).unwrap(), &session_id())
            .is_err());
    }
}
