use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use chart_study_lib::console::LineConsole;
use chart_study_lib::logs::{FEEDBACK_HEADER, TRIAL_HEADER};
use chart_study_lib::models::{AbsenceMatrix, ChartKind};
use chart_study_lib::render::ChartRenderer;
use chart_study_lib::session::{SessionController, SessionPhase};
use chart_study_lib::settings::{DisplaySettings, StudySettings};
use chart_study_lib::trial::StudyIo;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

#[derive(Default)]
struct CountingRenderer {
    shown: Vec<ChartKind>,
}

impl ChartRenderer for CountingRenderer {
    fn render(&mut self, _matrix: &AbsenceMatrix, kind: ChartKind) -> Result<()> {
        self.shown.push(kind);
        Ok(())
    }

    fn dismiss(&mut self) -> Result<()> {
        Ok(())
    }

    fn blank(&mut self, _duration: Duration) -> Result<()> {
        Ok(())
    }
}

fn settings_in(dir: &Path) -> StudySettings {
    StudySettings {
        trial_log_path: dir.join("user_data.csv"),
        feedback_log_path: dir.join("user_feedback.csv"),
        diagnostics_log_path: None,
        seed: Some(42),
        display: DisplaySettings {
            blank_after_answer_millis: 0,
            ..DisplaySettings::default()
        },
        ..StudySettings::default()
    }
}

/// Participant line, two blocks of `answers`, feedback after each, gate between.
fn script(participant: &str, answers: &[&str]) -> String {
    let mut lines = vec![participant.to_string()];
    for block in 0..2 {
        lines.extend(answers.iter().map(|a| a.to_string()));
        lines.extend(["7".to_string(), "8".to_string(), format!("comments {block}")]);
        if block == 0 {
            lines.push(String::new());
        }
    }
    let mut script = lines.join("\n");
    script.push('\n');
    script
}

struct Run {
    renderer: CountingRenderer,
    output: String,
    outcome: chart_study_lib::session::SessionOutcome,
}

fn run(settings: StudySettings, input: String) -> Run {
    let mut console = LineConsole::new(Cursor::new(input), Vec::new());
    let mut renderer = CountingRenderer::default();
    let mut rng = StdRng::seed_from_u64(settings.seed.unwrap_or_default());
    let mut controller = SessionController::new(settings);
    let outcome = {
        let mut io = StudyIo {
            console: &mut console,
            renderer: &mut renderer,
            rng: &mut rng,
        };
        controller.run_session(&mut io).unwrap()
    };
    assert_eq!(controller.phase(), SessionPhase::Done);
    Run {
        renderer,
        output: String::from_utf8(console.into_output()).unwrap(),
        outcome,
    }
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn odd_low_participant_sees_scatter_first() {
    let dir = tempdir().unwrap();
    let settings = settings_in(dir.path());
    let answers = ["1"; 10];
    let run = run(settings.clone(), script("3", &answers));

    assert_eq!(run.outcome.order, [ChartKind::Scatter, ChartKind::Heatmap]);
    assert_eq!(run.renderer.shown.len(), 20);
    assert!(run.renderer.shown[..10].iter().all(|&k| k == ChartKind::Scatter));
    assert!(run.renderer.shown[10..].iter().all(|&k| k == ChartKind::Heatmap));
    assert!(run
        .output
        .contains("You have completed the first half of the evaluation with scatter plots."));
    assert!(run.output.trim_end().ends_with("Thank you for your participation and feedback!"));

    let trials = read_rows(&settings.trial_log_path);
    assert_eq!(trials.len(), 21);
    assert_eq!(trials[0], TRIAL_HEADER);
    for (i, row) in trials[1..].iter().enumerate() {
        assert_eq!(row.len(), TRIAL_HEADER.len());
        assert_eq!(row[0], run.outcome.session_id.as_str());
        assert_eq!(row[1], "3");
        assert_eq!(row[2], ((i % 10) + 1).to_string());
        assert_eq!(row[4], if i < 10 { "scatter" } else { "heat" });
        assert_ne!(row[3], "August");
        assert!(row[5] == "highest" || row[5] == "lowest");
        assert_eq!(row[6], "1");
        assert!(row[7].starts_with("School ["));
        assert!(row[11] == "Correct" || row[11] == "Wrong");
        let matrix: AbsenceMatrix = serde_json::from_str(&row[12]).unwrap();
        assert_eq!((matrix.num_schools(), matrix.num_months()), (10, 12));
    }

    let feedback = read_rows(&settings.feedback_log_path);
    assert_eq!(feedback.len(), 3);
    assert_eq!(feedback[0], FEEDBACK_HEADER);
    assert_eq!(feedback[1][2], "scatter plot");
    assert_eq!(feedback[2][2], "heatmap");
    assert_eq!(feedback[1][3..], ["7", "8", "comments 0"]);
    assert_eq!(feedback[2][5], "comments 1");
}

#[test]
fn high_participant_sees_heatmap_first() {
    let dir = tempdir().unwrap();
    let run = run(settings_in(dir.path()), script("8", &["2"; 10]));

    assert_eq!(run.outcome.order, [ChartKind::Heatmap, ChartKind::Scatter]);
    assert_eq!(run.renderer.shown[0], ChartKind::Heatmap);
    assert_eq!(run.renderer.shown[19], ChartKind::Scatter);
    assert_eq!(run.outcome.feedback[0].chart, ChartKind::Heatmap);
    assert!(run
        .output
        .contains("continue with the scatter plot evaluation, please press enter."));
}

#[test]
fn unusable_answers_are_logged_as_wrong() {
    let dir = tempdir().unwrap();
    let settings = settings_in(dir.path());
    let answers = ["abc", "11", "0", "", "-1", "abc", "11", "0", "", "-1"];
    let run = run(settings.clone(), script("5", &answers));

    assert!(run.outcome.trials.iter().all(|t| !t.result.is_correct));
    let trials = read_rows(&settings.trial_log_path);
    for row in &trials[1..] {
        assert_eq!(row[9], "");
        assert_eq!(row[11], "Wrong");
    }
    assert_eq!(trials[1][6], "abc");
    assert_eq!(trials[2][6], "11");
}

#[test]
fn invalid_participant_numbers_are_reprompted() {
    let dir = tempdir().unwrap();
    let mut input = String::from("zero\n0\n12\n");
    input.push_str(&script("10", &["1"; 10]));
    let run = run(settings_in(dir.path()), input);

    assert_eq!(run.outcome.participant.get(), 10);
    assert_eq!(
        run.output
            .matches("Please enter a valid user number between 1 and 10.")
            .count(),
        3
    );
}

#[test]
fn second_session_appends_without_repeating_headers() {
    let dir = tempdir().unwrap();
    let settings = settings_in(dir.path());
    run(settings.clone(), script("1", &["1"; 10]));
    run(settings.clone(), script("6", &["4"; 10]));

    let trials = read_rows(&settings.trial_log_path);
    assert_eq!(trials.len(), 41);
    assert_eq!(trials.iter().filter(|r| r[0] == "SessionID").count(), 1);
    assert_eq!(trials[21][1], "6");

    let feedback = read_rows(&settings.feedback_log_path);
    assert_eq!(feedback.len(), 5);
    assert_eq!(feedback.iter().filter(|r| r[0] == "SessionID").count(), 1);
}

#[test]
fn closed_input_mid_block_keeps_completed_trials() {
    let dir = tempdir().unwrap();
    let settings = settings_in(dir.path());
    let mut console = LineConsole::new(Cursor::new("2\n1\n1\n1\n"), Vec::new());
    let mut renderer = CountingRenderer::default();
    let mut rng = StdRng::seed_from_u64(1);
    let mut controller = SessionController::new(settings.clone());
    let mut io = StudyIo {
        console: &mut console,
        renderer: &mut renderer,
        rng: &mut rng,
    };

    assert!(controller.run_session(&mut io).is_err());
    assert_eq!(controller.phase(), SessionPhase::FirstBlock(ChartKind::Scatter));
    assert_eq!(read_rows(&settings.trial_log_path).len(), 1 + 3);
    assert_eq!(read_rows(&settings.feedback_log_path).len(), 1);
}
