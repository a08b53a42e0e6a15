pub mod console;
pub mod evaluation;
pub mod generator;
pub mod logs;
pub mod models;
pub mod render;
pub mod session;
pub mod settings;
pub mod trial;
pub mod utils;

use anyhow::Result;
use log::{error, info, warn};

use console::LineConsole;
use render::{ChartStyle, TerminalRenderer};
use session::SessionController;
use settings::{SettingsSource, SettingsStore};
use trial::StudyIo;

/// Process entry: load settings, start logging, run one participant session.
pub fn run() -> Result<()> {
    let store = SettingsStore::load(SettingsStore::default_path())?;
    let settings = store.settings().clone();

    utils::logging::init(settings.diagnostics_log_path.as_deref())?;
    info!("Chart study starting up...");
    match store.source() {
        SettingsSource::File => info!("Loaded settings from {}", store.path().display()),
        SettingsSource::Missing => info!(
            "No settings at {}; using defaults",
            store.path().display()
        ),
        SettingsSource::Unparsable(err) => warn!(
            "Ignoring unparsable settings at {}: {}",
            store.path().display(),
            err
        ),
    }
    settings.validate()?;

    let mut console = LineConsole::stdio();
    let mut renderer = TerminalRenderer::new(ChartStyle::default(), settings.display.dismiss);
    let mut rng = settings.rng();
    let mut io = StudyIo {
        console: &mut console,
        renderer: &mut renderer,
        rng: &mut rng,
    };

    let mut controller = SessionController::new(settings);
    match controller.run_session(&mut io) {
        Ok(outcome) => {
            info!(
                "Session {} finished for participant {}",
                outcome.session_id, outcome.participant
            );
            Ok(())
        }
        Err(err) => {
            error!("Session aborted in phase {:?}: {err:#}", controller.phase());
            Err(err)
        }
    }
}
