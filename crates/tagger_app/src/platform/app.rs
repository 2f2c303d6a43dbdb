use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use tagger_core::{update, Msg, WizardSession};
use tagger_logging::{tagger_debug, tagger_info, tagger_warn};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::input::{self, Command};
use super::ui::render;

/// How long to block for a suggestion answer before handing the prompt back.
const SUGGEST_WAIT: Duration = Duration::from_secs(15);
const GENERATE_POLL: Duration = Duration::from_millis(250);

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    tagger_info!(
        "Starting tagger variant={:?} shortener_configured={} suggestions_configured={}",
        config.variant,
        config.shortener.endpoint.is_some(),
        config.suggestions.api_key.is_some()
    );

    let runner = EffectRunner::new(config.engine_config());
    let mut driver = Driver {
        session: WizardSession::new(config.wizard_config()),
        runner,
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    driver.show(&mut stdout, true)?;
    loop {
        driver.drain();
        driver.wait_for_collaborators();
        driver.show(&mut stdout, false)?;

        write!(stdout, "> ").context("writing prompt")?;
        stdout.flush().context("flushing prompt")?;

        let Some(line) = lines.next() else {
            tagger_info!("Input closed; exiting");
            break;
        };
        let line = line.context("reading input")?;

        match input::parse_line(&line, &driver.session.view()) {
            Command::Dispatch(msgs) => {
                for msg in msgs {
                    driver.dispatch(msg);
                }
            }
            Command::Help => writeln!(stdout, "{}", input::HELP).context("writing help")?,
            Command::Invalid(reason) => writeln!(stdout, "{reason}").context("writing reply")?,
            Command::Quit => break,
        }
    }
    Ok(())
}

struct Driver {
    session: WizardSession,
    runner: EffectRunner,
}

impl Driver {
    fn dispatch(&mut self, msg: Msg) {
        tagger_debug!("Dispatch {:?}", msg);
        let session = std::mem::take(&mut self.session);
        let (session, effects) = update(session, msg);
        self.session = session;
        self.runner.run(effects);
    }

    /// Applies every engine completion that is already waiting.
    fn drain(&mut self) {
        while let Some(msg) = self.runner.try_poll() {
            self.dispatch(msg);
        }
    }

    /// Generation locks the wizard, so block until it finishes. Suggestions get a bounded wait.
    fn wait_for_collaborators(&mut self) {
        while self.session.is_generating() {
            if let Some(msg) = self.runner.poll(GENERATE_POLL) {
                self.dispatch(msg);
            }
        }
        if self.session.is_suggesting() {
            match self.runner.poll(SUGGEST_WAIT) {
                Some(msg) => self.dispatch(msg),
                None => tagger_warn!("No suggestions after {:?}", SUGGEST_WAIT),
            }
        }
    }

    fn show(&mut self, out: &mut impl Write, force: bool) -> anyhow::Result<()> {
        if self.session.consume_dirty() || force {
            write!(out, "{}", render::render(&self.session.view())).context("writing view")?;
        }
        Ok(())
    }
}
