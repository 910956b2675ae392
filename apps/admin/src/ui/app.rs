//! App shell: owns the state, runs the prompt loop and executes reducer effects.
//!
//! Typed lines and worker events are multiplexed; a pending request never holds up the prompt.

use std::{
    fs,
    io::{BufRead, Write},
    path::{Path, PathBuf},
    thread,
};

use anyhow::{Context, Result};
use client_core::{pagination_controls, PageControlKind, ViewParameters};
use crossbeam_channel::{bounded, never, select, Receiver, Sender};
use shared::error::{Operation, OperationFailed};

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::{Intent, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{AdminState, Effect};
use crate::ui::console::{parse_command, Command, HELP};
use crate::ui::render::render_screen;

pub struct AdminApp {
    state: AdminState,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    export_dir: PathBuf,
    pending: usize,
}

impl AdminApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, settings: &Settings) -> Self {
        Self {
            state: AdminState::new(ViewParameters::with_page_size(settings.page_size)),
            cmd_tx,
            ui_rx,
            export_dir: settings.export_dir.clone(),
            pending: 0,
        }
    }

    pub fn state(&self) -> &AdminState {
        &self.state
    }

    /// Requests the catalog; the result arrives later through [`AdminApp::run`].
    pub fn start(&mut self) {
        let effects = self.state.start();
        self.execute(effects);
    }

    pub fn handle_intent(&mut self, intent: Intent) {
        let effects = self.state.handle_intent(intent);
        self.execute(effects);
    }

    fn on_event(&mut self, event: UiEvent) {
        self.pending = self.pending.saturating_sub(1);
        self.state.apply_event(event);
    }

    fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Dispatch(cmd) => self.dispatch(cmd),
                Effect::WriteExport { file_name, bytes } => {
                    match write_export(&self.export_dir, &file_name, &bytes) {
                        Ok(path) => {
                            tracing::info!(path = %path.display(), "exported page");
                            self.state.notice = Some(format!("Exported {}", path.display()));
                        }
                        Err(err) => {
                            tracing::warn!("export failed: {err:#}");
                            self.state.apply_event(UiEvent::Failed(OperationFailed::new(
                                Operation::Export,
                                format!("Export failed: {err:#}"),
                            )));
                        }
                    }
                }
            }
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        let operation = cmd.operation();
        match dispatch_backend_command(&self.cmd_tx, cmd) {
            Ok(()) => self.pending += 1,
            Err(message) => self
                .state
                .apply_event(UiEvent::Failed(OperationFailed::new(operation, message))),
        }
    }

    fn navigate(&self, kind: PageControlKind) -> Option<Intent> {
        let view = self.state.view();
        pagination_controls(view.current_page, view.total_pages)
            .into_iter()
            .find(|control| control.kind == kind && !control.disabled)
            .map(|control| Intent::SetPage(control.target))
    }

    /// Handles one typed line. Returns `false` once the user quits.
    fn handle_line<W: Write>(&mut self, line: &str, output: &mut W) -> Result<bool> {
        match parse_command(line) {
            Ok(Command::Quit) => return Ok(false),
            Ok(Command::Help) => {
                writeln!(output, "{HELP}").context("failed to write help")?;
                return Ok(true);
            }
            Ok(Command::Show) => {}
            Ok(Command::Navigate(kind)) => {
                if let Some(intent) = self.navigate(kind) {
                    self.handle_intent(intent);
                }
            }
            Ok(Command::Intent(intent)) => self.handle_intent(intent),
            Err(message) => {
                writeln!(output, "{message}").context("failed to write error")?;
                return Ok(true);
            }
        }
        render(&self.state, output)?;
        Ok(true)
    }

    /// Drives the console until `quit` or the end of input.
    ///
    /// Lines and worker events are served in arrival order, so commands keep working while a
    /// request is in flight and its result is drawn whenever it lands.
    pub fn run<W: Write>(&mut self, lines: Receiver<String>, mut output: W) -> Result<()> {
        write!(output, "{}", render_screen(&self.state)).context("failed to write screen")?;
        output.flush().context("failed to flush output")?;

        let mut worker_alive = true;
        loop {
            let events = if worker_alive {
                self.ui_rx.clone()
            } else {
                never()
            };
            select! {
                recv(lines) -> line => match line {
                    Ok(line) => {
                        if !self.handle_line(&line, &mut output)? {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                recv(events) -> event => match event {
                    Ok(event) => {
                        self.on_event(event);
                        render(&self.state, &mut output)?;
                    }
                    Err(_) => {
                        tracing::error!(pending = self.pending, "backend worker disconnected");
                        self.pending = 0;
                        self.state.notice = Some("Backend worker disconnected".to_string());
                        worker_alive = false;
                        render(&self.state, &mut output)?;
                    }
                },
            }
        }

        if self.pending > 0 {
            tracing::warn!(pending = self.pending, "quitting with requests still in flight");
        }
        Ok(())
    }
}

fn render<W: Write>(state: &AdminState, output: &mut W) -> Result<()> {
    write!(output, "\n{}", render_screen(state)).context("failed to write screen")?;
    output.flush().context("failed to flush output")
}

/// Feeds lines from `input` into a channel from a dedicated thread.
///
/// The thread ends at end of input or once the receiving side is gone.
pub fn spawn_line_reader<R>(input: R) -> Receiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = bounded(16);
    thread::spawn(move || {
        for line in input.lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    tracing::warn!("failed to read command: {err}");
                    break;
                }
            }
        }
    });
    rx
}

fn write_export(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory '{}'", dir.display()))?;
    let path = dir.join(file_name);
    fs::write(&path, bytes).with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(path)
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
