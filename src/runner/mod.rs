//! Step runner
//!
//! Runs the setup scripts one after another. Each script's combined output is
//! read line by line: log commands are applied to the environment snapshot
//! that the following scripts receive, everything else is forwarded to the
//! console. The first failure ends the run.

pub mod env;
pub mod log_command;
pub mod process;
pub mod steps;

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use colored::Colorize;

use crate::common::{Error, Result};
use env::Environment;
use log_command::LogLine;
use process::ScriptProcess;
use steps::Step;

pub use steps::STEPS;

/// Where the runner is in the step list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    /// Index of the step currently executing
    Running(usize),
    /// Terminal, with the exit code the run ends with
    Failed(i32),
    Succeeded,
}

/// Sequential step runner
pub struct Runner<W: Write> {
    env: Environment,
    scripts_dir: PathBuf,
    console: W,
    state: State,
}

impl<W: Write> Runner<W> {
    pub fn new(env: Environment, scripts_dir: impl Into<PathBuf>, console: W) -> Self {
        Self {
            env,
            scripts_dir: scripts_dir.into(),
            console,
            state: State::Idle,
        }
    }

    /// The snapshot the next step would be started with
    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn into_console(self) -> W {
        self.console
    }

    /// Run `steps` in order, stopping at the first failure
    pub fn run(&mut self, steps: &[Step]) -> Result<()> {
        for (index, step) in steps.iter().enumerate() {
            self.state = State::Running(index);

            if let Err(e) = self.run_step(step) {
                self.state = State::Failed(e.exit_code());
                return Err(e);
            }
        }

        self.state = State::Succeeded;
        Ok(())
    }

    fn run_step(&mut self, step: &Step) -> Result<()> {
        writeln!(self.console, "{}", format!("==== {} ====", step.name).bold())?;
        self.console.flush()?;

        let started = Instant::now();
        let path = self.scripts_dir.join(step.script);
        let mut script = ScriptProcess::spawn(&path, &self.env)?;

        let mut line = Vec::new();
        while script.read_line(&mut line)? {
            self.handle_line(&line)?;
        }

        let code = script.wait()?;
        let elapsed = started.elapsed();

        if code != 0 {
            writeln!(
                self.console,
                "{}",
                format!("==== failure: {} ====", step.name).red().bold()
            )?;
            writeln!(self.console, "exit code: {code}")?;
            self.console.flush()?;

            tracing::debug!(step = %step, code, ?elapsed, "step failed");
            return Err(Error::step_failed(step.name, code));
        }

        writeln!(
            self.console,
            "{}",
            format!("==== success: {} ====", step.name).green().bold()
        )?;
        writeln!(self.console)?;
        self.console.flush()?;

        tracing::info!(step = %step, ?elapsed, "step finished");
        Ok(())
    }

    fn handle_line(&mut self, raw: &[u8]) -> Result<()> {
        let text = String::from_utf8_lossy(raw);

        match LogLine::parse(&text) {
            LogLine::AddPath(fragment) => {
                tracing::debug!(fragment, "prepending to PATH");
                self.env.prepend_path(fragment);
            }
            LogLine::SetVariable { name, value } => {
                tracing::debug!(name, "setting variable");
                self.env.set(name, value);
            }
            LogLine::Unsupported(line) => {
                writeln!(self.console, "ERROR: unsupported log command: {line}")?;
                self.console.flush()?;
                return Err(Error::UnsupportedLogCommand(line.to_string()));
            }
            LogLine::Plain(_) => {
                // an unterminated final line still gets its own line
                self.console.write_all(raw)?;
                self.console.write_all(b"\n")?;
            }
        }

        Ok(())
    }
}
