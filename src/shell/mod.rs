/*!
 * Interactive Shell
 * Command dispatcher over a simulation session
 */

pub mod command;
pub mod render;

pub use command::{Command, CommandError, JsonTarget};

use crate::core::errors::{ProcessError, SchedulerError};
use crate::process::{ProcessManager, ProcessSpec};
use log::info;
use miette::Diagnostic;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;

/// Anything a shell command can fail with
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ShellError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Failed to encode output: {0}")]
    #[diagnostic(code(shell::encode_failed))]
    Encode(String),
}

/// What the read loop should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Print the text (possibly empty) and read the next line
    Continue(String),
    Exit,
}

/// Line-oriented front end for one session
pub struct Shell {
    manager: ProcessManager,
    rng: StdRng,
}

impl Shell {
    /// Random parameters are seeded from the configuration when a seed is set
    pub fn new(manager: ProcessManager) -> Self {
        let rng = match manager.config().random.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { manager, rng }
    }

    #[inline]
    pub fn manager(&self) -> &ProcessManager {
        &self.manager
    }

    /// Parse and execute one line. Errors are rendered, never propagated.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        let result = Command::parse(line)
            .map_err(ShellError::from)
            .and_then(|command| match command {
                Some(command) => self.execute(command),
                None => Ok(Flow::Continue(String::new())),
            });

        match result {
            Ok(flow) => flow,
            Err(e) => Flow::Continue(format!("Error: {}", e)),
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Flow, ShellError> {
        let output = match command {
            Command::Create {
                name,
                cpu_demand,
                memory,
                priority,
            } => {
                let random = &self.manager.config().random;
                let rng = &mut self.rng;
                let cpu_demand = cpu_demand.unwrap_or_else(|| rng.gen_range(random.demand.range()));
                let memory = memory.unwrap_or_else(|| rng.gen_range(random.memory.range()));
                let priority = priority.unwrap_or_else(|| rng.gen_range(random.priority.range()));

                let spec = ProcessSpec::new(name)
                    .with_demand(cpu_demand)
                    .with_memory(memory)
                    .with_priority(priority);
                let p = self.manager.spawn(spec);
                format!(
                    "Process {} created with PID {} (cpu={}, mem={}, prio={})",
                    p.name(),
                    p.pid(),
                    p.total_demand(),
                    p.memory(),
                    p.priority()
                )
            }
            Command::List => render::process_table(&self.manager.list_processes()),
            Command::Run(policy) => {
                let summary = match self.manager.run(&policy) {
                    Ok(report) => render::run_report(&report),
                    Err(e @ SchedulerError::InvariantViolation { .. }) => {
                        render::aborted_run(e.executed(), &e.to_string())
                    }
                    Err(e) => return Err(e.into()),
                };
                format!(
                    "{}\n\n{}",
                    summary,
                    render::metrics(&self.manager.metrics())
                )
            }
            Command::Block(pid) => {
                self.manager.block(pid)?;
                format!("Process {} blocked.", pid)
            }
            Command::Unblock(pid) => {
                self.manager.unblock(pid)?;
                format!("Process {} unblocked.", pid)
            }
            Command::Kill(pid) => {
                self.manager.kill(pid)?;
                format!("Process {} terminated.", pid)
            }
            Command::Metrics => render::metrics(&self.manager.metrics()),
            Command::Stats => render::stats(&self.manager.stats()),
            Command::Json(target) => match target {
                JsonTarget::Processes => to_json(&self.manager.list_processes())?,
                JsonTarget::Metrics => to_json(&self.manager.metrics())?,
                JsonTarget::Stats => to_json(&self.manager.stats())?,
            },
            Command::Help => render::HELP.to_string(),
            Command::Exit => {
                info!("Shell exit requested");
                return Ok(Flow::Exit);
            }
        };
        Ok(Flow::Continue(output))
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ShellError> {
    serde_json::to_string_pretty(value).map_err(|e| ShellError::Encode(e.to_string()))
}
