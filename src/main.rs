/*!
 * Scheduling Simulator - Main Entry Point
 *
 * Interactive shell over a single simulated CPU:
 * - Process creation and control
 * - FIFO, SJF, Priority and Round-Robin runs
 * - Turnaround and waiting metrics
 */

use anyhow::Context;
use sched_sim::shell::{render, Flow, Shell};
use sched_sim::{init_tracing, ProcessManager, SimConfig};
use std::io::{self, BufRead, Write};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing().context("failed to initialize tracing")?;

    let config = SimConfig::from_env().context("failed to load configuration")?;
    info!(clock = ?config.clock, seed = ?config.random.seed, "Simulator starting");

    let manager = ProcessManager::builder().with_config(config).build();
    let mut shell = Shell::new(manager);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "=== Process Scheduling Simulator ===")?;
    writeln!(stdout, "{}", render::HELP)?;

    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "\nsim> ")?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            writeln!(stdout)?;
            break;
        };
        let line = line.context("failed to read from stdin")?;

        match shell.handle_line(&line) {
            Flow::Continue(output) if output.is_empty() => {}
            Flow::Continue(output) => writeln!(stdout, "{}", output)?,
            Flow::Exit => break,
        }
    }

    info!("Simulator exiting");
    Ok(())
}
