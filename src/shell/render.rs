/*!
 * Shell Rendering
 * Plain-text views of the table, run traces, metrics and statistics
 */

use crate::process::{CycleEvent, HaltReason, MetricsRow, Process, RunReport, SchedulerStats};
use std::fmt::Write;

pub const HELP: &str = "\
Commands:
  create <name> [cpu] [mem] [prio]  create a process (missing values are random)
  list                              show the process table
  run <fifo|sjf|rr|prio>            simulate until completion or deadlock
  block <pid>                       exclude a process from scheduling
  unblock <pid>                     return a blocked process to Ready
  kill <pid>                        terminate a process
  metrics                           turnaround and waiting time per process
  stats                             cumulative run statistics
  json <list|metrics|stats>         machine-readable output
  help                              this text
  exit | quit                       leave the simulator";

/// Process table in creation order
pub fn process_table(processes: &[Process]) -> String {
    if processes.is_empty() {
        return "No processes.".to_string();
    }

    let mut out = String::from("PID | Name           | CPU (left/total) | MEM | PRIO | State\n");
    out.push_str(&"-".repeat(66));
    for p in processes {
        let _ = write!(
            out,
            "\n{:>3} | {:<14} | {:>2}/{:<2}            | {:>3} | {:>4} | {}",
            p.pid(),
            p.name(),
            p.remaining_demand(),
            p.total_demand(),
            p.memory(),
            p.priority(),
            p.state()
        );
    }
    out
}

pub fn cycle_line(event: &CycleEvent) -> String {
    let mut line = format!(
        "-> Cycle {}: running {} (PID {}) | remaining: {}",
        event.cycle, event.name, event.pid, event.remaining
    );
    if event.finished {
        let _ = write!(line, "\n   Process {} finished!", event.pid);
    }
    line
}

pub fn halt_line(halt: &HaltReason) -> String {
    match halt {
        HaltReason::AllCompleted => "All processes finished!".to_string(),
        HaltReason::NoReadyProcess { unfinished } => format!(
            "No Ready process. Unfinished processes remain: {:?}",
            unfinished
        ),
    }
}

/// Full trace of a run followed by its halt condition
pub fn run_report(report: &RunReport) -> String {
    let mut out = format!(
        "=== Running simulation with {} ===",
        report.policy.as_str().to_uppercase()
    );
    for event in &report.trace {
        out.push('\n');
        out.push_str(&cycle_line(event));
    }
    let _ = write!(
        out,
        "\n{}\nSimulation completed in {} cycles.",
        halt_line(&report.halt),
        report.cycles()
    );
    out
}

/// Cycles executed before a fatal halt, then the error
pub fn aborted_run(trace: &[CycleEvent], error: &str) -> String {
    let mut out = String::from("=== Simulation aborted ===");
    for event in trace {
        out.push('\n');
        out.push_str(&cycle_line(event));
    }
    let _ = write!(out, "\nError: {}\nHalted after {} cycles.", error, trace.len());
    out
}

pub fn metrics(rows: &[MetricsRow]) -> String {
    if rows.is_empty() {
        return "No processes.".to_string();
    }

    let mut out = String::from("=== Metrics ===");
    for row in rows {
        let _ = write!(
            out,
            "\nPID {:>2} | {:<10} | State: {:<8}",
            row.pid, row.name, row.state
        );
        if let (Some(turnaround), Some(waiting)) = (row.turnaround, row.waiting) {
            let _ = write!(out, " | Turnaround: {} | Waiting: {}", turnaround, waiting);
        }
    }
    out
}

pub fn stats(stats: &SchedulerStats) -> String {
    format!(
        "Runs: {} | Cycles: {} | Completions: {} | Deadlocks: {} | Violations: {} | Last policy: {}",
        stats.runs,
        stats.total_cycles,
        stats.completions,
        stats.deadlocks,
        stats.invariant_violations,
        stats
            .last_policy
            .map(|p| p.as_str())
            .unwrap_or("none")
    )
}
