/*!
 * Shell Commands
 * Line parser for the interactive dispatcher
 */

use crate::core::types::{CpuUnits, MemorySize, Pid, Priority};
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// Command parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    #[diagnostic(code(shell::unknown_command), help("Type `help` for the command list."))]
    Unknown(String),

    #[error("Usage: {0}")]
    #[diagnostic(code(shell::usage))]
    Usage(&'static str),

    #[error("Invalid {what}: '{value}'")]
    #[diagnostic(code(shell::invalid_argument))]
    InvalidArgument { what: &'static str, value: String },
}

/// Output formats selectable with `json <target>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonTarget {
    Processes,
    Metrics,
    Stats,
}

/// Parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Numbers left out are drawn at random by the dispatcher
    Create {
        name: String,
        cpu_demand: Option<CpuUnits>,
        memory: Option<MemorySize>,
        priority: Option<Priority>,
    },
    List,
    Run(String),
    Block(Pid),
    Unblock(Pid),
    Kill(Pid),
    Metrics,
    Stats,
    Json(JsonTarget),
    Help,
    Exit,
}

const CREATE_USAGE: &str = "create <name> [cpu] [mem] [prio]";
const RUN_USAGE: &str = "run <fifo|sjf|rr|prio>";
const JSON_USAGE: &str = "json <list|metrics|stats>";

impl Command {
    /// Parse one input line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((head, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match head.to_lowercase().as_str() {
            "create" => parse_create(args)?,
            "list" | "ls" => Command::List,
            "run" => match args.first() {
                Some(policy) => Command::Run(policy.to_string()),
                None => return Err(CommandError::Usage(RUN_USAGE)),
            },
            "block" => Command::Block(parse_pid(args, "block <pid>")?),
            "unblock" => Command::Unblock(parse_pid(args, "unblock <pid>")?),
            "kill" => Command::Kill(parse_pid(args, "kill <pid>")?),
            "metrics" => Command::Metrics,
            "stats" => Command::Stats,
            "json" => Command::Json(match args.first().map(|a| a.to_lowercase()).as_deref() {
                Some("list") | Some("processes") => JsonTarget::Processes,
                Some("metrics") => JsonTarget::Metrics,
                Some("stats") => JsonTarget::Stats,
                _ => return Err(CommandError::Usage(JSON_USAGE)),
            }),
            "help" | "?" => Command::Help,
            "exit" | "quit" => Command::Exit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn parse_pid(args: &[&str], usage: &'static str) -> Result<Pid, CommandError> {
    let raw = args.first().ok_or(CommandError::Usage(usage))?;
    raw.parse::<Pid>()
        .map_err(|_| CommandError::InvalidArgument {
            what: "pid",
            value: raw.to_string(),
        })
}

/// `create <name...> [cpu] [mem] [prio]`
///
/// Up to three trailing integers are taken as cpu, mem and prio in that order;
/// everything before them is the name. The first token always belongs to the
/// name, so `create 42` names a process "42".
fn parse_create(args: &[&str]) -> Result<Command, CommandError> {
    if args.is_empty() {
        return Err(CommandError::Usage(CREATE_USAGE));
    }

    let numeric_tail = args[1..]
        .iter()
        .rev()
        .take_while(|a| a.parse::<i64>().is_ok())
        .count()
        .min(3);
    let split = args.len() - numeric_tail;
    let name = args[..split].join(" ");
    let numbers: Vec<i64> = args[split..]
        .iter()
        .filter_map(|a| a.parse::<i64>().ok())
        .collect();

    // Negative demand is floored like any demand below 1
    let cpu_demand = numbers
        .first()
        .map(|&n| n.clamp(0, i64::from(CpuUnits::MAX)) as CpuUnits);
    let memory = numbers
        .get(1)
        .map(|&n| {
            MemorySize::try_from(n).map_err(|_| CommandError::InvalidArgument {
                what: "memory",
                value: n.to_string(),
            })
        })
        .transpose()?;
    let priority = numbers
        .get(2)
        .map(|&n| {
            Priority::try_from(n).map_err(|_| CommandError::InvalidArgument {
                what: "priority",
                value: n.to_string(),
            })
        })
        .transpose()?;

    Ok(Command::Create {
        name,
        cpu_demand,
        memory,
        priority,
    })
}
