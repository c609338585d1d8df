/*!
 * Metrics Reporter
 * Per-process turnaround and waiting time, in table order
 */

use super::table::ProcessTable;
use super::types::{Process, ProcessState};
use crate::core::types::Pid;
use serde::Serialize;

/// One row of the metrics report
///
/// `turnaround` and `waiting` are present only for finished processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MetricsRow {
    pub pid: Pid,
    pub name: String,
    pub state: ProcessState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnaround: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiting: Option<i64>,
}

impl From<&Process> for MetricsRow {
    fn from(p: &Process) -> Self {
        Self {
            pid: p.pid(),
            name: p.name().to_string(),
            state: p.state(),
            turnaround: p.turnaround(),
            waiting: p.waiting(),
        }
    }
}

/// Build the report; no aggregate is computed
#[must_use]
pub fn report(table: &ProcessTable) -> Vec<MetricsRow> {
    table.list_all().iter().map(MetricsRow::from).collect()
}
