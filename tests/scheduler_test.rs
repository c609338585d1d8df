/*!
 * Scheduler Tests
 * End-to-end runs for every policy through the session facade
 */

use pretty_assertions::assert_eq;
use sched_sim::{
    HaltReason, ProcessError, ProcessManager, ProcessState, SchedulerError, SchedulingPolicy,
};

fn session(specs: &[(&str, u32, i32)]) -> ProcessManager {
    let pm = ProcessManager::new();
    for &(name, demand, priority) in specs {
        pm.create_process(name, demand, 100, priority);
    }
    pm
}

#[test]
fn test_fifo_drains_first_process_before_next() {
    let pm = session(&[("P1", 3, 3), ("P2", 2, 3)]);

    let report = pm.run("fifo").unwrap();

    assert_eq!(report.schedule(), vec![1, 1, 1, 2, 2]);
    assert_eq!(report.cycles(), 5);
    assert_eq!(report.halt, HaltReason::AllCompleted);
    assert!(pm
        .list_processes()
        .iter()
        .all(|p| p.state() == ProcessState::Finished));
}

#[test]
fn test_sjf_prefers_least_remaining() {
    let pm = session(&[("P1", 5, 3), ("P2", 2, 3)]);

    let report = pm.run("sjf").unwrap();

    assert_eq!(report.schedule(), vec![2, 2, 1, 1, 1, 1, 1]);
    assert_eq!(report.cycles(), 7);
}

#[test]
fn test_sjf_is_preemptive_between_runs() {
    let pm = session(&[("long", 4, 3)]);
    pm.block(1).unwrap();
    pm.create_process("short", 1, 10, 3);
    pm.unblock(1).unwrap();

    // The shorter job jumps ahead even though it was created later
    let report = pm.run_policy(SchedulingPolicy::ShortestJobFirst).unwrap();
    assert_eq!(report.schedule()[0], 2);
}

#[test]
fn test_priority_lowest_value_runs_first() {
    let pm = session(&[("P1", 2, 5), ("P2", 2, 1)]);

    let report = pm.run("prio").unwrap();

    assert_eq!(report.schedule(), vec![2, 2, 1, 1]);
}

#[test]
fn test_round_robin_alternates() {
    let pm = session(&[("P1", 2, 3), ("P2", 2, 3)]);

    let report = pm.run("rr").unwrap();

    assert_eq!(report.schedule(), vec![1, 2, 1, 2]);
    let remaining: Vec<u32> = report.trace.iter().map(|e| e.remaining).collect();
    assert_eq!(remaining, vec![1, 1, 0, 0]);
    assert!(report.trace[2].finished);
    assert!(report.trace[3].finished);
}

#[test]
fn test_blocked_only_table_halts_immediately() {
    for policy in SchedulingPolicy::ALL {
        let pm = session(&[("P1", 3, 3)]);
        pm.block(1).unwrap();

        let report = pm.run_policy(policy).unwrap();

        assert_eq!(report.cycles(), 0);
        assert_eq!(report.halt, HaltReason::NoReadyProcess { unfinished: vec![1] });
        assert_eq!(pm.find_process(1).unwrap().state(), ProcessState::Blocked);
    }
}

#[test]
fn test_run_skips_blocked_and_reports_leftovers() {
    let pm = session(&[("P1", 2, 3), ("P2", 1, 3)]);
    pm.block(1).unwrap();

    let report = pm.run("fifo").unwrap();

    assert_eq!(report.schedule(), vec![2]);
    assert!(report.halt.is_deadlock());

    pm.unblock(1).unwrap();
    let report = pm.run("fifo").unwrap();
    assert_eq!(report.schedule(), vec![1, 1]);
    assert_eq!(report.halt, HaltReason::AllCompleted);
}

#[test]
fn test_round_robin_discarded_process_is_unreachable() {
    let pm = session(&[("P1", 2, 3), ("P2", 2, 3)]);
    pm.block(1).unwrap();

    let report = pm.run("rr").unwrap();
    assert_eq!(report.schedule(), vec![2, 2]);
    assert_eq!(report.halt, HaltReason::NoReadyProcess { unfinished: vec![1] });

    pm.unblock(1).unwrap();
    let err = pm.run("rr").unwrap_err();

    assert!(matches!(err, SchedulerError::InvariantViolation { .. }));
    assert!(err.executed().is_empty());
    assert_eq!(pm.stats().invariant_violations, 1);
    // Other policies still see the process
    assert_eq!(pm.run("fifo").unwrap().schedule(), vec![1, 1]);
}

#[test]
fn test_fatal_halt_keeps_executed_cycles() {
    let pm = session(&[("P1", 2, 3), ("P2", 1, 3)]);
    pm.block(1).unwrap();
    pm.run("rr").unwrap();
    pm.unblock(1).unwrap();
    pm.create_process("P3", 2, 100, 3);
    let cycles_before = pm.stats().total_cycles;

    // P3 is reachable through the rotation, P1 was discarded from it
    let err = pm.run("rr").unwrap_err();

    let SchedulerError::InvariantViolation { trace, .. } = &err else {
        panic!("expected a fatal halt, got {:?}", err);
    };
    let pids: Vec<u32> = trace.iter().map(|e| e.pid).collect();
    assert_eq!(pids, vec![3, 3]);
    assert!(trace[1].finished);

    let p3 = pm.find_process(3).unwrap();
    assert_eq!(p3.state(), ProcessState::Finished);
    assert_eq!(p3.completed_at(), Some(3));

    let stats = pm.stats();
    assert_eq!(stats.total_cycles, cycles_before + 2);
    assert_eq!(stats.completions, 2);
    assert_eq!(stats.invariant_violations, 1);
}

#[test]
fn test_unknown_policy_leaves_session_untouched() {
    let pm = session(&[("P1", 2, 3)]);
    let before = pm.list_processes();

    assert_eq!(
        pm.run("lottery").unwrap_err(),
        SchedulerError::InvalidPolicy("lottery".to_string())
    );
    assert_eq!(pm.list_processes(), before);
    assert_eq!(pm.stats().runs, 0);
}

#[test]
fn test_logical_clock_metrics() {
    let pm = session(&[("P1", 3, 3), ("P2", 2, 3)]);
    pm.run("fifo").unwrap();

    let rows = pm.metrics();
    assert_eq!(rows[0].turnaround, Some(3));
    assert_eq!(rows[0].waiting, Some(0));
    assert_eq!(rows[1].turnaround, Some(5));
    assert_eq!(rows[1].waiting, Some(3));
}

#[test]
fn test_kill_is_not_repeatable() {
    let pm = session(&[("P1", 3, 3)]);
    pm.run("fifo").unwrap();
    let finished = pm.find_process(1).unwrap();

    assert_eq!(pm.kill(1), Err(ProcessError::AlreadyFinished(1)));

    let after = pm.find_process(1).unwrap();
    assert_eq!(after.completed_at(), finished.completed_at());
    assert_eq!(after.remaining_demand(), 0);
}

#[test]
fn test_killed_process_is_never_scheduled() {
    let pm = session(&[("P1", 3, 3), ("P2", 1, 3)]);
    pm.kill(1).unwrap();

    let report = pm.run("rr").unwrap();

    assert_eq!(report.schedule(), vec![2]);
    let killed = pm.find_process(1).unwrap();
    assert_eq!(killed.remaining_demand(), 0);
    assert_eq!(killed.completed_at(), Some(0));
}

#[test]
fn test_stats_accumulate_across_runs() {
    let pm = session(&[("P1", 1, 3), ("P2", 1, 3)]);
    pm.block(2).unwrap();
    pm.run("fifo").unwrap();
    pm.unblock(2).unwrap();
    pm.run("prio").unwrap();

    let stats = pm.stats();
    assert_eq!(stats.runs, 2);
    assert_eq!(stats.total_cycles, 2);
    assert_eq!(stats.completions, 2);
    assert_eq!(stats.deadlocks, 1);
    assert_eq!(stats.last_policy, Some(SchedulingPolicy::Priority));
}
