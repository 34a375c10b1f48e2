//! Simulated process entity
//!
//! A [`Process`] carries both the static workload description (arrival time,
//! burst sequence, priority or queue class) and the mutable runtime state the
//! engine drives through the lifecycle state machine, plus the metric fields
//! populated at the end of a run.

use core_types::{Pid, ProcessState, QueueClass};
use serde::{Deserialize, Serialize};

/// A recorded priority change, for the aging report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityChange {
    /// Clock value at which the change took effect
    pub at: u64,
    /// The new (more urgent) priority
    pub priority: u32,
}

/// A single process in the scheduling simulation
///
/// Bursts alternate CPU/IO/CPU/... starting with a CPU burst; even burst
/// indices are CPU time, odd indices are I/O time. Exactly one of `priority`
/// (lower = more urgent) or `class` is set, depending on which policy the
/// workload targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Process {
    /// Workload-assigned identity
    pub pid: Pid,
    /// Arrival time, immutable once constructed
    pub arrival: u64,
    /// Alternating CPU/IO burst durations
    pub bursts: Vec<u64>,
    /// Static priority, lower = more urgent (priority-with-aging workloads)
    pub priority: Option<u32>,
    /// Ready-queue class (multi-level queue workloads)
    pub class: Option<QueueClass>,

    // Runtime state, driven by the engine
    /// Current lifecycle state
    pub state: ProcessState,
    /// Index of the active burst; monotonically non-decreasing
    pub burst_index: usize,
    /// Time remaining in the active burst
    pub remaining: u64,
    /// Current priority, mutated by aging
    pub current_priority: Option<u32>,
    /// Ticks spent waiting in the ready queue since last enqueued
    pub ready_wait: u64,
    /// History of (clock, priority) changes, starting with the initial value
    pub priority_history: Vec<PriorityChange>,

    // Metrics, unset until computed
    /// Clock value at first dispatch
    pub start_time: Option<u64>,
    /// Clock value at which the final burst completed
    pub completion_time: Option<u64>,
    /// Completion minus arrival
    pub turnaround_time: Option<u64>,
    /// Turnaround minus total burst time
    pub waiting_time: Option<u64>,
    /// First-dispatch delay; set exactly once
    pub response_time: Option<u64>,
}

impl Process {
    fn new(pid: Pid, arrival: u64, bursts: Vec<u64>) -> Self {
        let remaining = bursts.first().copied().unwrap_or(0);
        Self {
            pid,
            arrival,
            bursts,
            priority: None,
            class: None,
            state: ProcessState::New,
            burst_index: 0,
            remaining,
            current_priority: None,
            ready_wait: 0,
            priority_history: Vec::new(),
            start_time: None,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
            response_time: None,
        }
    }

    /// Creates a process for the priority-with-aging policy
    ///
    /// The priority history starts with the initial value at time 0.
    pub fn with_priority(pid: Pid, arrival: u64, bursts: Vec<u64>, priority: u32) -> Self {
        let mut process = Self::new(pid, arrival, bursts);
        process.priority = Some(priority);
        process.current_priority = Some(priority);
        process.priority_history.push(PriorityChange { at: 0, priority });
        process
    }

    /// Creates a process for the multi-level queue policy
    pub fn with_class(pid: Pid, arrival: u64, bursts: Vec<u64>, class: QueueClass) -> Self {
        let mut process = Self::new(pid, arrival, bursts);
        process.class = Some(class);
        process
    }

    /// Checks if the process has finished all its bursts
    pub fn is_terminated(&self) -> bool {
        self.burst_index >= self.bursts.len()
    }

    /// Moves to the next burst and resets the remaining time
    ///
    /// Past the final burst the remaining time is left untouched; callers
    /// check [`Process::is_terminated`] and retire the process.
    pub fn advance_burst(&mut self) {
        self.burst_index += 1;
        if let Some(&burst) = self.bursts.get(self.burst_index) {
            self.remaining = burst;
        }
    }

    /// Total service demand: the sum of every burst, CPU and I/O
    pub fn total_burst_time(&self) -> u64 {
        self.bursts.iter().sum()
    }

    /// True while the active burst is CPU time (even burst index)
    pub fn on_cpu_burst(&self) -> bool {
        self.burst_index % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_process_starts_on_first_burst() {
        let p = Process::with_priority(Pid::new(1), 0, vec![7, 2, 5], 3);
        assert_eq!(p.state, ProcessState::New);
        assert_eq!(p.burst_index, 0);
        assert_eq!(p.remaining, 7);
        assert!(p.on_cpu_burst());
        assert!(!p.is_terminated());
    }

    #[test]
    fn test_advance_burst_walks_the_sequence() {
        let mut p = Process::with_class(Pid::new(2), 0, vec![4, 2, 4], QueueClass::Batch);
        p.advance_burst();
        assert_eq!(p.remaining, 2);
        assert!(!p.on_cpu_burst());
        p.advance_burst();
        assert_eq!(p.remaining, 4);
        assert!(p.on_cpu_burst());
        p.advance_burst();
        assert!(p.is_terminated());
    }

    #[test]
    fn test_priority_history_starts_with_initial_value() {
        let p = Process::with_priority(Pid::new(1), 3, vec![5], 4);
        assert_eq!(p.priority_history, vec![PriorityChange { at: 0, priority: 4 }]);
        assert_eq!(p.current_priority, Some(4));
    }

    #[test]
    fn test_class_process_has_no_priority_history() {
        let p = Process::with_class(Pid::new(1), 0, vec![5], QueueClass::Interactive);
        assert!(p.priority_history.is_empty());
        assert_eq!(p.current_priority, None);
    }

    #[test]
    fn test_total_burst_time_includes_io() {
        let p = Process::with_priority(Pid::new(1), 0, vec![7, 2, 5], 1);
        assert_eq!(p.total_burst_time(), 14);
    }
}
