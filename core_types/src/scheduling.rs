//! Lifecycle states and queue classes for simulated processes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a simulated process
///
/// A process occupies exactly one state at any instant. Transitions are
/// driven by the scheduling engine: New -> Ready on arrival, Ready -> Running
/// on dispatch, Running -> Ready on preemption, Running -> Blocked when a CPU
/// burst completes with an I/O burst pending, Blocked -> Ready on I/O
/// completion, and Running -> Terminated when the final burst completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessState {
    /// Created but not yet arrived
    New,
    /// Eligible to run, waiting in a ready queue
    Ready,
    /// Currently occupying the CPU
    Running,
    /// Waiting for a modeled I/O burst to finish
    Blocked,
    /// All bursts complete
    Terminated,
}

impl ProcessState {
    /// Checks if the process is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessState::Terminated)
    }

    /// Checks if the process is eligible for CPU time
    pub fn is_schedulable(&self) -> bool {
        matches!(self, ProcessState::Ready | ProcessState::Running)
    }
}

/// Ready-queue class for multi-level queue scheduling
///
/// Interactive processes are served round-robin with strict priority over
/// batch processes, which are served first-come-first-served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueClass {
    /// Foreground work, round-robin queue
    Interactive,
    /// Background work, FCFS queue
    Batch,
}

impl fmt::Display for QueueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueClass::Interactive => write!(f, "FG(RR)"),
            QueueClass::Batch => write!(f, "BG(FCFS)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(ProcessState::Terminated.is_terminal());
        assert!(!ProcessState::Running.is_terminal());
        assert!(!ProcessState::Blocked.is_terminal());
    }

    #[test]
    fn test_schedulable_states() {
        assert!(ProcessState::Ready.is_schedulable());
        assert!(ProcessState::Running.is_schedulable());
        assert!(!ProcessState::New.is_schedulable());
        assert!(!ProcessState::Blocked.is_schedulable());
    }

    #[test]
    fn test_queue_class_display() {
        assert_eq!(QueueClass::Interactive.to_string(), "FG(RR)");
        assert_eq!(QueueClass::Batch.to_string(), "BG(FCFS)");
    }
}
