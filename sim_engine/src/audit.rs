//! Audit trail of scheduling decisions
//!
//! The engine and policies record every scheduling decision as a typed event
//! with its tick timestamp. The log is serializable and is how tests (and
//! reports) verify behavior without re-deriving it from the timeline.

use core_types::Pid;
use serde::{Deserialize, Serialize};

/// Reason a running process lost the CPU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreemptionReason {
    /// A strictly more urgent priority appeared at the front of the ready list
    HigherPriorityReady,
    /// An interactive process exhausted its round-robin quantum
    QuantumExpired,
    /// A batch process yielded to ready interactive work
    InteractiveReady,
}

/// Scheduling event for the audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerEvent {
    /// Process was selected to run
    ProcessSelected { pid: Pid, at: u64 },
    /// Process was preempted and re-queued
    ProcessPreempted {
        pid: Pid,
        reason: PreemptionReason,
        at: u64,
    },
    /// Process finished a CPU burst and entered its I/O burst
    ProcessBlocked { pid: Pid, at: u64 },
    /// Process finished its final burst
    ProcessTerminated { pid: Pid, at: u64 },
    /// A waiting process was promoted one urgency step by aging
    PriorityAged { pid: Pid, new_priority: u32, at: u64 },
    /// The CPU went idle with no ready work
    CpuIdle { at: u64 },
}

/// Append-only log of scheduler events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditLog {
    events: Vec<SchedulerEvent>,
}

impl AuditLog {
    /// Creates an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an event
    pub fn push(&mut self, event: SchedulerEvent) {
        self.events.push(event);
    }

    /// All recorded events, in order
    pub fn events(&self) -> &[SchedulerEvent] {
        &self.events
    }

    /// Clears the log
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
