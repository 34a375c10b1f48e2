//! Serializable run reports
//!
//! A [`RunReport`] is the engine's complete output for one run: per-process
//! metrics, aggregate averages, the timeline, and the audit trail, stamped
//! with a fresh run id. Rendering (tables, Gantt charts, JSON) is a
//! downstream concern.

use crate::audit::AuditLog;
use crate::process::{PriorityChange, Process};
use crate::timeline::Timeline;
use core_types::{Pid, QueueClass, RunId};
use serde::{Deserialize, Serialize};

/// Final metrics for a single process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub arrival: u64,
    pub bursts: Vec<u64>,
    pub priority: Option<u32>,
    pub class: Option<QueueClass>,
    pub start: Option<u64>,
    pub completion: Option<u64>,
    pub waiting: Option<u64>,
    pub turnaround: Option<u64>,
    pub response: Option<u64>,
    /// Full aging history; empty for class-based workloads
    pub priority_history: Vec<PriorityChange>,
}

impl ProcessMetrics {
    /// Extracts the metric view of a process after a run
    pub fn from_process(process: &Process) -> Self {
        Self {
            pid: process.pid,
            arrival: process.arrival,
            bursts: process.bursts.clone(),
            priority: process.priority,
            class: process.class,
            start: process.start_time,
            completion: process.completion_time,
            waiting: process.waiting_time,
            turnaround: process.turnaround_time,
            response: process.response_time,
            priority_history: process.priority_history.clone(),
        }
    }
}

/// Aggregate metrics over all processes in a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
    pub avg_response: f64,
    /// Busy ticks over final timeline time, as a percentage in [0, 100]
    pub cpu_utilization: f64,
}

/// Complete output of one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    /// Policy name, e.g. "priority-with-aging"
    pub policy: String,
    pub processes: Vec<ProcessMetrics>,
    pub aggregate: AggregateMetrics,
    pub timeline: Timeline,
    pub events: AuditLog,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_view_copies_process_fields() {
        let mut process = Process::with_priority(Pid::new(4), 2, vec![3, 1, 2], 5);
        process.completion_time = Some(12);
        process.turnaround_time = Some(10);
        process.waiting_time = Some(4);
        process.response_time = Some(1);

        let metrics = ProcessMetrics::from_process(&process);
        assert_eq!(metrics.pid, Pid::new(4));
        assert_eq!(metrics.completion, Some(12));
        assert_eq!(metrics.waiting, Some(4));
        assert_eq!(metrics.priority, Some(5));
        assert_eq!(metrics.priority_history.len(), 1);
    }

    #[test]
    fn test_default_aggregate_is_zero() {
        let aggregate = AggregateMetrics::default();
        assert_eq!(aggregate.avg_waiting, 0.0);
        assert_eq!(aggregate.cpu_utilization, 0.0);
    }
}
