//! # Scheduling Engine
//!
//! This crate provides a deterministic, time-stepped simulation of preemptive
//! CPU scheduling policies.
//!
//! ## Purpose
//!
//! The engine advances a discrete clock one tick at a time over a workload of
//! processes, each described by an arrival time and an alternating sequence of
//! CPU and I/O bursts. At every tick it decides which process (if any)
//! occupies the CPU, models fixed-cost context switches, and records a
//! timeline (Gantt chart) plus per-process and aggregate metrics.
//!
//! ## Philosophy
//!
//! - **Determinism first**: Same workload + same policy parameters => same
//!   timeline, same metrics. There is one logical clock, one CPU, and no real
//!   concurrency; no two ticks interleave.
//! - **Mechanism, not policy**: The engine owns the clock, the blocked set,
//!   the running slot, and context-switch modeling. Everything policy-specific
//!   (queue ordering, preemption rules, aging) lives behind the
//!   [`SchedulingPolicy`] trait.
//! - **No hidden yields**: Preemption is explicit, per-tick, and testable.
//! - **Inspectable**: The timeline, the audit log of scheduling events, and
//!   all process state are accessible after (and during) a run.
//!
//! ## Policies
//!
//! - [`PriorityAgingPolicy`]: preemptive priority scheduling with periodic
//!   aging of waiting processes.
//! - [`MultiLevelQueuePolicy`]: a round-robin interactive queue with strict
//!   priority over a FCFS batch queue, quantum-based preemption within the
//!   interactive queue.

pub mod audit;
pub mod engine;
pub mod error;
pub mod multi_level;
pub mod policy;
pub mod priority_aging;
pub mod process;
pub mod report;
pub mod timeline;

pub use audit::{AuditLog, PreemptionReason, SchedulerEvent};
pub use engine::{EngineConfig, Simulation};
pub use error::WorkloadError;
pub use multi_level::MultiLevelQueuePolicy;
pub use policy::SchedulingPolicy;
pub use priority_aging::PriorityAgingPolicy;
pub use process::{PriorityChange, Process};
pub use report::{AggregateMetrics, ProcessMetrics, RunReport};
pub use timeline::{Segment, SegmentLabel, Timeline};
