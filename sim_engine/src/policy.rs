//! Pluggable scheduling policy seam
//!
//! The engine owns the process arena and passes it into every policy call;
//! policies keep only indices into the arena, never copies of processes, so
//! there is a single source of truth for mutable process state.

use crate::audit::{AuditLog, PreemptionReason};
use crate::error::WorkloadError;
use crate::process::Process;

/// Policy-specific scheduling decisions
///
/// One policy instance is held by the engine via dynamic dispatch. The engine
/// drives the loop and calls these hooks in a fixed order each tick; the
/// policy owns its ready structures and nothing else.
pub trait SchedulingPolicy {
    /// Human-readable policy name, for reports
    fn name(&self) -> &'static str;

    /// Validates that the workload carries what this policy needs
    ///
    /// Called once at engine construction, before the first tick.
    fn validate(&self, processes: &[Process]) -> Result<(), WorkloadError>;

    /// Admits a process into the policy's ready structures
    ///
    /// The policy marks the process Ready and stores its arena index. Called
    /// on arrival, on I/O completion, and on re-queue after preemption.
    fn enqueue(&mut self, processes: &mut [Process], index: usize);

    /// Picks the next process to dispatch, or None if nothing is ready
    fn select_next(&mut self, processes: &mut [Process]) -> Option<usize>;

    /// Decides whether the running process must yield the CPU
    ///
    /// Called once per tick the process runs without completing its burst.
    /// When the answer is `Some`, the policy has already re-queued the
    /// process per its own rule; the engine closes the timeline segment,
    /// clears the running slot, and begins a context switch.
    fn check_preemption(
        &mut self,
        processes: &mut [Process],
        running: usize,
    ) -> Option<PreemptionReason>;

    /// Per-tick bookkeeping hook (aging, or a no-op)
    ///
    /// The engine calls this every tick, unconditionally; policies without
    /// periodic work simply do nothing.
    fn periodic_update(&mut self, processes: &mut [Process], clock: u64, audit: &mut AuditLog);

    /// True if any ready structure holds a process
    fn has_ready(&self) -> bool;
}
