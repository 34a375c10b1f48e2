//! Workload and configuration validation errors

use core_types::Pid;
use thiserror::Error;

/// Errors detected while validating a workload or policy configuration
///
/// All of these are construction-time failures: the simulation refuses to
/// start rather than run over invalid input. The simulation loop itself is a
/// closed deterministic computation over validated input and reports no
/// recoverable errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkloadError {
    /// A process was supplied with no bursts at all
    #[error("process {0} has an empty burst sequence")]
    EmptyBurstSequence(Pid),

    /// Burst durations must be positive
    #[error("process {0} has a zero-length burst")]
    ZeroLengthBurst(Pid),

    /// Burst sequences alternate CPU/IO/CPU/... and must end on a CPU burst
    #[error("process {0} has a burst sequence ending in an I/O burst")]
    TrailingIoBurst(Pid),

    /// Two processes share the same pid
    #[error("duplicate process id {0}")]
    DuplicatePid(Pid),

    /// The priority-with-aging policy requires a static priority per process
    #[error("process {0} has no priority assigned")]
    MissingPriority(Pid),

    /// The multi-level queue policy requires a queue class per process
    #[error("process {0} has no queue class assigned")]
    MissingQueueClass(Pid),

    /// The round-robin time quantum must be positive
    #[error("time quantum must be positive")]
    InvalidQuantum,
}
