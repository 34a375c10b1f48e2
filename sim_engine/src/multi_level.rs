//! Multi-level queue scheduling (round-robin over FCFS)
//!
//! Two ready queues with strict priority between them: interactive processes
//! are served round-robin with a fixed time quantum, batch processes are
//! served first-come-first-served and only when no interactive work is ready.
//! A running batch process is preempted unconditionally the moment
//! interactive work appears, and keeps its position by re-entering the FCFS
//! queue at the front.

use crate::audit::{AuditLog, PreemptionReason};
use crate::error::WorkloadError;
use crate::policy::SchedulingPolicy;
use crate::process::Process;
use core_types::{ProcessState, QueueClass};
use std::collections::VecDeque;

/// Multi-level queue policy state
#[derive(Debug)]
pub struct MultiLevelQueuePolicy {
    /// Round-robin queue of interactive process indices
    rr_queue: VecDeque<usize>,
    /// FCFS queue of batch process indices
    fcfs_queue: VecDeque<usize>,
    /// Round-robin time quantum, in ticks
    quantum: u64,
    /// Ticks the currently running interactive process has used of its quantum
    quantum_used: u64,
}

impl MultiLevelQueuePolicy {
    /// Creates the policy
    ///
    /// Rejects a non-positive time quantum.
    pub fn new(quantum: u64) -> Result<Self, WorkloadError> {
        if quantum == 0 {
            return Err(WorkloadError::InvalidQuantum);
        }
        Ok(Self {
            rr_queue: VecDeque::new(),
            fcfs_queue: VecDeque::new(),
            quantum,
            quantum_used: 0,
        })
    }

    fn class_of(processes: &[Process], index: usize) -> QueueClass {
        processes[index].class.unwrap_or(QueueClass::Batch)
    }
}

impl SchedulingPolicy for MultiLevelQueuePolicy {
    fn name(&self) -> &'static str {
        "multi-level-queue"
    }

    fn validate(&self, processes: &[Process]) -> Result<(), WorkloadError> {
        for process in processes {
            if process.class.is_none() {
                return Err(WorkloadError::MissingQueueClass(process.pid));
            }
        }
        Ok(())
    }

    fn enqueue(&mut self, processes: &mut [Process], index: usize) {
        processes[index].state = ProcessState::Ready;
        match Self::class_of(processes, index) {
            QueueClass::Interactive => self.rr_queue.push_back(index),
            QueueClass::Batch => self.fcfs_queue.push_back(index),
        }
    }

    fn select_next(&mut self, processes: &mut [Process]) -> Option<usize> {
        let index = self
            .rr_queue
            .pop_front()
            .or_else(|| self.fcfs_queue.pop_front())?;
        if Self::class_of(processes, index) == QueueClass::Interactive {
            self.quantum_used = 0;
        }
        Some(index)
    }

    fn check_preemption(
        &mut self,
        processes: &mut [Process],
        running: usize,
    ) -> Option<PreemptionReason> {
        match Self::class_of(processes, running) {
            QueueClass::Batch => {
                // Interactive work always wins; the batch process keeps its
                // position by going back to the front of the FCFS queue.
                if self.rr_queue.is_empty() {
                    return None;
                }
                processes[running].state = ProcessState::Ready;
                self.fcfs_queue.push_front(running);
                Some(PreemptionReason::InteractiveReady)
            }
            QueueClass::Interactive => {
                self.quantum_used += 1;
                if self.quantum_used < self.quantum {
                    return None;
                }
                if !self.rr_queue.is_empty() {
                    self.enqueue(processes, running);
                    return Some(PreemptionReason::QuantumExpired);
                }
                // Sole ready process anywhere: let it keep the CPU and start
                // a fresh quantum instead of re-checking every tick.
                if self.fcfs_queue.is_empty() {
                    self.quantum_used = 0;
                }
                None
            }
        }
    }

    fn periodic_update(&mut self, _processes: &mut [Process], _clock: u64, _audit: &mut AuditLog) {
        // No aging in this policy.
    }

    fn has_ready(&self) -> bool {
        !self.rr_queue.is_empty() || !self.fcfs_queue.is_empty()
    }
}
