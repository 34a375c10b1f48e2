//! Preemptive priority scheduling with aging
//!
//! A single ready list ordered by (current priority, arrival time), lower
//! priority value = more urgent. The running process is preempted whenever a
//! strictly more urgent process reaches the front of the list. Every tick a
//! waiting process ages; at each positive multiple of the aging interval its
//! current priority steps one toward the urgency floor (0), which prevents
//! starvation.

use crate::audit::{AuditLog, PreemptionReason, SchedulerEvent};
use crate::error::WorkloadError;
use crate::policy::SchedulingPolicy;
use crate::process::{PriorityChange, Process};
use core_types::ProcessState;

/// Priority-with-aging policy state
#[derive(Debug)]
pub struct PriorityAgingPolicy {
    /// Arena indices of ready processes, kept sorted by (priority, arrival)
    ready: Vec<usize>,
    /// Aging interval in ticks; 0 disables aging
    aging_interval: u64,
}

impl PriorityAgingPolicy {
    /// Creates the policy
    ///
    /// An interval of 0 disables aging entirely.
    pub fn new(aging_interval: u64) -> Self {
        Self {
            ready: Vec::new(),
            aging_interval,
        }
    }

    fn sort_ready(&mut self, processes: &[Process]) {
        self.ready.sort_by_key(|&index| {
            let process = &processes[index];
            (
                process.current_priority.unwrap_or(u32::MAX),
                process.arrival,
            )
        });
    }
}

impl SchedulingPolicy for PriorityAgingPolicy {
    fn name(&self) -> &'static str {
        "priority-with-aging"
    }

    fn validate(&self, processes: &[Process]) -> Result<(), WorkloadError> {
        for process in processes {
            if process.priority.is_none() {
                return Err(WorkloadError::MissingPriority(process.pid));
            }
        }
        Ok(())
    }

    fn enqueue(&mut self, processes: &mut [Process], index: usize) {
        let process = &mut processes[index];
        process.state = ProcessState::Ready;
        process.ready_wait = 0;
        self.ready.push(index);
        self.sort_ready(processes);
    }

    fn select_next(&mut self, _processes: &mut [Process]) -> Option<usize> {
        if self.ready.is_empty() {
            None
        } else {
            Some(self.ready.remove(0))
        }
    }

    fn check_preemption(
        &mut self,
        processes: &mut [Process],
        running: usize,
    ) -> Option<PreemptionReason> {
        let front = *self.ready.first()?;
        let front_priority = processes[front].current_priority?;
        let running_priority = processes[running].current_priority?;
        if front_priority < running_priority {
            self.enqueue(processes, running);
            Some(PreemptionReason::HigherPriorityReady)
        } else {
            None
        }
    }

    fn periodic_update(&mut self, processes: &mut [Process], clock: u64, audit: &mut AuditLog) {
        let mut promoted = false;
        for &index in &self.ready {
            let process = &mut processes[index];
            process.ready_wait += 1;
            if self.aging_interval == 0 || process.ready_wait % self.aging_interval != 0 {
                continue;
            }
            if let Some(priority) = process.current_priority {
                if priority > 0 {
                    let new_priority = priority - 1;
                    process.current_priority = Some(new_priority);
                    process.priority_history.push(PriorityChange {
                        at: clock,
                        priority: new_priority,
                    });
                    audit.push(SchedulerEvent::PriorityAged {
                        pid: process.pid,
                        new_priority,
                        at: clock,
                    });
                    promoted = true;
                }
            }
        }
        if promoted {
            self.sort_ready(processes);
        }
    }

    fn has_ready(&self) -> bool {
        !self.ready.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Pid;

    fn workload() -> Vec<Process> {
        vec![
            Process::with_priority(Pid::new(1), 0, vec![7, 2, 5], 3),
            Process::with_priority(Pid::new(2), 3, vec![2, 4, 5], 1),
            Process::with_priority(Pid::new(3), 1, vec![4], 3),
        ]
    }

    #[test]
    fn test_ready_list_orders_by_priority_then_arrival() {
        let mut processes = workload();
        let mut policy = PriorityAgingPolicy::new(0);
        policy.enqueue(&mut processes, 0);
        policy.enqueue(&mut processes, 2);
        policy.enqueue(&mut processes, 1);

        // P2 (priority 1) first, then P1 and P3 (priority 3) by arrival.
        assert_eq!(policy.select_next(&mut processes), Some(1));
        assert_eq!(policy.select_next(&mut processes), Some(0));
        assert_eq!(policy.select_next(&mut processes), Some(2));
        assert_eq!(policy.select_next(&mut processes), None);
    }

    #[test]
    fn test_preempts_only_on_strictly_more_urgent_front() {
        let mut processes = workload();
        let mut policy = PriorityAgingPolicy::new(0);

        // P3 (priority 3) waiting while P1 (priority 3) runs: equal, no preempt.
        policy.enqueue(&mut processes, 2);
        processes[0].state = ProcessState::Running;
        assert_eq!(policy.check_preemption(&mut processes, 0), None);

        // P2 (priority 1) arrives: strictly more urgent than running P1.
        policy.enqueue(&mut processes, 1);
        assert_eq!(
            policy.check_preemption(&mut processes, 0),
            Some(PreemptionReason::HigherPriorityReady)
        );
        // The preempted process went back into the ready list.
        assert_eq!(processes[0].state, ProcessState::Ready);
        assert!(policy.has_ready());
    }

    #[test]
    fn test_aging_steps_priority_at_interval_multiples() {
        let mut processes = workload();
        let mut policy = PriorityAgingPolicy::new(2);
        let mut audit = AuditLog::new();
        policy.enqueue(&mut processes, 0);

        policy.periodic_update(&mut processes, 10, &mut audit);
        assert_eq!(processes[0].current_priority, Some(3));
        policy.periodic_update(&mut processes, 11, &mut audit);
        assert_eq!(processes[0].current_priority, Some(2));
        policy.periodic_update(&mut processes, 12, &mut audit);
        assert_eq!(processes[0].current_priority, Some(2));
        policy.periodic_update(&mut processes, 13, &mut audit);
        assert_eq!(processes[0].current_priority, Some(1));

        let history: Vec<(u64, u32)> = processes[0]
            .priority_history
            .iter()
            .map(|change| (change.at, change.priority))
            .collect();
        assert_eq!(history, vec![(0, 3), (11, 2), (13, 1)]);
    }

    #[test]
    fn test_aging_never_passes_the_urgency_floor() {
        let mut processes = vec![Process::with_priority(Pid::new(1), 0, vec![5], 1)];
        let mut policy = PriorityAgingPolicy::new(1);
        let mut audit = AuditLog::new();
        policy.enqueue(&mut processes, 0);

        for tick in 0..5 {
            policy.periodic_update(&mut processes, tick, &mut audit);
        }
        assert_eq!(processes[0].current_priority, Some(0));
        // One promotion recorded, then the floor holds.
        assert_eq!(processes[0].priority_history.len(), 2);
    }

    #[test]
    fn test_zero_interval_disables_aging() {
        let mut processes = workload();
        let mut policy = PriorityAgingPolicy::new(0);
        let mut audit = AuditLog::new();
        policy.enqueue(&mut processes, 0);

        for tick in 0..100 {
            policy.periodic_update(&mut processes, tick, &mut audit);
        }
        assert_eq!(processes[0].current_priority, Some(3));
        assert!(audit.events().is_empty());
    }

    #[test]
    fn test_enqueue_resets_the_wait_counter() {
        let mut processes = workload();
        let mut policy = PriorityAgingPolicy::new(5);
        let mut audit = AuditLog::new();
        policy.enqueue(&mut processes, 0);
        for tick in 0..3 {
            policy.periodic_update(&mut processes, tick, &mut audit);
        }
        assert_eq!(processes[0].ready_wait, 3);

        let index = policy.select_next(&mut processes).unwrap();
        policy.enqueue(&mut processes, index);
        assert_eq!(processes[0].ready_wait, 0);
    }

    #[test]
    fn test_validate_rejects_missing_priority() {
        let processes = vec![Process::with_class(
            Pid::new(1),
            0,
            vec![5],
            core_types::QueueClass::Batch,
        )];
        let policy = PriorityAgingPolicy::new(0);
        assert_eq!(
            policy.validate(&processes),
            Err(WorkloadError::MissingPriority(Pid::new(1)))
        );
    }
}
