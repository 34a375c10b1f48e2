//! Time-stepped scheduling engine
//!
//! The engine owns the process arena, the clock, the blocked and terminated
//! sets, the single running slot, and context-switch modeling. Policy-specific
//! decisions are delegated to a [`SchedulingPolicy`] held via dynamic
//! dispatch.
//!
//! ## Tick order
//!
//! Each tick, in this order:
//! 1. Advance the clock (the first processed tick is t = 0).
//! 2. Admit every New process whose arrival time equals the clock.
//! 3. Decrement the I/O burst of every Blocked process; completed ones move
//!    to their next CPU burst and re-enter the ready structures.
//! 4. CPU action: finish an in-progress context switch and dispatch, or run
//!    the current process for one unit (completing or preempting it), or go
//!    from idle to switching when ready work appears.
//! 5. Invoke the policy's periodic bookkeeping hook.
//!
//! The loop ends when every process has terminated; aggregate metrics are
//! computed afterwards.

use crate::audit::{AuditLog, SchedulerEvent};
use crate::error::WorkloadError;
use crate::policy::SchedulingPolicy;
use crate::process::Process;
use crate::report::{AggregateMetrics, ProcessMetrics, RunReport};
use crate::timeline::{SegmentLabel, Timeline};
use core_types::{ProcessState, RunId};
use std::collections::HashSet;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fixed duration of a context switch, in ticks; may be zero
    pub context_switch_cost: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            context_switch_cost: 1,
        }
    }
}

/// A single deterministic simulation run
///
/// Construct with a workload and a policy, call [`Simulation::run`], then
/// read the timeline, the per-process metrics, or the full [`RunReport`].
pub struct Simulation {
    config: EngineConfig,
    policy: Box<dyn SchedulingPolicy>,
    processes: Vec<Process>,
    /// Last processed tick; meaningful once the first tick has run
    clock: u64,
    /// Next tick to process; starts at 0 so the clock begins one tick early
    next_tick: u64,
    /// Arena index of the process occupying the CPU, if any
    running: Option<usize>,
    /// Arena indices of processes waiting out an I/O burst
    blocked: Vec<usize>,
    /// Arena indices of completed processes
    terminated: Vec<usize>,
    timeline: Timeline,
    audit: AuditLog,
    cpu_busy_ticks: u64,
    switching: bool,
    switch_end: u64,
    idle: bool,
    aggregate: Option<AggregateMetrics>,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("policy", &self.policy.name())
            .field("clock", &self.clock)
            .field("next_tick", &self.next_tick)
            .field("running", &self.running)
            .field("blocked", &self.blocked)
            .field("terminated", &self.terminated)
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Creates a simulation over a validated workload
    ///
    /// Rejects empty or malformed burst sequences, duplicate pids, and
    /// workloads missing the attribute the policy schedules by. Processes are
    /// sorted by arrival time; the sort is stable so equal arrivals keep
    /// their input order.
    pub fn new(
        mut processes: Vec<Process>,
        policy: Box<dyn SchedulingPolicy>,
        config: EngineConfig,
    ) -> Result<Self, WorkloadError> {
        let mut seen = HashSet::new();
        for process in &processes {
            if process.bursts.is_empty() {
                return Err(WorkloadError::EmptyBurstSequence(process.pid));
            }
            if process.bursts.contains(&0) {
                return Err(WorkloadError::ZeroLengthBurst(process.pid));
            }
            if process.bursts.len() % 2 == 0 {
                return Err(WorkloadError::TrailingIoBurst(process.pid));
            }
            if !seen.insert(process.pid) {
                return Err(WorkloadError::DuplicatePid(process.pid));
            }
        }
        policy.validate(&processes)?;
        processes.sort_by_key(|process| process.arrival);

        Ok(Self {
            config,
            policy,
            processes,
            clock: 0,
            next_tick: 0,
            running: None,
            blocked: Vec::new(),
            terminated: Vec::new(),
            timeline: Timeline::new(),
            audit: AuditLog::new(),
            cpu_busy_ticks: 0,
            switching: false,
            switch_end: 0,
            idle: false,
            aggregate: None,
        })
    }

    /// Runs the simulation to completion
    ///
    /// An empty workload runs zero ticks and reports zero aggregates.
    pub fn run(&mut self) {
        while self.terminated.len() < self.processes.len() {
            self.step();
        }
        self.finalize_metrics();
    }

    /// Processes a single tick
    fn step(&mut self) {
        self.clock = self.next_tick;
        self.next_tick += 1;

        self.admit_arrivals();
        self.drain_io();
        self.cpu_action();
        self.policy
            .periodic_update(&mut self.processes, self.clock, &mut self.audit);
    }

    fn admit_arrivals(&mut self) {
        for index in 0..self.processes.len() {
            let process = &self.processes[index];
            if process.state == ProcessState::New && process.arrival == self.clock {
                self.policy.enqueue(&mut self.processes, index);
            }
        }
    }

    fn drain_io(&mut self) {
        let mut still_blocked = Vec::with_capacity(self.blocked.len());
        for index in std::mem::take(&mut self.blocked) {
            let process = &mut self.processes[index];
            debug_assert!(process.remaining > 0, "blocked process with no I/O left");
            if process.remaining == 1 {
                process.advance_burst();
                self.policy.enqueue(&mut self.processes, index);
            } else {
                process.remaining -= 1;
                still_blocked.push(index);
            }
        }
        self.blocked = still_blocked;
    }

    fn cpu_action(&mut self) {
        if self.switching {
            if self.clock >= self.switch_end {
                self.switching = false;
                self.dispatch_next();
            }
        } else if let Some(index) = self.running {
            if self.processes[index].remaining == 1 {
                self.complete_burst(index);
            } else {
                self.processes[index].remaining -= 1;
                self.cpu_busy_ticks += 1;
                if let Some(reason) = self.policy.check_preemption(&mut self.processes, index) {
                    let pid = self.processes[index].pid;
                    self.timeline.push(SegmentLabel::Process(pid), self.clock);
                    self.audit.push(SchedulerEvent::ProcessPreempted {
                        pid,
                        reason,
                        at: self.clock,
                    });
                    self.running = None;
                    self.begin_context_switch(self.clock);
                }
            }
        } else if self.policy.has_ready() {
            if self.idle {
                self.timeline.push(SegmentLabel::Idle, self.clock);
                self.idle = false;
            }
            self.begin_context_switch(self.clock);
        } else if !self.idle {
            self.idle = true;
            self.audit.push(SchedulerEvent::CpuIdle { at: self.clock });
        }
    }

    /// Ends a context switch: select, mark Running, capture first-dispatch
    /// metrics.
    fn dispatch_next(&mut self) {
        if let Some(index) = self.policy.select_next(&mut self.processes) {
            let clock = self.clock;
            let process = &mut self.processes[index];
            process.state = ProcessState::Running;
            if process.response_time.is_none() {
                process.response_time = Some(clock - process.arrival);
                process.start_time = Some(clock);
            }
            self.audit.push(SchedulerEvent::ProcessSelected {
                pid: process.pid,
                at: clock,
            });
            self.running = Some(index);
        }
    }

    /// The running process finishes its CPU burst on this tick
    ///
    /// Closes its timeline segment at the current clock, advances it to I/O
    /// or termination, and begins a context switch immediately when ready
    /// work exists. The idle-to-busy path and this path funnel through the
    /// same switch entry, so a completion never double-switches.
    fn complete_burst(&mut self, index: usize) {
        self.cpu_busy_ticks += 1;
        let end = self.clock;
        let pid = self.processes[index].pid;
        self.timeline.push(SegmentLabel::Process(pid), end);

        let process = &mut self.processes[index];
        process.advance_burst();
        if process.is_terminated() {
            process.state = ProcessState::Terminated;
            process.completion_time = Some(end);
            self.terminated.push(index);
            self.audit
                .push(SchedulerEvent::ProcessTerminated { pid, at: end });
        } else {
            process.state = ProcessState::Blocked;
            self.blocked.push(index);
            self.audit
                .push(SchedulerEvent::ProcessBlocked { pid, at: end });
        }
        self.running = None;

        if self.policy.has_ready() {
            self.begin_context_switch(end);
        }
    }

    fn begin_context_switch(&mut self, start: u64) {
        self.switching = true;
        self.switch_end = start + self.config.context_switch_cost;
        self.timeline
            .push(SegmentLabel::ContextSwitch, self.switch_end);
    }

    fn finalize_metrics(&mut self) {
        if self.processes.is_empty() {
            self.aggregate = Some(AggregateMetrics::default());
            return;
        }

        let mut total_waiting = 0u64;
        let mut total_turnaround = 0u64;
        let mut total_response = 0u64;
        for process in &mut self.processes {
            let Some(completion) = process.completion_time else {
                continue;
            };
            let turnaround = completion - process.arrival;
            let service = process.total_burst_time();
            debug_assert!(turnaround >= service, "turnaround below service demand");
            let waiting = turnaround.saturating_sub(service);
            process.turnaround_time = Some(turnaround);
            process.waiting_time = Some(waiting);
            total_turnaround += turnaround;
            total_waiting += waiting;
            total_response += process.response_time.unwrap_or(0);
        }

        let count = self.processes.len() as f64;
        let final_time = self.timeline.last_end();
        let cpu_utilization = if final_time > 0 {
            (self.cpu_busy_ticks as f64 / final_time as f64) * 100.0
        } else {
            0.0
        };
        self.aggregate = Some(AggregateMetrics {
            avg_waiting: total_waiting as f64 / count,
            avg_turnaround: total_turnaround as f64 / count,
            avg_response: total_response as f64 / count,
            cpu_utilization,
        });
    }

    /// The recorded timeline
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// The audit trail of scheduling events
    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    /// The process arena, arrival-sorted
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Aggregate metrics, available once the run has finished
    pub fn aggregate_metrics(&self) -> Option<&AggregateMetrics> {
        self.aggregate.as_ref()
    }

    /// Clock value of the last processed tick
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Total ticks the CPU spent doing process work
    pub fn cpu_busy_ticks(&self) -> u64 {
        self.cpu_busy_ticks
    }

    /// Builds the serializable report for this run
    pub fn report(&self) -> RunReport {
        let processes = self
            .processes
            .iter()
            .map(ProcessMetrics::from_process)
            .collect();
        RunReport {
            run_id: RunId::new(),
            policy: self.policy.name().to_string(),
            processes,
            aggregate: self.aggregate.clone().unwrap_or_default(),
            timeline: self.timeline.clone(),
            events: self.audit.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multi_level::MultiLevelQueuePolicy;
    use crate::priority_aging::PriorityAgingPolicy;
    use core_types::{Pid, QueueClass};

    fn aging_sim(processes: Vec<Process>, switch: u64, interval: u64) -> Simulation {
        Simulation::new(
            processes,
            Box::new(PriorityAgingPolicy::new(interval)),
            EngineConfig {
                context_switch_cost: switch,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_empty_workload_runs_zero_ticks() {
        let mut sim = aging_sim(vec![], 1, 0);
        sim.run();
        assert!(sim.timeline().is_empty());
        assert_eq!(sim.cpu_busy_ticks(), 0);
        let aggregate = sim.aggregate_metrics().unwrap();
        assert_eq!(aggregate.cpu_utilization, 0.0);
        assert_eq!(aggregate.avg_waiting, 0.0);
    }

    #[test]
    fn test_rejects_empty_burst_sequence() {
        let err = Simulation::new(
            vec![Process::with_priority(Pid::new(1), 0, vec![], 1)],
            Box::new(PriorityAgingPolicy::new(0)),
            EngineConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, WorkloadError::EmptyBurstSequence(Pid::new(1)));
    }

    #[test]
    fn test_rejects_zero_length_burst() {
        let err = Simulation::new(
            vec![Process::with_priority(Pid::new(1), 0, vec![5, 0, 3], 1)],
            Box::new(PriorityAgingPolicy::new(0)),
            EngineConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, WorkloadError::ZeroLengthBurst(Pid::new(1)));
    }

    #[test]
    fn test_rejects_trailing_io_burst() {
        let err = Simulation::new(
            vec![Process::with_priority(Pid::new(1), 0, vec![5, 2], 1)],
            Box::new(PriorityAgingPolicy::new(0)),
            EngineConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, WorkloadError::TrailingIoBurst(Pid::new(1)));
    }

    #[test]
    fn test_rejects_duplicate_pids() {
        let err = Simulation::new(
            vec![
                Process::with_priority(Pid::new(1), 0, vec![5], 1),
                Process::with_priority(Pid::new(1), 2, vec![3], 2),
            ],
            Box::new(PriorityAgingPolicy::new(0)),
            EngineConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, WorkloadError::DuplicatePid(Pid::new(1)));
    }

    #[test]
    fn test_rejects_quantum_zero_before_simulation() {
        assert!(MultiLevelQueuePolicy::new(0).is_err());
    }

    #[test]
    fn test_single_process_timeline_and_metrics() {
        let mut sim = aging_sim(vec![Process::with_priority(Pid::new(1), 0, vec![5], 2)], 1, 0);
        sim.run();

        // Switch-in from t=0 to t=1, then the burst runs to completion.
        let labels: Vec<_> = sim
            .timeline()
            .segments()
            .iter()
            .map(|segment| (segment.label, segment.end))
            .collect();
        assert_eq!(
            labels,
            vec![
                (SegmentLabel::ContextSwitch, 1),
                (SegmentLabel::Process(Pid::new(1)), 6),
            ]
        );

        let process = &sim.processes()[0];
        assert_eq!(process.completion_time, Some(6));
        assert_eq!(process.turnaround_time, Some(6));
        assert_eq!(process.waiting_time, Some(1));
        assert_eq!(process.response_time, Some(1));
        assert_eq!(process.start_time, Some(1));
        assert_eq!(sim.clock(), 6);
        assert_eq!(sim.timeline().last_end(), sim.clock());
    }

    #[test]
    fn test_io_burst_blocks_and_resumes() {
        let mut sim = aging_sim(vec![Process::with_priority(Pid::new(1), 0, vec![2, 3, 2], 1)], 1, 0);
        sim.run();

        // CPU burst ends at 3, I/O runs 3 ticks, one idle-to-busy switch,
        // then the final CPU burst.
        let labels: Vec<_> = sim
            .timeline()
            .segments()
            .iter()
            .map(|segment| (segment.label, segment.end))
            .collect();
        assert_eq!(
            labels,
            vec![
                (SegmentLabel::ContextSwitch, 1),
                (SegmentLabel::Process(Pid::new(1)), 3),
                (SegmentLabel::Idle, 6),
                (SegmentLabel::ContextSwitch, 7),
                (SegmentLabel::Process(Pid::new(1)), 9),
            ]
        );
        let process = &sim.processes()[0];
        assert_eq!(process.completion_time, Some(9));
        // Response captured at first dispatch only.
        assert_eq!(process.response_time, Some(1));
    }

    #[test]
    fn test_response_time_is_set_exactly_once() {
        let processes = vec![
            Process::with_priority(Pid::new(1), 0, vec![7], 3),
            Process::with_priority(Pid::new(2), 3, vec![2], 1),
        ];
        let mut sim = aging_sim(processes, 1, 0);
        sim.run();

        // P1 is preempted at t=3 and resumes later; its response time stays
        // at the first dispatch value.
        let p1 = sim
            .processes()
            .iter()
            .find(|process| process.pid == Pid::new(1))
            .unwrap();
        assert_eq!(p1.response_time, Some(1));
        assert_eq!(p1.start_time, Some(1));
    }

    #[test]
    fn test_metric_identities_hold() {
        let processes = vec![
            Process::with_priority(Pid::new(1), 0, vec![7, 2, 5], 3),
            Process::with_priority(Pid::new(2), 3, vec![2, 4, 5], 1),
        ];
        let mut sim = aging_sim(processes, 1, 0);
        sim.run();

        for process in sim.processes() {
            let completion = process.completion_time.unwrap();
            let turnaround = process.turnaround_time.unwrap();
            let waiting = process.waiting_time.unwrap();
            assert_eq!(turnaround, completion - process.arrival);
            assert_eq!(waiting, turnaround - process.total_burst_time());
        }

        let aggregate = sim.aggregate_metrics().unwrap();
        assert!(aggregate.cpu_utilization > 0.0 && aggregate.cpu_utilization <= 100.0);
        let expected =
            (sim.cpu_busy_ticks() as f64 / sim.timeline().last_end() as f64) * 100.0;
        assert_eq!(aggregate.cpu_utilization, expected);
    }

    #[test]
    fn test_timeline_ends_never_decrease() {
        let processes = vec![
            Process::with_priority(Pid::new(1), 0, vec![7, 2, 5], 3),
            Process::with_priority(Pid::new(2), 3, vec![2, 4, 5], 1),
            Process::with_priority(Pid::new(3), 4, vec![3, 5, 2], 4),
        ];
        let mut sim = aging_sim(processes, 2, 3);
        sim.run();

        let ends: Vec<u64> = sim
            .timeline()
            .segments()
            .iter()
            .map(|segment| segment.end)
            .collect();
        assert!(ends.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(*ends.last().unwrap(), sim.clock());
    }

    #[test]
    fn test_zero_cost_context_switch() {
        let mut sim = aging_sim(vec![Process::with_priority(Pid::new(1), 0, vec![3], 1)], 0, 0);
        sim.run();

        // The switch segment is zero-length; dispatch still waits one tick.
        let labels: Vec<_> = sim
            .timeline()
            .segments()
            .iter()
            .map(|segment| (segment.label, segment.end))
            .collect();
        assert_eq!(
            labels,
            vec![
                (SegmentLabel::ContextSwitch, 0),
                (SegmentLabel::Process(Pid::new(1)), 4),
            ]
        );
        assert_eq!(sim.processes()[0].completion_time, Some(4));
    }

    #[test]
    fn test_report_serializes() {
        let mut sim = aging_sim(vec![Process::with_priority(Pid::new(1), 0, vec![5], 2)], 1, 0);
        sim.run();
        let report = sim.report();
        let json = serde_json::to_string(&report).unwrap();
        let back: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.policy, "priority-with-aging");
        assert_eq!(back.processes.len(), 1);
        assert_eq!(back.timeline.last_end(), 6);
    }

    #[test]
    fn test_multi_level_sim_runs_to_completion() {
        let processes = vec![
            Process::with_class(Pid::new(1), 0, vec![5, 4, 3], QueueClass::Interactive),
            Process::with_class(Pid::new(2), 0, vec![4, 2, 4], QueueClass::Batch),
        ];
        let mut sim = Simulation::new(
            processes,
            Box::new(MultiLevelQueuePolicy::new(4).unwrap()),
            EngineConfig::default(),
        )
        .unwrap();
        sim.run();
        assert!(sim
            .processes()
            .iter()
            .all(|process| process.state == ProcessState::Terminated));
        assert_eq!(sim.timeline().last_end(), sim.clock());
    }
}
