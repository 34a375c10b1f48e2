//! Prompt-driven workload collection
//!
//! Mirrors the interactive flow of the simulator: choose a policy, enter each
//! process (arrival, priority or type, CPU/IO/CPU bursts), then the policy
//! parameters. Reads from any `BufRead` and writes prompts to any `Write`.

use core_types::{Pid, QueueClass};
use sim_engine::Process;
use std::io::{BufRead, Write};

/// Which scheduling policy the user picked from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyChoice {
    PriorityAging,
    MultiLevelQueue,
}

/// A fully collected workload, ready to hand to the engine
#[derive(Debug)]
pub struct CollectedWorkload {
    pub processes: Vec<Process>,
    pub context_switch_cost: u64,
    /// Aging interval or time quantum, depending on the policy
    pub policy_parameter: u64,
}

/// Prompt/answer reader over arbitrary input and output streams
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a prompter over the given streams
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str) -> Result<String, String> {
        write!(self.output, "{prompt}").map_err(|e| format!("write failed: {e}"))?;
        self.output
            .flush()
            .map_err(|e| format!("flush failed: {e}"))?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| format!("read failed: {e}"))?;
        if read == 0 {
            return Err("unexpected end of input".to_string());
        }
        Ok(line.trim().to_string())
    }

    fn ask_u64(&mut self, prompt: &str) -> Result<u64, String> {
        let answer = self.ask(prompt)?;
        answer
            .parse()
            .map_err(|_| format!("expected a non-negative integer, got '{answer}'"))
    }

    fn ask_i64(&mut self, prompt: &str) -> Result<i64, String> {
        let answer = self.ask(prompt)?;
        answer
            .parse()
            .map_err(|_| format!("expected an integer, got '{answer}'"))
    }

    /// Reads the policy menu choice
    pub fn read_menu_choice(&mut self) -> Result<PolicyChoice, String> {
        let answer = self.ask("Please choose the scheduler to run (1 or 2): ")?;
        match answer.as_str() {
            "1" => Ok(PolicyChoice::PriorityAging),
            "2" => Ok(PolicyChoice::MultiLevelQueue),
            other => Err(format!("invalid choice '{other}'")),
        }
    }

    /// Collects a workload for the priority-with-aging policy
    ///
    /// The aging interval may be entered as a non-positive number, which
    /// disables aging.
    pub fn read_priority_workload(&mut self) -> Result<CollectedWorkload, String> {
        let count = self.ask_u64("Enter the number of processes: ")?;
        let mut processes = Vec::with_capacity(count as usize);
        for i in 1..=count {
            writeln!(self.output, "\nEnter details for Process {i}:")
                .map_err(|e| format!("write failed: {e}"))?;
            let arrival = self.ask_u64("  Arrival Time: ")?;
            let priority = self.ask_u64("  Initial Priority: ")?;
            let bursts = self.read_bursts()?;
            processes.push(Process::with_priority(
                Pid::new(i as u32),
                arrival,
                bursts,
                priority as u32,
            ));
        }
        let aging_interval = self.ask_i64("\nEnter Aging Interval: ")?.max(0) as u64;
        let context_switch_cost = self.ask_u64("Enter Context Switch Time: ")?;
        Ok(CollectedWorkload {
            processes,
            context_switch_cost,
            policy_parameter: aging_interval,
        })
    }

    /// Collects a workload for the multi-level queue policy
    pub fn read_multi_level_workload(&mut self) -> Result<CollectedWorkload, String> {
        let count = self.ask_u64("Enter the number of processes: ")?;
        let mut processes = Vec::with_capacity(count as usize);
        for i in 1..=count {
            writeln!(self.output, "\nEnter details for Process {i}:")
                .map_err(|e| format!("write failed: {e}"))?;
            let arrival = self.ask_u64("  Arrival Time: ")?;
            let class =
                self.ask_u64("  Process Type (0 for Foreground-RR, 1 for Background-FCFS): ")?;
            let class = match class {
                0 => QueueClass::Interactive,
                1 => QueueClass::Batch,
                other => return Err(format!("invalid process type '{other}'")),
            };
            let bursts = self.read_bursts()?;
            processes.push(Process::with_class(
                Pid::new(i as u32),
                arrival,
                bursts,
                class,
            ));
        }
        let quantum = self.ask_u64("\nEnter Time Quantum for RR Queue: ")?;
        let context_switch_cost = self.ask_u64("Enter Context Switch Time: ")?;
        Ok(CollectedWorkload {
            processes,
            context_switch_cost,
            policy_parameter: quantum,
        })
    }

    fn read_bursts(&mut self) -> Result<Vec<u64>, String> {
        let cpu1 = self.ask_u64("  CPU Burst 1: ")?;
        let io = self.ask_u64("  I/O Burst: ")?;
        let cpu2 = self.ask_u64("  CPU Burst 2: ")?;
        Ok(vec![cpu1, io, cpu2])
    }
}
