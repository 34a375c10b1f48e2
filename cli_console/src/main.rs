//! Interactive scheduler simulation console
//!
//! Presents the policy menu, collects a workload from stdin, runs the
//! simulation, and prints the Gantt chart, the results table, and (for the
//! aging policy) the priority-change history. `--json` prints the full run
//! report as JSON instead of the tables.

use cli_console::input::{PolicyChoice, Prompter};
use cli_console::render;
use sim_engine::{
    EngineConfig, MultiLevelQueuePolicy, PriorityAgingPolicy, SchedulingPolicy, Simulation,
};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let json_output = std::env::args().any(|arg| arg == "--json");

    println!("Welcome to the Advanced CPU Scheduler Simulation!");
    println!("1. Preemptive Priority Scheduling with Aging");
    println!("2. Multi-Level Queue Scheduling (RR/FCFS)");

    match run(json_output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(json_output: bool) -> Result<(), String> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let choice = prompter.read_menu_choice()?;

    let (workload, policy): (_, Box<dyn SchedulingPolicy>) = match choice {
        PolicyChoice::PriorityAging => {
            let workload = prompter.read_priority_workload()?;
            let policy = PriorityAgingPolicy::new(workload.policy_parameter);
            println!("\nRunning Preemptive Priority Scheduler with Aging...");
            (workload, Box::new(policy))
        }
        PolicyChoice::MultiLevelQueue => {
            let workload = prompter.read_multi_level_workload()?;
            let policy =
                MultiLevelQueuePolicy::new(workload.policy_parameter).map_err(|e| e.to_string())?;
            println!("\nRunning Multi-Level Queue Scheduler...");
            (workload, Box::new(policy))
        }
    };

    let config = EngineConfig {
        context_switch_cost: workload.context_switch_cost,
    };
    let mut sim =
        Simulation::new(workload.processes, policy, config).map_err(|e| e.to_string())?;
    sim.run();
    let report = sim.report();

    if json_output {
        println!("{}", render::report_json(&report));
        return Ok(());
    }

    println!("\nGantt Chart:");
    println!("{}", render::gantt_chart(&report.timeline));
    println!("\n--- Final Metrics Summary ---");
    println!("{}", render::results_table(&report));

    if choice == PolicyChoice::PriorityAging {
        println!("\n--- Priority Changes ---");
        print!("{}", render::priority_history(&report));
    }
    Ok(())
}
