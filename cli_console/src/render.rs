//! Textual rendering of simulation results
//!
//! Builds the ASCII Gantt chart, the per-process results table with average
//! footer, and the priority-change report. Everything returns a `String`;
//! callers decide where it goes.

use sim_engine::{ProcessMetrics, RunReport, SegmentLabel, Timeline};
use std::fmt::Write;

const WIDTH_PID: usize = 5;
const WIDTH_ARRIVAL: usize = 8;
const WIDTH_BURST: usize = 8;
const WIDTH_ATTR: usize = 10;
const WIDTH_RESPONSE: usize = 10;
const WIDTH_WAITING: usize = 10;
const WIDTH_TURNAROUND: usize = 12;

/// Renders the timeline as a three-line ASCII Gantt chart
///
/// Each time unit is two characters wide; process segments are labeled
/// `P{n}`, context switches `**`, and idle spans `##`. The bottom line
/// carries the segment boundary times.
pub fn gantt_chart(timeline: &Timeline) -> String {
    if timeline.is_empty() {
        return "Gantt chart is empty.".to_string();
    }

    let mut top = String::from(" ");
    let mut middle = String::from("|");
    let mut last = 0u64;
    for segment in timeline.segments() {
        let width = (segment.end - last) as usize * 2;
        top.push_str(&"_".repeat(width));
        top.push(' ');

        let label = match segment.label {
            SegmentLabel::Process(pid) => pid.to_string(),
            SegmentLabel::ContextSwitch => "**".to_string(),
            SegmentLabel::Idle => "##".to_string(),
        };
        let padding = width.saturating_sub(label.len());
        let left = padding / 2;
        middle.push_str(&"_".repeat(left));
        middle.push_str(&label);
        middle.push_str(&"_".repeat(padding - left));
        middle.push('|');

        last = segment.end;
    }

    let mut times = vec![0u64];
    times.extend(timeline.segments().iter().map(|segment| segment.end));
    let mut time_line = String::new();
    for i in 0..times.len() {
        time_line.push_str(&times[i].to_string());
        if i + 1 < times.len() {
            let width = (times[i + 1] - times[i]) as usize * 2;
            let spaces = (width + 1).saturating_sub(times[i + 1].to_string().len());
            time_line.push_str(&" ".repeat(spaces));
        }
    }

    format!("{top}\n{middle}\n{time_line}")
}

fn burst_column_name(index: usize) -> String {
    if index % 2 == 0 {
        format!("CPU {}", index / 2 + 1)
    } else {
        format!("I/O {}", index / 2 + 1)
    }
}

fn opt(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Renders the per-process results table with the averages footer
pub fn results_table(report: &RunReport) -> String {
    if report.processes.is_empty() {
        return "No processes to display.".to_string();
    }

    let mut processes: Vec<&ProcessMetrics> = report.processes.iter().collect();
    processes.sort_by_key(|process| process.pid);

    let burst_columns = processes
        .iter()
        .map(|process| process.bursts.len())
        .max()
        .unwrap_or(0);
    let has_priority = processes.iter().any(|process| process.priority.is_some());
    let has_class = processes.iter().any(|process| process.class.is_some());

    let mut header = String::new();
    let _ = write!(header, "{:<WIDTH_PID$}", "PID");
    let _ = write!(header, "{:<WIDTH_ARRIVAL$}", "Arrival");
    for index in 0..burst_columns {
        let _ = write!(header, "{:<WIDTH_BURST$}", burst_column_name(index));
    }
    if has_priority {
        let _ = write!(header, "{:<WIDTH_ATTR$}", "Priority");
    }
    if has_class {
        let _ = write!(header, "{:<WIDTH_ATTR$}", "Type");
    }
    let _ = write!(header, "{:<WIDTH_RESPONSE$}", "Response");
    let _ = write!(header, "{:<WIDTH_WAITING$}", "Waiting");
    let _ = write!(header, "{:<WIDTH_TURNAROUND$}", "Turnaround");

    let mut out = String::new();
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "{}", "-".repeat(header.len()));

    for process in &processes {
        let _ = write!(out, "{:<WIDTH_PID$}", process.pid.to_string());
        let _ = write!(out, "{:<WIDTH_ARRIVAL$}", process.arrival);
        for index in 0..burst_columns {
            let burst = process
                .bursts
                .get(index)
                .map_or_else(|| "-".to_string(), |b| b.to_string());
            let _ = write!(out, "{:<WIDTH_BURST$}", burst);
        }
        if has_priority {
            let _ = write!(out, "{:<WIDTH_ATTR$}", opt(process.priority.map(u64::from)));
        }
        if has_class {
            let class = process
                .class
                .map_or_else(|| "-".to_string(), |c| c.to_string());
            let _ = write!(out, "{:<WIDTH_ATTR$}", class);
        }
        let _ = write!(out, "{:<WIDTH_RESPONSE$}", opt(process.response));
        let _ = write!(out, "{:<WIDTH_WAITING$}", opt(process.waiting));
        let _ = writeln!(out, "{:<WIDTH_TURNAROUND$}", opt(process.turnaround));
    }

    let _ = writeln!(out, "{}", "-".repeat(header.len()));
    let mut label_width = WIDTH_PID + WIDTH_ARRIVAL + burst_columns * WIDTH_BURST;
    if has_priority {
        label_width += WIDTH_ATTR;
    }
    if has_class {
        label_width += WIDTH_ATTR;
    }
    let _ = write!(out, "{:<label_width$}", "Average:");
    let _ = write!(
        out,
        "{:<WIDTH_RESPONSE$.2}",
        report.aggregate.avg_response
    );
    let _ = write!(out, "{:<WIDTH_WAITING$.2}", report.aggregate.avg_waiting);
    let _ = writeln!(
        out,
        "{:<WIDTH_TURNAROUND$.2}",
        report.aggregate.avg_turnaround
    );
    let _ = write!(
        out,
        "\nCPU Utilization: {:.2}%",
        report.aggregate.cpu_utilization
    );
    out
}

/// Renders the priority-change history of an aging run, one line per process
pub fn priority_history(report: &RunReport) -> String {
    let mut processes: Vec<&ProcessMetrics> = report.processes.iter().collect();
    processes.sort_by_key(|process| process.pid);

    let mut out = String::new();
    for process in processes {
        if process.priority_history.is_empty() {
            continue;
        }
        let history = process
            .priority_history
            .iter()
            .map(|change| format!("{} @ t={}: {}", process.pid, change.at, change.priority))
            .collect::<Vec<_>>()
            .join(" -> ");
        let _ = writeln!(out, "PID {}: {}", process.pid.as_u32(), history);
    }
    out
}

/// Renders the full report as pretty-printed JSON
pub fn report_json(report: &RunReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("serialization failed: {e}"))
}
