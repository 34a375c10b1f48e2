//! Timeline (Gantt chart) of CPU activity
//!
//! The engine appends a segment whenever the CPU changes what it is doing: a
//! process segment when a burst completes or is preempted, a context-switch
//! segment when a switch is scheduled, and an idle segment when a previously
//! idle CPU goes busy again. Segments are append-only and their end times
//! never decrease.

use core_types::Pid;
use serde::{Deserialize, Serialize};

/// What the CPU was doing during a timeline segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentLabel {
    /// A process was executing
    Process(Pid),
    /// A context switch was in progress
    ContextSwitch,
    /// The CPU was idle
    Idle,
}

/// A labeled interval of CPU activity
///
/// A segment spans from the end of the previous segment (or 0 for the first)
/// up to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// What the CPU was doing
    pub label: SegmentLabel,
    /// Clock value at which this segment closes
    pub end: u64,
}

/// Append-only record of CPU activity over a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    /// Creates an empty timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment closing at `end`
    pub fn push(&mut self, label: SegmentLabel, end: u64) {
        debug_assert!(
            self.last_end() <= end,
            "timeline end times must not decrease"
        );
        self.segments.push(Segment { label, end });
    }

    /// End time of the last segment, or 0 for an empty timeline
    pub fn last_end(&self) -> u64 {
        self.segments.last().map_or(0, |segment| segment.end)
    }

    /// All recorded segments, in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments recorded
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
