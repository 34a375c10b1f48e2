//! Unique identifiers for simulation entities

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a simulated process
///
/// Pids are assigned by the workload, not generated: the caller decides the
/// numbering and the engine rejects duplicates at construction time. They
/// order deterministically, which keeps tie-breaks reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pid(u32);

impl Pid {
    /// Creates a pid from a raw workload-assigned number
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw pid number
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Unique identifier for a single simulation run
///
/// Every run report is stamped with a fresh run id so results from different
/// runs can be told apart once serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Creates a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a run ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Run({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pid_display() {
        assert_eq!(Pid::new(1).to_string(), "P1");
        assert_eq!(Pid::new(42).to_string(), "P42");
    }

    #[test]
    fn test_pid_ordering_is_numeric() {
        let mut pids = vec![Pid::new(10), Pid::new(2), Pid::new(7)];
        pids.sort();
        assert_eq!(pids, vec![Pid::new(2), Pid::new(7), Pid::new(10)]);
    }

    #[test]
    fn test_run_ids_are_unique() {
        let a = RunId::new();
        let b = RunId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_pid_serde_round_trip() {
        let pid = Pid::new(3);
        let json = serde_json::to_string(&pid).unwrap();
        let back: Pid = serde_json::from_str(&json).unwrap();
        assert_eq!(pid, back);
    }
}
