//! # Core Types
//!
//! This crate defines the fundamental types used throughout SchedSim.
//!
//! ## Philosophy
//!
//! Core types are designed with these principles:
//! - **Explicit over implicit**: Process identity, lifecycle state, and queue
//!   class are distinct types that cannot be confused with plain integers.
//! - **Type safety first**: The type system prevents misuse at compile time.
//! - **Determinism first**: Identifiers order and compare deterministically so
//!   the same workload always produces the same schedule.
//!
//! ## Key Types
//!
//! - [`Pid`]: Unique identifier for a simulated process
//! - [`RunId`]: Unique identifier for a single simulation run
//! - [`ProcessState`]: Lifecycle state of a simulated process
//! - [`QueueClass`]: Ready-queue class for multi-level scheduling

pub mod ids;
pub mod scheduling;

pub use ids::{Pid, RunId};
pub use scheduling::{ProcessState, QueueClass};
