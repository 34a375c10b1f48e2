//! # CLI Console
//!
//! Downstream presentation for the scheduling engine: prompt-driven workload
//! collection and textual rendering of results. It contains no scheduling
//! logic; it produces the engine's inputs and consumes its outputs.
//!
//! ## Design
//!
//! - [`input`] reads workloads from any `BufRead`, so tests can drive the
//!   prompts with string buffers instead of a terminal.
//! - [`render`] builds the ASCII Gantt chart, the results table, and the
//!   priority-change report as plain `String`s.

pub mod input;
pub mod render;
