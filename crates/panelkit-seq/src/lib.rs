#![forbid(unsafe_code)]

//! Named panel command sequences with dependency-ordered execution.
//!
//! A panel definition registers sequences like `init`, `display_on`, or
//! `set_brightness`. A sequence's entries are packets, delays, conditional
//! branches, and references to other sequences: `init` composes
//! `set_display_mode`, which composes `set_brightness`, and so on. The set
//! of references forms a directed graph that must be acyclic.
//!
//! Before execution, [`SequenceSet::sort`] validates every sequence and
//! reorders the set so dependencies come strictly before their referrers,
//! failing closed on cycles: a cyclic or otherwise broken definition is
//! rejected at load time with the set left untouched, and nothing runs.
//!
//! Execution happens through a [`SequenceRunner`], which assembles packets
//! (splicing map-table rows into table-driven ones), evaluates branch
//! conditions against live properties, and hands finished payloads to a
//! [`CommandSink`].

mod command;
mod error;
mod graph;
mod runner;
mod set;

pub use command::{Packet, SeqEntry, Sequence};
pub use error::SequenceError;
pub use graph::DepGraph;
pub use runner::{CaptureSink, CommandSink, SequenceRunner};
pub use set::SequenceSet;
