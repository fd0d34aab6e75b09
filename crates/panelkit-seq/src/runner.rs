use std::io;

use panelkit_expr::{EvalContext, FunctionTable};
use panelkit_maptbl::MaptblSet;
use panelkit_props::PropertyRegistry;
use tracing::trace;

use crate::command::{Packet, SeqEntry, Sequence};
use crate::error::SequenceError;
use crate::set::SequenceSet;

/// The hardware boundary: where assembled command bytes go.
///
/// The engine never touches registers itself; it hands finished payloads
/// to a sink (a DSI transport, a test capture buffer, ...).
pub trait CommandSink {
    fn send(&mut self, payload: &[u8]) -> io::Result<()>;

    /// Wait request between commands. Default: ignore.
    fn delay_ms(&mut self, _ms: u32) -> io::Result<()> {
        Ok(())
    }
}

/// Collects payloads instead of transmitting them. For tests and dumps.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    pub sent: Vec<Vec<u8>>,
    pub delays: Vec<u32>,
}

impl CommandSink for CaptureSink {
    fn send(&mut self, payload: &[u8]) -> io::Result<()> {
        self.sent.push(payload.to_vec());
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> io::Result<()> {
        self.delays.push(ms);
        Ok(())
    }
}

/// Walks sorted sequences against live panel state.
///
/// Requires the set to have passed [`SequenceSet::sort`]: a sorted set is
/// known acyclic, which bounds sub-sequence recursion, and every reference
/// is known to resolve.
#[derive(Debug, Clone, Copy)]
pub struct SequenceRunner<'a> {
    set: &'a SequenceSet,
    props: &'a PropertyRegistry,
    tables: &'a MaptblSet,
    funcs: &'a FunctionTable,
}

impl<'a> SequenceRunner<'a> {
    pub fn new(
        set: &'a SequenceSet,
        props: &'a PropertyRegistry,
        tables: &'a MaptblSet,
        funcs: &'a FunctionTable,
    ) -> Self {
        Self {
            set,
            props,
            tables,
            funcs,
        }
    }

    /// Execute one named sequence.
    pub fn run(&self, name: &str, sink: &mut dyn CommandSink) -> Result<(), SequenceError> {
        if !self.set.is_sorted() {
            return Err(SequenceError::NotSorted);
        }
        let seq = self.set.get(name).ok_or_else(|| SequenceError::NotFound {
            name: name.to_string(),
        })?;
        trace!(sequence = name, "running sequence");
        self.walk(seq, sink)
    }

    fn walk(&self, seq: &Sequence, sink: &mut dyn CommandSink) -> Result<(), SequenceError> {
        self.walk_entries(seq.name(), seq.entries(), sink)
    }

    fn walk_entries(
        &self,
        sequence: &str,
        entries: &[SeqEntry],
        sink: &mut dyn CommandSink,
    ) -> Result<(), SequenceError> {
        for entry in entries {
            match entry {
                SeqEntry::Packet(packet) => sink.send(packet.payload())?,
                SeqEntry::TablePacket { packet, table } => {
                    let payload = self.assemble(sequence, packet, table)?;
                    sink.send(&payload)?;
                }
                SeqEntry::Branch { cond, entries } => {
                    let ctx = EvalContext {
                        props: self.props,
                        funcs: self.funcs,
                    };
                    if cond.is_true(&ctx)? {
                        self.walk_entries(sequence, entries, sink)?;
                    }
                }
                SeqEntry::SubSequence(name) => {
                    let sub = self.set.get(name).ok_or_else(|| SequenceError::NotFound {
                        name: name.to_string(),
                    })?;
                    self.walk(sub, sink)?;
                }
                SeqEntry::DelayMs(ms) => sink.delay_ms(*ms)?,
            }
        }
        Ok(())
    }

    /// Clone the packet payload and splice in the table's selected row.
    fn assemble(
        &self,
        sequence: &str,
        packet: &Packet,
        table: &str,
    ) -> Result<Vec<u8>, SequenceError> {
        let tbl = self
            .tables
            .get(table)
            .ok_or_else(|| SequenceError::UnknownTable {
                sequence: sequence.to_string(),
                table: table.to_string(),
            })?;
        let window = tbl.sizeof_copy();
        let offset = packet.offset();
        let mut payload = packet.payload().to_vec();
        if offset
            .checked_add(window)
            .is_none_or(|end| end > payload.len())
        {
            return Err(SequenceError::WindowMismatch {
                packet: packet.name().to_string(),
                offset,
                window,
                payload: payload.len(),
            });
        }
        tbl.copy_row_out(self.props, &mut payload[offset..offset + window])?;
        Ok(payload)
    }
}
