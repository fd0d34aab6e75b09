use panelkit_expr::ExprTree;

/// A hardware command buffer: the bytes handed to the sink in one send.
///
/// For table-driven packets, `offset` is where the selected table row is
/// spliced into the payload before transmission (the byte after the
/// command id, typically).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    name: String,
    payload: Vec<u8>,
    offset: usize,
}

impl Packet {
    pub fn new(name: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
            offset: 0,
        }
    }

    /// Set the splice offset for table data.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// One step of a sequence.
///
/// The closed set of things a panel sequence can do; anything hardware
/// touches goes through the sink, anything state-dependent goes through
/// the expression engine or a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeqEntry {
    /// Send a static packet as-is.
    Packet(Packet),
    /// Refresh the packet's payload window from the named table, then send.
    TablePacket { packet: Packet, table: String },
    /// Execute the nested entries only when the condition holds.
    Branch {
        cond: ExprTree,
        entries: Vec<SeqEntry>,
    },
    /// Execute another named sequence in place.
    SubSequence(String),
    /// Ask the sink to wait.
    DelayMs(u32),
}

/// A named, ordered command list. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    name: String,
    entries: Vec<SeqEntry>,
}

impl Sequence {
    pub fn new(name: impl Into<String>, entries: Vec<SeqEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn entries(&self) -> &[SeqEntry] {
        &self.entries
    }

    /// A sequence is well-formed when it has a name and at least one entry.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.entries.is_empty()
    }

    /// Names of every sequence this one references, in entry order,
    /// including references inside branch bodies.
    pub fn references(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        collect_refs(&self.entries, &mut refs);
        refs
    }

    /// Visit every condition tree in this sequence, branch bodies included.
    pub fn for_each_expr<E, F>(&self, f: &mut F) -> Result<(), E>
    where
        F: FnMut(&ExprTree) -> Result<(), E>,
    {
        visit_exprs(&self.entries, f)
    }

    /// Visit every packet (static and table-driven) with its table, if any.
    pub fn for_each_packet<E, F>(&self, f: &mut F) -> Result<(), E>
    where
        F: FnMut(&Packet, Option<&str>) -> Result<(), E>,
    {
        visit_packets(&self.entries, f)
    }
}

fn collect_refs<'a>(entries: &'a [SeqEntry], out: &mut Vec<&'a str>) {
    for entry in entries {
        match entry {
            SeqEntry::SubSequence(name) => out.push(name),
            SeqEntry::Branch { entries, .. } => collect_refs(entries, out),
            _ => {}
        }
    }
}

fn visit_exprs<E>(
    entries: &[SeqEntry],
    f: &mut impl FnMut(&ExprTree) -> Result<(), E>,
) -> Result<(), E> {
    for entry in entries {
        if let SeqEntry::Branch { cond, entries } = entry {
            f(cond)?;
            visit_exprs(entries, f)?;
        }
    }
    Ok(())
}

fn visit_packets<E>(
    entries: &[SeqEntry],
    f: &mut impl FnMut(&Packet, Option<&str>) -> Result<(), E>,
) -> Result<(), E> {
    for entry in entries {
        match entry {
            SeqEntry::Packet(packet) => f(packet, None)?,
            SeqEntry::TablePacket { packet, table } => f(packet, Some(table))?,
            SeqEntry::Branch { entries, .. } => visit_packets(entries, f)?,
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelkit_expr::{ExprToken, ExprTree};

    fn truthy() -> ExprTree {
        ExprTree::compile(&[ExprToken::literal(1)]).unwrap()
    }

    #[test]
    fn validity_requires_name_and_entries() {
        let ok = Sequence::new("init", vec![SeqEntry::DelayMs(1)]);
        assert!(ok.is_valid());
        assert!(!Sequence::new("", vec![SeqEntry::DelayMs(1)]).is_valid());
        assert!(!Sequence::new("empty", vec![]).is_valid());
    }

    #[test]
    fn references_recurse_into_branches() {
        let seq = Sequence::new(
            "init",
            vec![
                SeqEntry::SubSequence("set_display_mode".into()),
                SeqEntry::Branch {
                    cond: truthy(),
                    entries: vec![
                        SeqEntry::Packet(Packet::new("on", [0x29])),
                        SeqEntry::SubSequence("set_brightness".into()),
                    ],
                },
            ],
        );
        assert_eq!(seq.references(), vec!["set_display_mode", "set_brightness"]);
    }

    #[test]
    fn packet_visit_sees_nested_table_packets() {
        let seq = Sequence::new(
            "s",
            vec![SeqEntry::Branch {
                cond: truthy(),
                entries: vec![SeqEntry::TablePacket {
                    packet: Packet::new("gamma", [0xca, 0, 0]).with_offset(1),
                    table: "gamma_tbl".into(),
                }],
            }],
        );
        let mut seen = Vec::new();
        seq.for_each_packet::<(), _>(&mut |p, t| {
            seen.push((p.name().to_string(), t.map(str::to_string)));
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec![("gamma".into(), Some("gamma_tbl".into()))]);
    }
}
