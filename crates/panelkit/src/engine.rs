use panelkit_expr::{FunctionTable, Operator, rule};
use panelkit_maptbl::{MapTbl, MaptblSet};
use panelkit_props::{Property, PropertyRegistry};
use panelkit_seq::{CommandSink, SequenceRunner, SequenceSet};
use tracing::{info, warn};

use crate::definition::{MaptblDef, PanelDefinition, PropertyDef};
use crate::Error;

/// One panel's whole command engine: properties, tables, functions and
/// sorted sequences, built from a [`PanelDefinition`].
///
/// # Preparation
///
/// [`PanelEngine::prepare`] is fail-fast: every property registers, every
/// table builds and initializes, every condition and table reference binds,
/// and the sequence set sorts acyclically, or the whole definition is
/// rejected and no engine is produced. A panel that prepares cleanly never
/// hits a dangling name or a cycle at runtime.
///
/// # Concurrency
///
/// The engine is `Send` but not shared-mutable; a panel device owns
/// exactly one engine and serializes access to it. A property write and a
/// dependent sequence run must be atomic from the caller's perspective.
pub struct PanelEngine {
    name: String,
    props: PropertyRegistry,
    tables: MaptblSet,
    funcs: FunctionTable,
    seqs: SequenceSet,
}

impl PanelEngine {
    /// Build an engine from a definition, rejecting it on any fault.
    pub fn prepare(def: PanelDefinition) -> Result<Self, Error> {
        let mut props = PropertyRegistry::new();
        for prop in &def.properties {
            match prop {
                PropertyDef::Range {
                    name,
                    init,
                    min,
                    max,
                } => props.add_range(name, *init, *min, *max)?,
                PropertyDef::Enum {
                    name,
                    init,
                    variants,
                } => props.add_enum(name, *init, variants.clone())?,
            }
        }

        let mut tables = MaptblSet::new();
        for table in def.tables {
            tables.add(Self::build_table(table, &props)?)?;
        }

        let mut funcs = FunctionTable::new();
        for (name, func) in def.functions {
            funcs.register(&name, func)?;
        }

        let mut seqs = SequenceSet::new();
        for seq in def.sequences {
            Self::check_sequence(&seq, &props, &tables, &funcs)?;
            seqs.add(seq)?;
        }
        seqs.sort().inspect_err(|err| {
            warn!(panel = %def.name, %err, "rejecting panel definition");
        })?;

        info!(
            panel = %def.name,
            properties = props.len(),
            tables = tables.len(),
            sequences = seqs.len(),
            "panel engine prepared"
        );
        Ok(Self {
            name: def.name,
            props,
            tables,
            funcs,
            seqs,
        })
    }

    fn build_table(def: MaptblDef, props: &PropertyRegistry) -> Result<MapTbl, Error> {
        let mut builder = MapTbl::builder(def.name.clone(), def.shape).init_bytes(def.init_bytes);
        for (dim, property) in def.bindings {
            if !props.contains(&property) {
                return Err(Error::Property(panelkit_props::PropertyError::NotFound {
                    name: property,
                }));
            }
            builder = builder.bind(dim, property);
        }
        if let Some(size) = def.sizeof_copy {
            builder = builder.sizeof_copy(size);
        }
        let has_init = def.init.is_some();
        if let Some(hook) = def.init {
            builder = builder.on_init(hook);
        }
        if let Some(hook) = def.getidx {
            builder = builder.on_getidx(hook);
        }
        let mut table = builder.build()?;
        if has_init {
            table.init()?;
        } else {
            table.mark_initialized();
        }
        Ok(table)
    }

    /// Bind every condition and resolve every table reference up front.
    fn check_sequence(
        seq: &panelkit_seq::Sequence,
        props: &PropertyRegistry,
        tables: &MaptblSet,
        funcs: &FunctionTable,
    ) -> Result<(), Error> {
        seq.for_each_expr(&mut |expr| expr.bind(props, funcs))
            .map_err(Error::Expr)?;
        seq.for_each_packet(&mut |packet, table| {
            let Some(table_name) = table else {
                return Ok(());
            };
            let Some(tbl) = tables.get(table_name) else {
                return Err(Error::Sequence(panelkit_seq::SequenceError::UnknownTable {
                    sequence: seq.name().to_string(),
                    table: table_name.to_string(),
                }));
            };
            let window = tbl.sizeof_copy();
            let end = packet.offset().checked_add(window);
            if end.is_none_or(|end| end > packet.payload().len()) {
                return Err(Error::Sequence(
                    panelkit_seq::SequenceError::WindowMismatch {
                        packet: packet.name().to_string(),
                        offset: packet.offset(),
                        window,
                        payload: packet.payload().len(),
                    },
                ));
            }
            Ok(())
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn props(&self) -> &PropertyRegistry {
        &self.props
    }

    #[inline]
    pub fn props_mut(&mut self) -> &mut PropertyRegistry {
        &mut self.props
    }

    pub fn maptbl(&self, name: &str) -> Option<&MapTbl> {
        self.tables.get(name)
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.props.find(name)
    }

    /// Current value of a property.
    pub fn get_property(&self, name: &str) -> Result<u32, Error> {
        Ok(self.props.get_value(name)?)
    }

    /// Domain-checked property write.
    pub fn set_property(&mut self, name: &str, value: u32) -> Result<(), Error> {
        Ok(self.props.set_value(name, value)?)
    }

    /// Re-derive a property through its update hook.
    pub fn refresh_property(&mut self, name: &str) -> Result<u32, Error> {
        Ok(self.props.refresh(name)?)
    }

    /// Sequence names in dependency order.
    pub fn sequence_names(&self) -> Vec<&str> {
        self.seqs.names()
    }

    /// Execute one named sequence against a sink.
    pub fn run_sequence(&self, name: &str, sink: &mut dyn CommandSink) -> Result<(), Error> {
        let runner = SequenceRunner::new(&self.seqs, &self.props, &self.tables, &self.funcs);
        Ok(runner.run(name, sink)?)
    }

    /// Evaluate an ad-hoc comparison rule against current state.
    pub fn check_rule(&self, property: &str, op: Operator, value: u32) -> Result<bool, Error> {
        let tree = panelkit_expr::ExprTree::compile(&rule(property, op, value))?;
        tree.bind(&self.props, &self.funcs)?;
        let ctx = panelkit_expr::EvalContext {
            props: &self.props,
            funcs: &self.funcs,
        };
        Ok(tree.is_true(&ctx)?)
    }
}

impl std::fmt::Debug for PanelEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelEngine")
            .field("name", &self.name)
            .field("properties", &self.props.len())
            .field("tables", &self.tables.len())
            .field("sequences", &self.seqs.len())
            .finish_non_exhaustive()
    }
}
