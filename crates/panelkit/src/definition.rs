use panelkit_expr::PanelFn;
use panelkit_maptbl::{Dimension, GetIdxFn, InitFn, Shape};
use panelkit_props::EnumVariant;
use panelkit_seq::Sequence;

/// Declaration of one property in a panel definition.
#[derive(Clone)]
pub enum PropertyDef {
    Range {
        name: String,
        init: u32,
        min: u32,
        max: u32,
    },
    Enum {
        name: String,
        init: u32,
        variants: Vec<EnumVariant>,
    },
}

impl PropertyDef {
    pub fn range(name: impl Into<String>, init: u32, min: u32, max: u32) -> Self {
        Self::Range {
            name: name.into(),
            init,
            min,
            max,
        }
    }

    pub fn enumeration(
        name: impl Into<String>,
        init: u32,
        variants: Vec<EnumVariant>,
    ) -> Self {
        Self::Enum {
            name: name.into(),
            init,
            variants,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Range { name, .. } => name,
            Self::Enum { name, .. } => name,
        }
    }
}

/// Declaration of one map table in a panel definition.
#[derive(Clone)]
pub struct MaptblDef {
    pub name: String,
    pub shape: Shape,
    pub init_bytes: Vec<u8>,
    /// `(dimension, property)` bindings for property-driven indexing.
    pub bindings: Vec<(Dimension, String)>,
    /// Copy window override; defaults to one row.
    pub sizeof_copy: Option<usize>,
    pub init: Option<InitFn>,
    pub getidx: Option<GetIdxFn>,
}

impl MaptblDef {
    pub fn new(name: impl Into<String>, shape: Shape, init_bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            shape,
            init_bytes: init_bytes.into(),
            bindings: Vec::new(),
            sizeof_copy: None,
            init: None,
            getidx: None,
        }
    }

    pub fn bind(mut self, dim: Dimension, property: impl Into<String>) -> Self {
        self.bindings.push((dim, property.into()));
        self
    }

    pub fn sizeof_copy(mut self, size: usize) -> Self {
        self.sizeof_copy = Some(size);
        self
    }

    pub fn on_init(mut self, hook: InitFn) -> Self {
        self.init = Some(hook);
        self
    }

    pub fn on_getidx(mut self, hook: GetIdxFn) -> Self {
        self.getidx = Some(hook);
        self
    }
}

/// Everything a panel model declares: the parsed form of the static
/// definition tables a chip driver ships.
///
/// [`crate::PanelEngine::prepare`] consumes one of these and either
/// accepts the whole definition or rejects it at load time.
#[derive(Clone, Default)]
pub struct PanelDefinition {
    pub name: String,
    pub properties: Vec<PropertyDef>,
    pub tables: Vec<MaptblDef>,
    pub functions: Vec<(String, PanelFn)>,
    pub sequences: Vec<Sequence>,
}

impl PanelDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn property(mut self, def: PropertyDef) -> Self {
        self.properties.push(def);
        self
    }

    pub fn table(mut self, def: MaptblDef) -> Self {
        self.tables.push(def);
        self
    }

    pub fn function(mut self, name: impl Into<String>, func: PanelFn) -> Self {
        self.functions.push((name.into(), func));
        self
    }

    pub fn sequence(mut self, seq: Sequence) -> Self {
        self.sequences.push(seq);
        self
    }
}
